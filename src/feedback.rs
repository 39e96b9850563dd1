use crate::error::Error;
use crate::sparse::SparseVector;
use crate::tokenizer::tokenize;
use crate::vsm::{QueryWeighting, SearchHit, TfIdfMatrix};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Rocchio feedback parameters. `gamma = 0` degenerates to
/// positive-feedback-only expansion, which is also what happens naturally
/// when the candidate pool is no larger than `relevant_k`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RocchioParams {
    pub alpha: f64,
    pub beta: f64,
    pub gamma: f64,
    /// Leading entries of the pool assumed relevant.
    pub relevant_k: usize,
    /// Size of the top-of-ranking pool that is partitioned.
    pub candidate_pool_k: usize,
    /// Number of expansion terms appended to the query.
    pub expand_terms: usize,
}

impl Default for RocchioParams {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            beta: 0.75,
            gamma: 0.0,
            relevant_k: 5,
            candidate_pool_k: 10,
            expand_terms: 10,
        }
    }
}

impl RocchioParams {
    /// Fail fast on out-of-range mixing weights.
    pub fn validate(&self) -> Result<(), Error> {
        for (name, value) in [
            ("alpha", self.alpha),
            ("beta", self.beta),
            ("gamma", self.gamma),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidParameter { name, value });
            }
        }
        Ok(())
    }
}

/// Result of one feedback round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackOutcome {
    /// Original query terms (first-occurrence order) followed by expansion
    /// terms in descending-weight order.
    pub expanded_query: Vec<String>,
    pub reranked: Vec<SearchHit>,
}

/// Mean of the full weight vectors of the given hits; the zero vector for an
/// empty set.
fn centroid(matrix: &TfIdfMatrix, hits: &[SearchHit]) -> SparseVector {
    let mut sum = SparseVector::new();
    for hit in hits {
        if let Some(v) = matrix.doc_vector(&hit.doc_id) {
            sum.add_assign(&v);
        }
    }
    if hits.is_empty() {
        sum
    } else {
        sum.scaled(1.0 / hits.len() as f64)
    }
}

/// Classical Rocchio relevance feedback over an initial ranking:
/// `q' = alpha * q + beta * relevant_centroid - gamma * nonrelevant_centroid`,
/// expansion by the heaviest coordinates of `q'` not already in the query,
/// then re-scoring against the expanded term sequence. An empty `ranked`
/// list returns the query unexpanded with an empty reranked list.
pub fn expand_and_rerank(
    matrix: &TfIdfMatrix,
    query_text: &str,
    ranked: &[SearchHit],
    params: &RocchioParams,
    weighting: QueryWeighting,
) -> Result<FeedbackOutcome, Error> {
    params.validate()?;

    let tokens = tokenize(query_text, matrix.tokenizer_config());
    let mut seen: HashSet<String> = HashSet::new();
    let mut original_terms: Vec<String> = Vec::new();
    for token in &tokens {
        if seen.insert(token.clone()) {
            original_terms.push(token.clone());
        }
    }

    if ranked.is_empty() {
        return Ok(FeedbackOutcome {
            expanded_query: original_terms,
            reranked: Vec::new(),
        });
    }

    let pool = &ranked[..params.candidate_pool_k.min(ranked.len())];
    let split = params.relevant_k.min(pool.len());
    let (relevant, nonrelevant) = pool.split_at(split);

    let mut q_prime = SparseVector::from_counts(tokens).scaled(params.alpha);
    q_prime.add_scaled(params.beta, &centroid(matrix, relevant));
    q_prime.add_scaled(-params.gamma, &centroid(matrix, nonrelevant));

    let expansion = q_prime.top_terms(params.expand_terms, &seen);
    tracing::debug!(
        query = query_text,
        num_expansion = expansion.len(),
        num_relevant = relevant.len(),
        num_nonrelevant = nonrelevant.len(),
        "rocchio expansion"
    );

    let mut expanded_query = original_terms;
    expanded_query.extend(expansion.into_iter().map(|(term, _)| term));

    // Expansion terms are already normalized tokens; scoring them directly
    // avoids pushing them through the stemmer a second time.
    let reranked = matrix.score_terms(&expanded_query, weighting);
    Ok(FeedbackOutcome {
        expanded_query,
        reranked,
    })
}
