use crate::corpus::{bag_of_words, build_vocabulary, Corpus};
use crate::sparse::SparseVector;
use crate::tokenizer::{tokenize, TokenizerConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of a ranked result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub doc_id: String,
    pub score: f64,
}

/// How the query vector is weighted before the dot product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryWeighting {
    /// Raw term counts.
    RawCounts,
    /// The same row-normalized `tf * idf` transform applied to document rows.
    TfIdf,
}

/// Dense raw term counts: `counts[doc][term]`, labeled by `terms` (columns)
/// and `doc_ids` (rows).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermDocumentMatrix {
    pub terms: Vec<String>,
    pub doc_ids: Vec<String>,
    pub counts: Vec<Vec<u64>>,
}

/// Build the vocabulary and the dense count matrix for a corpus. The matrix
/// and any index built with the same configuration derive from identical
/// token sequences, so their counts agree by construction.
pub fn term_document_matrix(corpus: &Corpus, config: &TokenizerConfig) -> TermDocumentMatrix {
    let vocab = build_vocabulary(corpus, config, 1);
    let mut counts = Vec::with_capacity(corpus.len());
    let mut doc_ids = Vec::with_capacity(corpus.len());
    for doc in corpus {
        let mut row = vec![0u64; vocab.len()];
        for (term_id, count) in bag_of_words(doc, &vocab, config) {
            row[term_id as usize] = count;
        }
        counts.push(row);
        doc_ids.push(doc.id.clone());
    }
    TermDocumentMatrix {
        terms: vocab.terms().to_vec(),
        doc_ids,
        counts,
    }
}

/// Dense TF-IDF weights over a fixed corpus snapshot, plus the lookups that
/// make it the single source of truth for both query scoring and feedback
/// centroids. Immutable after build; rebuild for a new corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfMatrix {
    terms: Vec<String>,
    doc_ids: Vec<String>,
    weights: Vec<Vec<f64>>,
    idf: Vec<f64>,
    term_cols: HashMap<String, usize>,
    doc_rows: HashMap<String, usize>,
    config: TokenizerConfig,
}

/// Compute TF-IDF weights from the count matrix:
/// `tf = count / max(1, row_sum)`, `idf = ln((N + 1) / (df + 1)) + 1`,
/// `weight = tf * idf`. The smoothed IDF keeps every indexed term's idf
/// strictly positive; an all-zero row (empty document) stays all zero.
pub fn tfidf_matrix(corpus: &Corpus, config: &TokenizerConfig) -> TfIdfMatrix {
    let tdm = term_document_matrix(corpus, config);
    let num_docs = tdm.doc_ids.len();
    let num_terms = tdm.terms.len();

    let mut df = vec![0u64; num_terms];
    for row in &tdm.counts {
        for (j, &count) in row.iter().enumerate() {
            if count > 0 {
                df[j] += 1;
            }
        }
    }
    let idf: Vec<f64> = df
        .iter()
        .map(|&df_t| ((num_docs as f64 + 1.0) / (df_t as f64 + 1.0)).ln() + 1.0)
        .collect();

    let mut weights = Vec::with_capacity(num_docs);
    for row in &tdm.counts {
        let row_sum = row.iter().sum::<u64>().max(1) as f64;
        weights.push(
            row.iter()
                .enumerate()
                .map(|(j, &count)| (count as f64 / row_sum) * idf[j])
                .collect(),
        );
    }

    let term_cols = tdm
        .terms
        .iter()
        .enumerate()
        .map(|(j, t)| (t.clone(), j))
        .collect();
    let doc_rows = tdm
        .doc_ids
        .iter()
        .enumerate()
        .map(|(i, d)| (d.clone(), i))
        .collect();

    tracing::info!(num_docs, num_terms, "built tf-idf matrix");
    TfIdfMatrix {
        terms: tdm.terms,
        doc_ids: tdm.doc_ids,
        weights,
        idf,
        term_cols,
        doc_rows,
        config: config.clone(),
    }
}

impl TfIdfMatrix {
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn doc_ids(&self) -> &[String] {
        &self.doc_ids
    }

    /// Row-major dense weights, rows aligned with `doc_ids`.
    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    pub fn tokenizer_config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Weight of a (document, term) pair; 0.0 for unknown documents or terms.
    pub fn weight(&self, doc_id: &str, term: &str) -> f64 {
        match (self.doc_rows.get(doc_id), self.term_cols.get(term)) {
            (Some(&row), Some(&col)) => self.weights[row][col],
            _ => 0.0,
        }
    }

    /// Smoothed idf of a term, if it is in the vocabulary.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.term_cols.get(term).map(|&col| self.idf[col])
    }

    /// A document's full weight row as a sparse vector over its non-zero
    /// terms. Used for feedback centroids.
    pub fn doc_vector(&self, doc_id: &str) -> Option<SparseVector> {
        let &row = self.doc_rows.get(doc_id)?;
        let mut v = SparseVector::new();
        for (j, &w) in self.weights[row].iter().enumerate() {
            if w != 0.0 {
                v.insert(self.terms[j].clone(), w);
            }
        }
        Some(v)
    }

    /// Tokenize a free-text query with the pipeline the matrix was built
    /// with, then score every document. Descending score; ties keep corpus
    /// order.
    pub fn score_query(&self, query_text: &str, weighting: QueryWeighting) -> Vec<SearchHit> {
        let tokens = tokenize(query_text, &self.config);
        self.score_terms(&tokens, weighting)
    }

    /// Score an already-normalized term sequence. Out-of-vocabulary terms
    /// contribute nothing.
    pub fn score_terms(&self, terms: &[String], weighting: QueryWeighting) -> Vec<SearchHit> {
        let mut q_counts: HashMap<usize, f64> = HashMap::new();
        let mut in_vocab_total = 0u64;
        for term in terms {
            if let Some(&col) = self.term_cols.get(term) {
                *q_counts.entry(col).or_insert(0.0) += 1.0;
                in_vocab_total += 1;
            }
        }
        let mut q_vector: Vec<(usize, f64)> = match weighting {
            QueryWeighting::RawCounts => q_counts.into_iter().collect(),
            QueryWeighting::TfIdf => {
                let total = in_vocab_total.max(1) as f64;
                q_counts
                    .into_iter()
                    .map(|(col, count)| (col, (count / total) * self.idf[col]))
                    .collect()
            }
        };
        // fixed column order keeps the f64 dot product bit-identical across
        // runs; hash-map iteration order must not reach the accumulator
        q_vector.sort_unstable_by_key(|&(col, _)| col);

        let mut hits: Vec<SearchHit> = self
            .doc_ids
            .iter()
            .enumerate()
            .map(|(row, doc_id)| {
                let score = q_vector
                    .iter()
                    .map(|&(col, q_w)| q_w * self.weights[row][col])
                    .sum();
                SearchHit {
                    doc_id: doc_id.clone(),
                    score,
                }
            })
            .collect();
        // stable sort over corpus-ordered rows keeps ties in first-seen order
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits
    }
}
