use ircore::{
    build_vocabulary, eval, expand_and_rerank, term_document_matrix, tfidf_matrix, Corpus,
    Document, InvertedIndex, QueryWeighting, RocchioParams, TokenizerConfig,
};
use std::collections::HashMap;

fn sample_corpus() -> Corpus {
    Corpus::new(vec![
        Document::new("D1", "Cats and Dogs", "Cats chase mice. Dogs chase cats!"),
        Document::new("D2", "About Mice", "Mice are small animals. A cat hunts mice."),
        Document::new("D3", "Birds", "Birds fly. Some dogs watch birds."),
    ])
}

#[test]
fn vocabulary_orders_terms_lexicographically() {
    let corpus = sample_corpus();
    let vocab = build_vocabulary(&corpus, &TokenizerConfig::default(), 1);
    let bird = vocab.term_id("bird").unwrap();
    let cat = vocab.term_id("cat").unwrap();
    let chase = vocab.term_id("chase").unwrap();
    assert!(bird < cat);
    assert!(cat < chase);
    // dense cover of [0, V)
    let mut ids: Vec<u32> = vocab.terms().iter().map(|t| vocab.term_id(t).unwrap()).collect();
    ids.sort_unstable();
    assert_eq!(ids, (0..vocab.len() as u32).collect::<Vec<_>>());
}

#[test]
fn index_positions_agree_with_count_matrix() {
    let corpus = sample_corpus();
    let config = TokenizerConfig::default();
    let index = InvertedIndex::from_corpus(&corpus, config.clone());
    let tdm = term_document_matrix(&corpus, &config);

    for (j, term) in tdm.terms.iter().enumerate() {
        let mut position_counts: HashMap<&str, usize> = HashMap::new();
        for posting in index.postings(term) {
            *position_counts.entry(posting.doc_id.as_str()).or_insert(0) +=
                posting.positions.len();
        }
        for (i, doc_id) in tdm.doc_ids.iter().enumerate() {
            let from_index = position_counts.get(doc_id.as_str()).copied().unwrap_or(0);
            assert_eq!(
                from_index as u64, tdm.counts[i][j],
                "count mismatch for term {term} in {doc_id}"
            );
        }
    }
}

#[test]
fn index_terms_match_matrix_terms() {
    let corpus = sample_corpus();
    let config = TokenizerConfig::default();
    let index = InvertedIndex::from_corpus(&corpus, config.clone());
    let tdm = term_document_matrix(&corpus, &config);
    let index_terms: Vec<String> = index.vocabulary().into_iter().map(String::from).collect();
    assert_eq!(index_terms, tdm.terms);
}

#[test]
fn tfidf_query_leaves_unmatched_document_at_zero() {
    let corpus = sample_corpus();
    let matrix = tfidf_matrix(&corpus, &TokenizerConfig::default());
    for weighting in [QueryWeighting::RawCounts, QueryWeighting::TfIdf] {
        let hits = matrix.score_query("cats mice", weighting);
        assert_eq!(hits.len(), 3);
        // neither "cat" nor "mouse" occurs in D3
        assert_eq!(hits[2].doc_id, "D3");
        assert_eq!(hits[2].score, 0.0);
        assert!(hits[0].score > 0.0);
        assert!(hits[1].score > 0.0);
    }
}

#[test]
fn tie_scores_keep_corpus_order() {
    let corpus = Corpus::new(vec![
        Document::new("A", "", "shared term"),
        Document::new("B", "", "shared term"),
    ]);
    let matrix = tfidf_matrix(&corpus, &TokenizerConfig::default());
    let hits = matrix.score_query("shared", QueryWeighting::RawCounts);
    assert_eq!(hits[0].doc_id, "A");
    assert_eq!(hits[1].doc_id, "B");
    assert_eq!(hits[0].score, hits[1].score);
}

#[test]
fn feedback_reranking_composes_with_evaluation() {
    let corpus = sample_corpus();
    let matrix = tfidf_matrix(&corpus, &TokenizerConfig::default());
    let initial = matrix.score_query("cats mice", QueryWeighting::RawCounts);

    let params = RocchioParams {
        relevant_k: 2,
        candidate_pool_k: 3,
        expand_terms: 5,
        ..RocchioParams::default()
    };
    let outcome =
        expand_and_rerank(&matrix, "cats mice", &initial, &params, QueryWeighting::RawCounts)
            .unwrap();
    assert_eq!(outcome.reranked.len(), 3);

    // judge D1 and D2 relevant, align by id, and evaluate the reranking
    let judged: HashMap<String, u32> =
        [("D1".to_string(), 1), ("D2".to_string(), 1)].into_iter().collect();
    let rels = eval::align_judgments(&outcome.reranked, &judged);
    assert_eq!(eval::precision_at_k(&rels, 2), 1.0);
    assert_eq!(eval::recall_at_k(&rels, 3, 2), 1.0);
    assert_eq!(eval::mrr(&[rels]), 1.0);
}

#[test]
fn empty_corpus_yields_empty_structures() {
    let corpus = Corpus::default();
    let config = TokenizerConfig::default();
    let tdm = term_document_matrix(&corpus, &config);
    assert!(tdm.terms.is_empty());
    assert!(tdm.counts.is_empty());
    let matrix = tfidf_matrix(&corpus, &config);
    assert!(matrix.score_query("anything", QueryWeighting::TfIdf).is_empty());
}
