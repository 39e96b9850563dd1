use crate::corpus::{Corpus, Document};
use crate::tokenizer::TokenizerConfig;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// One (document, positions) record in a term's postings list. Positions are
/// zero-based offsets into the document's tokenized text, strictly
/// increasing and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    pub doc_id: String,
    pub positions: Vec<usize>,
}

/// Positional inverted index: term -> postings in document-insertion order.
/// Postings are append-only; a second `add_document` call with the same id
/// appends an independent posting (id uniqueness is the caller's contract).
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct InvertedIndex {
    index: HashMap<String, Vec<Posting>>,
    config: TokenizerConfig,
}

impl InvertedIndex {
    pub fn new(config: TokenizerConfig) -> Self {
        Self {
            index: HashMap::new(),
            config,
        }
    }

    /// Build an index over a whole corpus in document order.
    pub fn from_corpus(corpus: &Corpus, config: TokenizerConfig) -> Self {
        let mut index = Self::new(config);
        index.build(corpus);
        index
    }

    /// Tokenize `doc` and append one posting per distinct token, carrying
    /// every position at which the token occurs.
    pub fn add_document(&mut self, doc: &Document) {
        let mut positions: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (pos, token) in doc.tokens(&self.config).into_iter().enumerate() {
            positions.entry(token).or_default().push(pos);
        }
        for (term, pos_list) in positions {
            self.index.entry(term).or_default().push(Posting {
                doc_id: doc.id.clone(),
                positions: pos_list,
            });
        }
    }

    pub fn build(&mut self, corpus: &Corpus) {
        for doc in corpus {
            self.add_document(doc);
        }
        tracing::info!(
            num_docs = corpus.len(),
            num_terms = self.index.len(),
            "built inverted index"
        );
    }

    /// Postings for a term; the empty slice for unknown terms, never an
    /// error.
    pub fn postings(&self, term: &str) -> &[Posting] {
        self.index.get(term).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All indexed terms, lexicographically sorted.
    pub fn vocabulary(&self) -> Vec<&str> {
        let mut terms: Vec<&str> = self.index.keys().map(String::as_str).collect();
        terms.sort_unstable();
        terms
    }

    pub fn num_terms(&self) -> usize {
        self.index.len()
    }
}
