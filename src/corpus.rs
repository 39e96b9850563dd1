use crate::tokenizer::{tokenize, TokenizerConfig};
use crate::TermId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A caller-owned document. Immutable once created; the core only derives
/// token sequences from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub title: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn tokens(&self, config: &TokenizerConfig) -> Vec<String> {
        tokenize(&self.text, config)
    }
}

/// An ordered snapshot of documents. First-seen order is the tie-break order
/// for everything downstream (postings lists, ranked-list ties). Document id
/// uniqueness is the caller's responsibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    pub fn new(documents: Vec<Document>) -> Self {
        Self { documents }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a Document;
    type IntoIter = std::slice::Iter<'a, Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.documents.iter()
    }
}

/// Bijective term ↔ id mapping for one built collection. Ids are dense in
/// `[0, V)` and id order equals lexicographic term order. Rebuilding yields a
/// fresh vocabulary with no id compatibility guarantee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: Vec<String>,
    ids: HashMap<String, TermId>,
}

impl Vocabulary {
    pub fn term_id(&self, term: &str) -> Option<TermId> {
        self.ids.get(term).copied()
    }

    pub fn term(&self, id: TermId) -> Option<&str> {
        self.terms.get(id as usize).map(String::as_str)
    }

    /// All terms in id (= lexicographic) order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Build the controlled vocabulary for a corpus: accumulate collection-wide
/// token frequency, keep terms with total frequency >= `min_frequency`, and
/// assign dense ids in ascending lexicographic order. Bit-identical across
/// runs for the same inputs.
pub fn build_vocabulary(
    corpus: &Corpus,
    config: &TokenizerConfig,
    min_frequency: u64,
) -> Vocabulary {
    let mut frequency: BTreeMap<String, u64> = BTreeMap::new();
    for doc in corpus {
        for token in doc.tokens(config) {
            *frequency.entry(token).or_insert(0) += 1;
        }
    }
    let mut terms = Vec::new();
    let mut ids = HashMap::new();
    for (term, freq) in frequency {
        if freq >= min_frequency {
            ids.insert(term.clone(), terms.len() as TermId);
            terms.push(term);
        }
    }
    tracing::debug!(num_terms = terms.len(), min_frequency, "built vocabulary");
    Vocabulary { terms, ids }
}

/// Bag-of-words counts for one document over an already-built vocabulary.
/// Tokens outside the vocabulary are ignored.
pub fn bag_of_words(
    doc: &Document,
    vocabulary: &Vocabulary,
    config: &TokenizerConfig,
) -> HashMap<TermId, u64> {
    let mut bow = HashMap::new();
    for token in doc.tokens(config) {
        if let Some(id) = vocabulary.term_id(&token) {
            *bow.entry(id).or_insert(0) += 1;
        }
    }
    bow
}
