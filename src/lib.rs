//! `ircore`: a self-contained text-retrieval core.
//!
//! Turns an in-memory document collection into a searchable structure and
//! ranks it against free-text queries: normalization/tokenization, a
//! positional inverted index, TF-IDF vector-space scoring, Rocchio
//! relevance-feedback expansion, and standard rank-quality metrics.
//!
//! The crate has no I/O surface of its own. Crawling, persistence and
//! query-frontend concerns live with the caller, which feeds documents and
//! relevance judgments in and gets ranked lists and metric scalars back.
//! Everything is immutable after construction, so built structures can be
//! shared across threads for concurrent queries.

pub mod corpus;
pub mod error;
pub mod eval;
pub mod feedback;
pub mod index;
pub mod sparse;
pub mod tokenizer;
pub mod vsm;

/// Dense vocabulary term id; id order equals lexicographic term order.
pub type TermId = u32;

pub use corpus::{bag_of_words, build_vocabulary, Corpus, Document, Vocabulary};
pub use error::Error;
pub use feedback::{expand_and_rerank, FeedbackOutcome, RocchioParams};
pub use index::{InvertedIndex, Posting};
pub use sparse::SparseVector;
pub use tokenizer::{tokenize, TokenizerConfig};
pub use vsm::{term_document_matrix, tfidf_matrix, QueryWeighting, SearchHit, TermDocumentMatrix, TfIdfMatrix};
