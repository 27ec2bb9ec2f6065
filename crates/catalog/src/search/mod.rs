//! Relevance search over catalog records.
//!
//! A query is tokenized once, every candidate is scored across its weighted
//! fields, and the positive scores are ranked and capped.

pub mod fields;
pub mod ranker;
pub mod scorer;
pub mod service;
pub mod tokenizer;

pub use fields::{Field, Searchable};
pub use ranker::{rank, ScoredResult, DEFAULT_RESULT_LIMIT};
pub use scorer::{matched_terms, score, FieldWeights};
pub use service::{BookSearch, GameSearch};
pub use tokenizer::{tokenize, TermSet};
