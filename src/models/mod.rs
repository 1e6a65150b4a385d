// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod answer;
pub mod document;
pub mod search_result;

pub use answer::{Answer, AnswerSource, KeywordMatch};
pub use document::Document;
pub use search_result::SearchResult;
