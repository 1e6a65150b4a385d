// file: src/search/mod.rs
// description: keyword search module exports
// reference: internal module structure

pub mod keyword;

pub use keyword::KeywordSearcher;
