// file: src/corpus/mod.rs
// description: Document store module exports
// reference: Internal module structure

pub mod chunker;
pub mod loader;
pub mod scanner;

pub use chunker::{TextChunk, TextChunker};
pub use loader::DocumentLoader;
pub use scanner::{FileScanner, ScannedFile};
