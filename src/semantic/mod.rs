// file: src/semantic/mod.rs
// description: semantic search provider traits and module exports
// reference: internal module structure

pub mod index;
pub mod ollama;

pub use index::VectorIndex;
pub use ollama::OllamaClient;

use crate::error::Result;
use async_trait::async_trait;

/// Turns text into dense vectors.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    fn model(&self) -> &str;
}

/// Generates a completion for a fully rendered prompt.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;

    fn model(&self) -> &str;
}

/// Opaque handle over an indexed corpus. Read-only once built.
#[async_trait]
pub trait SemanticIndex: Send + Sync {
    async fn query(&self, question: &str) -> Result<String>;

    fn chunk_count(&self) -> usize;
}
