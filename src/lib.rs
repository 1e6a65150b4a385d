// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod corpus;
pub mod error;
pub mod models;
pub mod search;
pub mod semantic;
pub mod server;
pub mod service;
pub mod utils;

pub use config::{Config, CorpusConfig, ProviderConfig, ServerConfig};
pub use corpus::{DocumentLoader, FileScanner, ScannedFile, TextChunker};
pub use error::{Result, ServiceError};
pub use models::{Answer, AnswerSource, Document, KeywordMatch, SearchResult};
pub use search::KeywordSearcher;
pub use semantic::{EmbeddingProvider, LanguageModel, OllamaClient, SemanticIndex, VectorIndex};
pub use service::QueryService;
pub use utils::{HealthCheck, HealthReport, HealthStatus, OperationTimer, PromptTemplate, Validator};

use std::sync::Arc;

/// Loads the corpus and builds the index against Ollama. Any failure here
/// means the service must not start.
pub async fn build_service(config: &Config, show_progress: bool) -> Result<QueryService> {
    let documents = DocumentLoader::new(config.corpus.clone()).load()?;
    build_service_from_documents(config, &documents, show_progress).await
}

/// Builds the index from documents the caller has already loaded.
pub async fn build_service_from_documents(
    config: &Config,
    documents: &[Document],
    show_progress: bool,
) -> Result<QueryService> {
    let chunker = TextChunker::new(config.provider.chunk_size);
    let client = Arc::new(OllamaClient::new(&config.provider)?);

    let mut index = VectorIndex::build(
        documents,
        &chunker,
        client.clone(),
        client,
        config.provider.top_k,
        show_progress,
    )
    .await?;

    if let Some(template) = &config.provider.prompt_template {
        index = index.with_template(PromptTemplate::with_custom_template(template.clone()));
    }

    Ok(QueryService::ready(
        KeywordSearcher::new(config.corpus.clone()),
        Arc::new(index),
    ))
}
