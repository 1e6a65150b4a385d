// file: src/semantic/index.rs
// description: in-memory vector index with retrieval-augmented answering
// reference: https://docs.llamaindex.ai/en/stable/module_guides/indexing/vector_store_index/

use super::{EmbeddingProvider, LanguageModel, SemanticIndex};
use crate::corpus::{TextChunk, TextChunker};
use crate::error::{Result, ServiceError};
use crate::models::{Document, SearchResult};
use crate::utils::{IndexProgress, OperationTimer, PromptTemplate};
use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info};

const EMBED_CONCURRENCY: usize = 4;

#[derive(Debug, Clone)]
struct IndexedChunk {
    chunk: TextChunk,
    embedding: Vec<f32>,
}

pub struct VectorIndex {
    chunks: Vec<IndexedChunk>,
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LanguageModel>,
    template: PromptTemplate,
    top_k: usize,
}

impl std::fmt::Debug for VectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorIndex")
            .field("chunks", &self.chunks.len())
            .field("embed_model", &self.embedder.model())
            .field("llm_model", &self.llm.model())
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl VectorIndex {
    /// Chunks and embeds every document. Fails if there is nothing to index
    /// or if any embedding request fails.
    pub async fn build(
        documents: &[Document],
        chunker: &TextChunker,
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LanguageModel>,
        top_k: usize,
        show_progress: bool,
    ) -> Result<Self> {
        let timer = OperationTimer::new("build vector index");

        let chunks: Vec<TextChunk> = documents
            .iter()
            .flat_map(|doc| chunker.chunk_document(doc))
            .collect();

        if chunks.is_empty() {
            return Err(ServiceError::Startup(
                "documents contain no indexable text".to_string(),
            ));
        }

        info!(
            "Embedding {} chunks from {} documents with {}",
            chunks.len(),
            documents.len(),
            embedder.model()
        );

        let progress = IndexProgress::new(chunks.len(), show_progress);

        let indexed: Vec<IndexedChunk> = stream::iter(chunks.into_iter().map(|chunk| {
            let embedder = Arc::clone(&embedder);
            let progress = &progress;
            async move {
                let embedding = embedder.embed(&chunk.text).await?;
                progress.inc_embedded(&chunk.source);
                Ok::<_, ServiceError>(IndexedChunk { chunk, embedding })
            }
        }))
        .buffered(EMBED_CONCURRENCY)
        .try_collect()
        .await?;

        progress.finish();
        let stats = progress.get_stats();
        debug!(
            "Embedded {}/{} chunks ({:.2} chunks/sec)",
            stats.chunks_embedded,
            stats.chunks_total,
            stats.chunks_per_second()
        );

        let dimension = indexed[0].embedding.len();
        if let Some(bad) = indexed.iter().find(|c| c.embedding.len() != dimension) {
            return Err(ServiceError::Provider(format!(
                "embedding dimension mismatch for {}: expected {}, got {}",
                bad.chunk.source,
                dimension,
                bad.embedding.len()
            )));
        }

        timer.finish_with_count(indexed.len());

        Ok(Self {
            chunks: indexed,
            embedder,
            llm,
            template: PromptTemplate::new(),
            top_k: top_k.max(1),
        })
    }

    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Returns the `top_k` chunks most similar to `question`, best first.
    pub async fn retrieve(&self, question: &str) -> Result<Vec<SearchResult>> {
        let query_embedding = self.embedder.embed(question).await?;

        let mut scored: Vec<(f32, &IndexedChunk)> = self
            .chunks
            .iter()
            .map(|c| (cosine_similarity(&query_embedding, &c.embedding), c))
            .collect();

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        Ok(scored
            .into_iter()
            .take(self.top_k)
            .map(|(score, c)| SearchResult::new(c.chunk.source.clone(), c.chunk.text.clone(), score))
            .collect())
    }
}

#[async_trait]
impl SemanticIndex for VectorIndex {
    async fn query(&self, question: &str) -> Result<String> {
        let results = self.retrieve(question).await?;

        for result in &results {
            debug!("Retrieved {}", result.format_summary(80));
        }

        let context = results
            .iter()
            .map(|r| r.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = self.template.render(&context, question);
        let response = self.llm.complete(&prompt).await?;

        Ok(response.trim().to_string())
    }

    fn chunk_count(&self) -> usize {
        self.chunks.len()
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a.sqrt() * norm_b.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const VOCABULARY: [&str; 3] = ["paris", "berlin", "rust"];

    /// Counts vocabulary words, so similarity follows shared topic words.
    struct VocabularyEmbedder;

    #[async_trait]
    impl EmbeddingProvider for VocabularyEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            let lower = text.to_lowercase();
            Ok(VOCABULARY
                .iter()
                .map(|word| lower.matches(word).count() as f32 + 0.01)
                .collect())
        }

        fn model(&self) -> &str {
            "vocabulary"
        }
    }

    struct FailingEmbedder;

    #[async_trait]
    impl EmbeddingProvider for FailingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Err(ServiceError::Provider("embedding backend down".to_string()))
        }

        fn model(&self) -> &str {
            "failing"
        }
    }

    #[derive(Default)]
    struct RecordingModel {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LanguageModel for RecordingModel {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok("  generated answer \n".to_string())
        }

        fn model(&self) -> &str {
            "recording"
        }
    }

    fn documents() -> Vec<Document> {
        vec![
            Document::new(
                "/d/france.txt".into(),
                "france.txt".into(),
                "Paris has the Louvre.".into(),
                0,
            ),
            Document::new(
                "/d/germany.txt".into(),
                "germany.txt".into(),
                "Berlin has the Reichstag.".into(),
                0,
            ),
            Document::new(
                "/d/code.txt".into(),
                "code.txt".into(),
                "Rust has a borrow checker.".into(),
                0,
            ),
        ]
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
    }

    #[tokio::test]
    async fn test_build_indexes_every_chunk() {
        let index = VectorIndex::build(
            &documents(),
            &TextChunker::new(1024),
            Arc::new(VocabularyEmbedder),
            Arc::new(RecordingModel::default()),
            2,
            false,
        )
        .await
        .unwrap();

        assert_eq!(index.chunk_count(), 3);
    }

    #[tokio::test]
    async fn test_retrieve_ranks_by_similarity() {
        let index = VectorIndex::build(
            &documents(),
            &TextChunker::new(1024),
            Arc::new(VocabularyEmbedder),
            Arc::new(RecordingModel::default()),
            1,
            false,
        )
        .await
        .unwrap();

        let results = index.retrieve("Tell me about berlin").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].relative_path, "germany.txt");
    }

    #[tokio::test]
    async fn test_query_renders_context_and_trims_response() {
        let llm = Arc::new(RecordingModel::default());
        let index = VectorIndex::build(
            &documents(),
            &TextChunker::new(1024),
            Arc::new(VocabularyEmbedder),
            llm.clone(),
            1,
            false,
        )
        .await
        .unwrap();

        let answer = index.query("What about paris?").await.unwrap();

        assert_eq!(answer, "generated answer");
        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Paris has the Louvre."));
        assert!(prompts[0].contains("What about paris?"));
        assert!(!prompts[0].contains("Reichstag"));
    }

    #[tokio::test]
    async fn test_query_uses_custom_template() {
        let llm = Arc::new(RecordingModel::default());
        let index = VectorIndex::build(
            &documents(),
            &TextChunker::new(1024),
            Arc::new(VocabularyEmbedder),
            llm.clone(),
            1,
            false,
        )
        .await
        .unwrap()
        .with_template(PromptTemplate::with_custom_template(
            "Q={query_str} C={context_str}".to_string(),
        ));

        index.query("rust").await.unwrap();

        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts[0], "Q=rust C=Rust has a borrow checker.");
    }

    #[tokio::test]
    async fn test_build_fails_without_text() {
        let blank = vec![Document::new("/d/e.txt".into(), "e.txt".into(), "  \n".into(), 0)];
        let result = VectorIndex::build(
            &blank,
            &TextChunker::new(1024),
            Arc::new(VocabularyEmbedder),
            Arc::new(RecordingModel::default()),
            2,
            false,
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Startup(_))));
    }

    #[tokio::test]
    async fn test_build_propagates_embedding_failure() {
        let result = VectorIndex::build(
            &documents(),
            &TextChunker::new(1024),
            Arc::new(FailingEmbedder),
            Arc::new(RecordingModel::default()),
            2,
            false,
        )
        .await;

        assert!(matches!(result, Err(ServiceError::Provider(_))));
    }
}
