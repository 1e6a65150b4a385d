// file: src/service.rs
// description: two-stage question answering: keyword lines first, semantic fallback second
// reference: application service layer

use crate::error::{Result, ServiceError};
use crate::models::{Answer, KeywordMatch};
use crate::search::KeywordSearcher;
use crate::semantic::SemanticIndex;
use crate::utils::{OperationTimer, Validator};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const SLOW_SEMANTIC_QUERY: Duration = Duration::from_secs(10);

/// Owns the index handle for the life of the process. Cheap to clone and
/// share between request handlers.
#[derive(Clone)]
pub struct QueryService {
    searcher: KeywordSearcher,
    index: Option<Arc<dyn SemanticIndex>>,
}

impl QueryService {
    pub fn ready(searcher: KeywordSearcher, index: Arc<dyn SemanticIndex>) -> Self {
        Self {
            searcher,
            index: Some(index),
        }
    }

    /// A service without an index answers every question with `NotReady`.
    pub fn not_ready(searcher: KeywordSearcher) -> Self {
        Self {
            searcher,
            index: None,
        }
    }

    pub fn index(&self) -> Option<&Arc<dyn SemanticIndex>> {
        self.index.as_ref()
    }

    pub fn corpus_root(&self) -> &Path {
        self.searcher.root()
    }

    pub async fn answer(&self, question: &str) -> Result<Answer> {
        let index = self.index.as_ref().ok_or(ServiceError::NotReady)?;
        Validator::validate_question(question)?;

        info!("Question: {}", Validator::truncate_text(question, 80));

        match self.keyword_stage(question).await? {
            KeywordMatch::Found(lines) => {
                info!("Answered from {} keyword line(s)", lines.len());
                Ok(Answer::from_keyword_lines(&lines))
            }
            KeywordMatch::NotFound => {
                debug!("No keyword match, falling back to semantic search");
                let timer = OperationTimer::new("semantic query");
                let response = index.query(question).await?;
                timer.warn_if_slow(SLOW_SEMANTIC_QUERY, "semantic fallback");
                timer.finish();
                Ok(Answer::from_semantic(&response))
            }
        }
    }

    async fn keyword_stage(&self, question: &str) -> Result<KeywordMatch> {
        let searcher = self.searcher.clone();
        let question = question.to_string();

        tokio::task::spawn_blocking(move || searcher.search(&question))
            .await
            .map_err(|e| ServiceError::Io(std::io::Error::other(e.to_string())))?
    }
}
