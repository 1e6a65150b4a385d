// file: src/semantic/ollama.rs
// description: Ollama API integration for embeddings and text generation
// reference: https://github.com/ollama/ollama/blob/main/docs/api.md

use super::{EmbeddingProvider, LanguageModel};
use crate::config::ProviderConfig;
use crate::error::{Result, ServiceError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct OllamaEmbeddingRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct OllamaEmbeddingResponse {
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct OllamaErrorResponse {
    error: String,
}

/// One client serves both roles; the embedding and generation models may differ.
pub struct OllamaClient {
    client: Client,
    base_url: String,
    embed_model: String,
    llm_model: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.request_timeout_secs);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServiceError::Provider(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            embed_model: config.embed_model.clone(),
            llm_model: config.llm_model.clone(),
            timeout,
        })
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: for<'de> Deserialize<'de>,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    ServiceError::Provider(format!(
                        "Failed to connect to Ollama at {}. Is Ollama running?",
                        self.base_url
                    ))
                } else if e.is_timeout() {
                    ServiceError::Provider(format!(
                        "Ollama request timed out after {}s",
                        self.timeout.as_secs()
                    ))
                } else {
                    ServiceError::Provider(format!("Failed to send Ollama request: {}", e))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ServiceError::Provider(format!("Failed to read Ollama response: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<OllamaErrorResponse>(&text)
                .map(|e| e.error)
                .unwrap_or(text);
            return Err(ServiceError::Provider(format!(
                "Ollama request failed with status {}: {}",
                status, message
            )));
        }

        serde_json::from_str(&text)
            .map_err(|e| ServiceError::Provider(format!("Failed to parse Ollama response: {}", e)))
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        debug!("Requesting embedding from Ollama for {} chars", text.len());

        let request = OllamaEmbeddingRequest {
            model: &self.embed_model,
            prompt: text,
        };
        let response: OllamaEmbeddingResponse = self.post_json("/api/embeddings", &request).await?;

        if response.embedding.is_empty() {
            return Err(ServiceError::Provider(
                "No embedding data returned from Ollama".to_string(),
            ));
        }

        debug!("Received embedding of dimension {}", response.embedding.len());
        Ok(response.embedding)
    }

    fn model(&self) -> &str {
        &self.embed_model
    }
}

#[async_trait]
impl LanguageModel for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        debug!("Sending {} char prompt to {}", prompt.len(), self.llm_model);

        let request = OllamaGenerateRequest {
            model: &self.llm_model,
            prompt,
            stream: false,
        };
        let response: OllamaGenerateResponse = self.post_json("/api/generate", &request).await?;

        Ok(response.response)
    }

    fn model(&self) -> &str {
        &self.llm_model
    }
}
