// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, ServiceError};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub corpus: CorpusConfig,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    pub directory: PathBuf,
    pub extensions: Vec<String>,
    pub max_file_size_mb: usize,
    #[serde(default)]
    pub recursive: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderConfig {
    pub base_url: String,
    pub embed_model: String,
    pub llm_model: String,
    pub top_k: usize,
    pub chunk_size: usize,
    pub request_timeout_secs: u64,
    /// Overrides the built-in QA prompt; must contain `{query_str}`.
    #[serde(default)]
    pub prompt_template: Option<String>,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("ASK_DOCS")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("corpus.extensions"),
        );

        let settings = builder
            .build()
            .map_err(|e| ServiceError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ServiceError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            corpus: CorpusConfig {
                directory: PathBuf::from("data"),
                extensions: vec!["txt".to_string()],
                max_file_size_mb: 10,
                recursive: false,
            },
            provider: ProviderConfig {
                base_url: "http://localhost:11434".to_string(),
                embed_model: "tinyllama".to_string(),
                llm_model: "tinyllama".to_string(),
                top_k: 2,
                chunk_size: 1024,
                request_timeout_secs: 120,
                prompt_template: None,
            },
        }
    }

    pub fn validate(&self) -> Result<()> {
        Validator::validate_port(self.server.port)
            .map_err(|e| ServiceError::Config(e.to_string()))?;

        if self.corpus.extensions.is_empty() {
            return Err(ServiceError::Config(
                "corpus.extensions must list at least one extension".to_string(),
            ));
        }

        if self.provider.top_k == 0 {
            return Err(ServiceError::Config(
                "top_k must be greater than 0".to_string(),
            ));
        }

        if self.provider.chunk_size == 0 {
            return Err(ServiceError::Config(
                "chunk_size must be greater than 0".to_string(),
            ));
        }

        if let Some(template) = &self.provider.prompt_template
            && !template.contains("{query_str}")
        {
            return Err(ServiceError::Config(
                "prompt_template must contain {query_str}".to_string(),
            ));
        }

        Validator::validate_url(&self.provider.base_url)
            .map_err(|e| ServiceError::Config(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.bind_address(), "127.0.0.1:5000");
        assert_eq!(config.corpus.extensions, vec!["txt".to_string()]);
    }

    #[test]
    fn test_validate_rejects_zero_top_k() {
        let mut config = Config::default_config();
        config.provider.top_k = 0;
        assert!(matches!(config.validate(), Err(ServiceError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_provider_url() {
        let mut config = Config::default_config();
        config.provider.base_url = "localhost:11434".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_prompt_template_needs_query() {
        let mut config = Config::default_config();
        config.provider.prompt_template = Some("Context: {context_str}".to_string());
        assert!(config.validate().is_err());

        config.provider.prompt_template = Some("{context_str}\nQ: {query_str}".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_extensions() {
        let mut config = Config::default_config();
        config.corpus.extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(
            &path,
            r#"
[server]
host = "0.0.0.0"
port = 8088

[corpus]
directory = "notes"
extensions = ["txt", "md"]
max_file_size_mb = 5

[provider]
base_url = "http://ollama:11434"
embed_model = "nomic-embed-text"
llm_model = "llama3"
top_k = 3
chunk_size = 512
request_timeout_secs = 30
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.corpus.directory, PathBuf::from("notes"));
        assert_eq!(config.corpus.extensions.len(), 2);
        assert!(!config.corpus.recursive);
        assert_eq!(config.provider.embed_model, "nomic-embed-text");
        assert_eq!(config.provider.top_k, 3);
        assert!(config.provider.prompt_template.is_none());
    }
}
