// file: src/corpus/loader.rs
// description: Loads every scanned text file into memory as a Document
// reference: https://docs.rs/walkdir

use super::scanner::FileScanner;
use crate::config::CorpusConfig;
use crate::error::{Result, ServiceError};
use crate::models::Document;
use crate::utils::OperationTimer;
use std::fs;
use tracing::{debug, info, warn};

pub struct DocumentLoader {
    scanner: FileScanner,
}

impl DocumentLoader {
    pub fn new(config: CorpusConfig) -> Self {
        Self {
            scanner: FileScanner::new(config),
        }
    }

    /// Any failure here is a startup failure: the caller must not serve
    /// requests without documents.
    pub fn load(&self) -> Result<Vec<Document>> {
        let timer = OperationTimer::new("load documents");
        let root = self.scanner.root().to_path_buf();

        let files = self.scanner.scan().map_err(|e| {
            ServiceError::Startup(format!(
                "cannot read document directory {}: {}",
                root.display(),
                e
            ))
        })?;

        let mut documents = Vec::with_capacity(files.len());

        for file in files {
            match fs::read_to_string(&file.path) {
                Ok(content) => {
                    let document = Document::new(
                        file.path.display().to_string(),
                        file.relative_path,
                        content,
                        file.modified,
                    );
                    if document.is_blank() {
                        debug!("{} has no text", document.relative_path);
                    } else {
                        debug!("Loaded {} ({} bytes)", document.relative_path, file.size);
                    }
                    documents.push(document);
                }
                Err(err) => {
                    warn!("Skipping unreadable file {}: {}", file.path.display(), err);
                }
            }
        }

        if documents.is_empty() {
            return Err(ServiceError::Startup(format!(
                "no readable documents found in {}",
                root.display()
            )));
        }

        timer.finish_with_count(documents.len());
        info!("Loaded {} documents from {}", documents.len(), root.display());
        Ok(documents)
    }
}
