// file: src/models/document.rs
// description: core document model loaded from the corpus directory
// reference: internal data structures

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A single text file. Immutable once loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub file_path: String,
    pub relative_path: String,
    pub content: String,
    pub content_hash: String,
    pub file_size: u64,
    pub last_modified: u64,
}

impl Document {
    pub fn new(
        file_path: String,
        relative_path: String,
        content: String,
        last_modified: u64,
    ) -> Self {
        let content_hash = Self::compute_hash(&content);
        let file_size = content.len() as u64;

        Self {
            file_path,
            relative_path,
            content,
            content_hash,
            file_size,
            last_modified,
        }
    }

    fn compute_hash(content: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}
