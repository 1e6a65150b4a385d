// file: src/models/search_result.rs
// description: Retrieved chunk model with similarity scores
// reference: Used for vector similarity search results

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Relative path of the document the chunk came from
    pub relative_path: String,

    /// Chunk text
    pub content: String,

    /// Cosine similarity (higher is more similar, -1.0 to 1.0)
    pub score: f32,
}

impl SearchResult {
    pub fn new(relative_path: String, content: String, score: f32) -> Self {
        Self {
            relative_path,
            content,
            score,
        }
    }

    /// Format as a summary string for display
    pub fn format_summary(&self, max_content_chars: usize) -> String {
        let content_preview = crate::utils::Validator::truncate_text(&self.content, max_content_chars);

        format!(
            "Score: {:.4} | {}\n{}\n",
            self.score, self.relative_path, content_preview
        )
    }
}
