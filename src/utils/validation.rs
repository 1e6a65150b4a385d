// file: src/utils/validation.rs
// description: input validation for corpus paths, questions and settings
// reference: input validation patterns

use crate::error::{Result, ServiceError};
use std::path::Path;

pub struct Validator;

impl Validator {
    pub fn validate_directory(path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(ServiceError::Validation(format!(
                "Directory does not exist: {}",
                path.display()
            )));
        }

        if !path.is_dir() {
            return Err(ServiceError::Validation(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Only an empty question is rejected; whitespace is a valid search term.
    pub fn validate_question(question: &str) -> Result<()> {
        if question.is_empty() {
            return Err(ServiceError::InvalidInput(
                "No question provided".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ServiceError::Validation(format!(
                "Invalid URL format: {}",
                url
            )));
        }
        Ok(())
    }

    pub fn validate_port(port: u16) -> Result<()> {
        if port == 0 {
            return Err(ServiceError::Validation("Port cannot be 0".to_string()));
        }
        Ok(())
    }

    pub fn has_allowed_extension(path: &Path, extensions: &[String]) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                extensions
                    .iter()
                    .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    pub fn truncate_text(text: &str, max_chars: usize) -> String {
        match text.char_indices().nth(max_chars) {
            Some((idx, _)) => format!("{}...", &text[..idx]),
            None => text.to_string(),
        }
    }
}
