// file: src/models/answer.rs
// description: keyword stage outcome and the answer returned to callers
// reference: internal data structures

use serde::{Deserialize, Serialize};

/// Outcome of the keyword stage. `NotFound` is the only path into semantic search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeywordMatch {
    Found(Vec<String>),
    NotFound,
}

impl KeywordMatch {
    pub fn from_lines(lines: Vec<String>) -> Self {
        if lines.is_empty() {
            KeywordMatch::NotFound
        } else {
            KeywordMatch::Found(lines)
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, KeywordMatch::Found(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerSource {
    Keyword,
    Semantic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub text: String,
    pub source: AnswerSource,
}

impl Answer {
    /// Matching lines joined by newlines, then trimmed.
    pub fn from_keyword_lines(lines: &[String]) -> Self {
        Self {
            text: lines.join("\n").trim().to_string(),
            source: AnswerSource::Keyword,
        }
    }

    pub fn from_semantic(response: &str) -> Self {
        Self {
            text: response.trim().to_string(),
            source: AnswerSource::Semantic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keyword_match_from_lines() {
        assert_eq!(KeywordMatch::from_lines(vec![]), KeywordMatch::NotFound);

        let found = KeywordMatch::from_lines(vec!["hello world".to_string()]);
        assert!(found.is_found());
    }

    #[test]
    fn test_answer_from_keyword_lines() {
        let lines = vec!["first line".to_string(), "second line".to_string()];
        let answer = Answer::from_keyword_lines(&lines);

        assert_eq!(answer.text, "first line\nsecond line");
        assert_eq!(answer.source, AnswerSource::Keyword);
    }

    #[test]
    fn test_answer_from_semantic_is_trimmed() {
        let answer = Answer::from_semantic("\n  Paris.  \n");
        assert_eq!(answer.text, "Paris.");
        assert_eq!(answer.source, AnswerSource::Semantic);
    }

    #[test]
    fn test_answer_source_serializes_lowercase() {
        let json = serde_json::to_string(&AnswerSource::Semantic).unwrap();
        assert_eq!(json, "\"semantic\"");
    }
}
