// file: src/search/keyword.rs
// description: case-insensitive line matching over the raw corpus files
// reference: deterministic lookup ahead of semantic retrieval

use crate::config::CorpusConfig;
use crate::corpus::FileScanner;
use crate::error::Result;
use crate::models::KeywordMatch;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Reads the corpus directory fresh on every search; nothing is cached.
#[derive(Debug, Clone)]
pub struct KeywordSearcher {
    scanner: FileScanner,
}

impl KeywordSearcher {
    pub fn new(config: CorpusConfig) -> Self {
        Self {
            scanner: FileScanner::new(config),
        }
    }

    pub fn root(&self) -> &Path {
        self.scanner.root()
    }

    /// Collects every line containing `query`, ignoring case, in file order
    /// then line order. Lines are trimmed; duplicates are kept.
    pub fn search(&self, query: &str) -> Result<KeywordMatch> {
        let needle = query.to_lowercase();
        let mut lines = Vec::new();

        for file in self.scanner.scan()? {
            let content = match fs::read_to_string(&file.path) {
                Ok(content) => content,
                Err(err) => {
                    warn!("Skipping unreadable file {}: {}", file.path.display(), err);
                    continue;
                }
            };

            if !content.to_lowercase().contains(&needle) {
                continue;
            }

            let before = lines.len();
            lines.extend(
                split_lines(&content)
                    .filter(|line| line.to_lowercase().contains(&needle))
                    .map(|line| line.trim().to_string()),
            );
            debug!(
                "Keyword match in {}: {} line(s)",
                file.relative_path,
                lines.len() - before
            );
        }

        Ok(KeywordMatch::from_lines(lines))
    }
}

fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\x0b' | '\x0c' | '\x1c'..='\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Splits on every Unicode line boundary, treating `\r\n` as one break.
/// A trailing break does not produce an empty final line.
fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    let mut rest = content;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.char_indices().find(|&(_, c)| is_line_break(c)) {
            Some((idx, c)) => {
                let line = &rest[..idx];
                let mut next = idx + c.len_utf8();
                if c == '\r' && rest[next..].starts_with('\n') {
                    next += 1;
                }
                rest = &rest[next..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn searcher(dir: &Path) -> KeywordSearcher {
        KeywordSearcher::new(CorpusConfig {
            directory: dir.to_path_buf(),
            extensions: vec!["txt".to_string()],
            max_file_size_mb: 10,
            recursive: false,
        })
    }

    #[test]
    fn test_single_line_match() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("notes.txt"),
            "The capital of France is Paris.\nBerlin is in Germany.\n",
        )
        .unwrap();

        let result = searcher(temp.path()).search("capital").unwrap();

        assert_eq!(
            result,
            KeywordMatch::Found(vec!["The capital of France is Paris.".to_string()])
        );
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("greeting.txt"), "hello world\n").unwrap();

        let result = searcher(temp.path()).search("Hello").unwrap();

        assert_eq!(result, KeywordMatch::Found(vec!["hello world".to_string()]));
    }

    #[test]
    fn test_matches_follow_file_then_line_order() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("b.txt"), "rust in b one\nnothing\nRUST in b two\n").unwrap();
        fs::write(temp.path().join("a.txt"), "  Rust in a  \n").unwrap();
        fs::write(temp.path().join("c.txt"), "no match here\n").unwrap();

        let result = searcher(temp.path()).search("rust").unwrap();

        assert_eq!(
            result,
            KeywordMatch::Found(vec![
                "Rust in a".to_string(),
                "rust in b one".to_string(),
                "RUST in b two".to_string(),
            ])
        );
    }

    #[test]
    fn test_duplicate_lines_are_kept() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("dup.txt"), "same line\nsame line\n").unwrap();

        let result = searcher(temp.path()).search("same").unwrap();

        assert_eq!(
            result,
            KeywordMatch::Found(vec!["same line".to_string(), "same line".to_string()])
        );
    }

    #[test]
    fn test_absent_query_is_not_found() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("notes.txt"), "The capital of France is Paris.").unwrap();

        let result = searcher(temp.path()).search("xyzzy-not-present").unwrap();

        assert_eq!(result, KeywordMatch::NotFound);
    }

    #[test]
    fn test_repeated_search_is_stable() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "alpha beta\ngamma\nbeta delta\n").unwrap();
        let searcher = searcher(temp.path());

        let first = searcher.search("beta").unwrap();
        let second = searcher.search("beta").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_reads_files_fresh_each_time() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "old text\n").unwrap();
        let searcher = searcher(temp.path());
        assert_eq!(searcher.search("new").unwrap(), KeywordMatch::NotFound);

        fs::write(temp.path().join("a.txt"), "new text\n").unwrap();
        assert!(searcher.search("new").unwrap().is_found());
    }

    #[test]
    fn test_split_lines_handles_every_line_break() {
        let lines: Vec<&str> = split_lines("a\r\nb\rc\nd\x0ce\u{2028}f\n\ng\n").collect();
        assert_eq!(lines, vec!["a", "b", "c", "d", "e", "f", "", "g"]);
        assert_eq!(split_lines("").count(), 0);
    }

    #[test]
    fn test_crlf_file_matches_single_line() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("dos.txt"), "alpha one\r\nbeta two\r\n").unwrap();

        let result = searcher(temp.path()).search("beta").unwrap();

        assert_eq!(result, KeywordMatch::Found(vec!["beta two".to_string()]));
    }

    #[test]
    fn test_carriage_return_file_matches_single_line() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("mac.txt"), "alpha one\rbeta two\r").unwrap();

        let result = searcher(temp.path()).search("beta").unwrap();

        assert_eq!(result, KeywordMatch::Found(vec!["beta two".to_string()]));
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let searcher = searcher(Path::new("/nonexistent/corpus"));
        assert!(matches!(
            searcher.search("anything"),
            Err(crate::error::ServiceError::FileOperation { .. })
        ));
    }
}
