// file: src/corpus/chunker.rs
// description: splits documents into bounded chunks for embedding
// reference: https://docs.rs/regex

use crate::models::Document;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PARAGRAPH_BREAK: Regex =
        Regex::new(r"\n\s*\n").expect("PARAGRAPH_BREAK regex is valid");

    // A run of non-terminators followed by its terminators, or the trailing remainder.
    static ref SENTENCE: Regex =
        Regex::new(r"[^.!?]+(?:[.!?]+|$)").expect("SENTENCE regex is valid");
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextChunk {
    pub source: String,
    pub text: String,
}

/// Packs sentences into chunks of at most `chunk_size` characters. Paragraph
/// breaks are kept when the next paragraph still fits in the current chunk.
#[derive(Debug, Clone)]
pub struct TextChunker {
    chunk_size: usize,
}

impl TextChunker {
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn chunk_document(&self, document: &Document) -> Vec<TextChunk> {
        self.chunk_text(&document.content)
            .into_iter()
            .map(|text| TextChunk {
                source: document.relative_path.clone(),
                text,
            })
            .collect()
    }

    pub fn chunk_text(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        let mut current = String::new();

        for paragraph in PARAGRAPH_BREAK.split(text) {
            let mut paragraph_start = true;

            for sentence in SENTENCE.find_iter(paragraph) {
                let sentence = sentence.as_str().trim();
                if sentence.is_empty() {
                    continue;
                }

                for piece in self.split_oversized(sentence) {
                    let separator = if current.is_empty() {
                        ""
                    } else if paragraph_start {
                        "\n\n"
                    } else {
                        " "
                    };

                    let projected = char_len(&current) + separator.len() + char_len(piece);
                    if !current.is_empty() && projected > self.chunk_size {
                        chunks.push(std::mem::take(&mut current));
                        current.push_str(piece);
                    } else {
                        current.push_str(separator);
                        current.push_str(piece);
                    }
                    paragraph_start = false;
                }
            }
        }

        if !current.trim().is_empty() {
            chunks.push(current);
        }

        chunks
    }

    fn split_oversized<'a>(&self, sentence: &'a str) -> Vec<&'a str> {
        if char_len(sentence) <= self.chunk_size {
            return vec![sentence];
        }

        let mut pieces = Vec::new();
        let mut start = 0;
        let mut count = 0;

        for (idx, _) in sentence.char_indices() {
            if count == self.chunk_size {
                pieces.push(&sentence[start..idx]);
                start = idx;
                count = 0;
            }
            count += 1;
        }

        if start < sentence.len() {
            pieces.push(&sentence[start..]);
        }

        pieces
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}
