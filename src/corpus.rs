//! The fixed-order word corpus.
//!
//! A word's position in the corpus is its identity everywhere else: the
//! feedback matrix and every candidate set address words by position.

use crate::error::{Result, SolverError};
use crate::feedback::PatternCodec;
use std::collections::HashMap;
use std::path::Path;

/// Checks that `word` is `word_length` lowercase ascii letters and returns its bytes.
pub fn check_word(word: &str, word_length: usize) -> Result<&[u8]> {
    let bytes = word.as_bytes();
    if !bytes.iter().all(u8::is_ascii_lowercase) {
        return Err(SolverError::InvalidWord(word.to_string()));
    }
    if bytes.len() != word_length {
        return Err(SolverError::InvalidLength {
            expected: word_length,
            actual: bytes.len(),
        });
    }
    Ok(bytes)
}

/// An ordered list of equal-length lowercase words.
#[derive(Debug, Clone)]
pub struct Corpus {
    words: Vec<String>,
    index: HashMap<String, usize>,
    codec: PatternCodec,
}

impl Corpus {
    /// Build a corpus from words that must already be clean. Order is kept as given.
    pub fn new(words: Vec<String>, word_length: usize) -> Result<Self> {
        let codec = PatternCodec::new(word_length)?;
        if words.is_empty() {
            return Err(SolverError::EmptyCorpus);
        }

        let mut index = HashMap::with_capacity(words.len());
        for (position, word) in words.iter().enumerate() {
            if !word.bytes().all(|b| b.is_ascii_lowercase()) {
                return Err(SolverError::InvalidWord(word.clone()));
            }
            if word.len() != word_length {
                return Err(SolverError::InconsistentWordLength {
                    word: word.clone(),
                    expected: word_length,
                    actual: word.len(),
                });
            }
            index.entry(word.clone()).or_insert(position);
        }

        Ok(Self {
            words,
            index,
            codec,
        })
    }

    /// Build a corpus from a word list, one word per line.
    ///
    /// Lines are trimmed and lowercased; words of another length, words with
    /// non-letters and repeats are dropped, keeping first occurrences in order.
    pub fn from_text(text: &str, word_length: usize) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        let words: Vec<String> = text
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|w| w.len() == word_length && w.bytes().all(|b| b.is_ascii_lowercase()))
            .filter(|w| seen.insert(w.clone()))
            .collect();
        log::info!("loaded {} words of length {}", words.len(), word_length);
        Self::new(words, word_length)
    }

    pub fn from_path(path: impl AsRef<Path>, word_length: usize) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::debug!("read word list from {}", path.display());
        Self::from_text(&text, word_length)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word_length(&self) -> usize {
        self.codec.word_length()
    }

    pub fn codec(&self) -> &PatternCodec {
        &self.codec
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn word(&self, position: usize) -> Result<&str> {
        self.words
            .get(position)
            .map(String::as_str)
            .ok_or(SolverError::PositionOutOfRange {
                position,
                len: self.words.len(),
            })
    }

    /// The fixed corpus position of `word`, if it is in the corpus.
    pub fn position(&self, word: &str) -> Option<usize> {
        self.index.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }
}
