//! In-memory word source

use super::{SourceError, WordSource};
use crate::core::Word;
use crate::wordlists::EMBEDDED;
use crate::wordlists::loader::{load_from_file, words_from_slice};
use rand::seq::IndexedRandom;
use std::path::Path;

/// Serves targets and the word list from memory
#[derive(Debug, Clone)]
pub struct LocalWordSource {
    words: Vec<Word>,
}

impl LocalWordSource {
    #[must_use]
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    /// The word list bundled into the binary
    #[must_use]
    pub fn embedded() -> Self {
        Self::new(words_from_slice(EMBEDDED))
    }

    /// Words from a file, one per line
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        Ok(Self::new(load_from_file(path)?))
    }

    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }
}

impl WordSource for LocalWordSource {
    async fn fetch_target_word(&self) -> Result<String, SourceError> {
        self.words
            .choose(&mut rand::rng())
            .map(|word| word.text().to_string())
            .ok_or(SourceError::Empty)
    }

    async fn fetch_word_list(&self) -> Result<String, SourceError> {
        let mut text = String::with_capacity(self.words.len() * 6);
        for word in &self.words {
            text.push_str(word.text());
            text.push('\n');
        }
        Ok(text)
    }
}
