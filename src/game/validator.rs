//! Accepted-word set
//!
//! Guesses are only accepted when they appear in the word list served by the
//! backend. The set is built once and shared read-only across a session.

use rustc_hash::FxHashSet;

/// Set of accepted words, stored uppercase
#[derive(Debug, Clone, Default)]
pub struct WordValidator {
    words: FxHashSet<String>,
}

impl WordValidator {
    /// An empty validator rejects every guess
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a validator from newline-separated text
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut validator = Self::new();
        validator.load(text);
        validator
    }

    /// Replace the set with the entries in `text`
    ///
    /// Entries are trimmed and uppercased; blank lines are dropped and
    /// duplicates collapse.
    pub fn load(&mut self, text: &str) {
        self.words = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_uppercase)
            .collect();
    }

    /// Case-insensitive membership test; blank input is never valid
    #[must_use]
    pub fn is_valid(&self, word: &str) -> bool {
        let word = word.trim();
        if word.is_empty() {
            return false;
        }
        self.words.contains(&word.to_uppercase())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_trims_uppercases_and_dedupes() {
        let validator = WordValidator::from_text(" crane\nCRANE\nslate \n\n");
        assert_eq!(validator.len(), 2);
        assert!(validator.is_valid("CRANE"));
        assert!(validator.is_valid("slate"));
    }

    #[test]
    fn is_valid_ignores_case() {
        let validator = WordValidator::from_text("Crane\n");
        for word in ["crane", "CRANE", "cRaNe"] {
            assert_eq!(validator.is_valid(word), validator.is_valid(&word.to_uppercase()));
            assert_eq!(validator.is_valid(word), validator.is_valid(&word.to_lowercase()));
            assert!(validator.is_valid(word));
        }
        assert!(!validator.is_valid("slate"));
    }

    #[test]
    fn blank_input_fails_closed() {
        let validator = WordValidator::from_text("crane\n\n");
        assert!(!validator.is_valid(""));
        assert!(!validator.is_valid("   "));
    }

    #[test]
    fn empty_validator_rejects_everything() {
        let validator = WordValidator::new();
        assert!(validator.is_empty());
        assert!(!validator.is_valid("CRANE"));
    }

    #[test]
    fn load_replaces_previous_words() {
        let mut validator = WordValidator::from_text("crane");
        validator.load("slate");
        assert!(!validator.is_valid("crane"));
        assert!(validator.is_valid("slate"));
    }
}
