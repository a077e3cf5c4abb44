//! Keyboard highlighting state
//!
//! Tracks, per letter, the best classification seen on any board and any row.
//! A key never downgrades: once Correct it stays Correct.

use crate::core::Classification;
use rustc_hash::FxHashMap;

/// Letters accepted as input, in on-screen keyboard order
pub const KEYS: &str = "QWERTYUIOPASDFGHJKLZXCVBNM";

/// A key of the on-screen keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCap {
    Letter(char),
    Backspace,
    Enter,
}

impl KeyCap {
    /// Text shown on the key
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::Letter(letter) => letter.to_string(),
            Self::Backspace => "←".to_string(),
            Self::Enter => "ENTER".to_string(),
        }
    }
}

/// On-screen keyboard rows: the first 19 letters, backspace, the last 7, enter
#[must_use]
pub fn keyboard_rows() -> [Vec<KeyCap>; 3] {
    let letters: Vec<KeyCap> = KEYS.chars().map(KeyCap::Letter).collect();

    let top = letters[..10].to_vec();
    let mut middle = letters[10..19].to_vec();
    middle.push(KeyCap::Backspace);
    let mut bottom = letters[19..].to_vec();
    bottom.push(KeyCap::Enter);

    [top, middle, bottom]
}

/// Best-ever classification per letter
#[derive(Debug, Clone, Default)]
pub struct KeyStateTracker {
    states: FxHashMap<char, Classification>,
}

impl KeyStateTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a classification; kept only if it outranks the stored one
    ///
    /// Returns true when the stored state changed.
    pub fn record(&mut self, letter: char, classification: Classification) -> bool {
        let letter = letter.to_ascii_uppercase();
        let current = self.classification_of(letter);
        if classification > current {
            self.states.insert(letter, classification);
            true
        } else {
            false
        }
    }

    /// Stored classification, `Unset` for letters never evaluated
    #[must_use]
    pub fn classification_of(&self, letter: char) -> Classification {
        self.states
            .get(&letter.to_ascii_uppercase())
            .copied()
            .unwrap_or_default()
    }
}
