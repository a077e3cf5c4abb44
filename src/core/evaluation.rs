//! Row evaluation against a target word
//!
//! Each guessed letter is classified as:
//! - Correct (right letter, right position)
//! - Present (letter in the target, wrong position)
//! - Absent (letter not in the target, or all its occurrences already credited)
//!
//! Duplicate letters are accounted for exactly: a target letter can credit at
//! most one guessed letter, and exact matches claim their letter first.

use super::word::{WORD_LENGTH, Word};
use std::fmt;

/// Classification of a single letter
///
/// Variants are declared in precedence order, so `Ord` ranks
/// `Unset < Absent < Present < Correct`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Classification {
    /// Not evaluated yet
    #[default]
    Unset,
    Absent,
    Present,
    Correct,
}

impl Classification {
    /// Emoji used in text output
    #[must_use]
    pub const fn emoji(self) -> char {
        match self {
            Self::Correct => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
            Self::Unset => '▫',
        }
    }
}

/// Per-letter result of evaluating one guess against one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Evaluation([Classification; WORD_LENGTH]);

impl Evaluation {
    /// All letters correct
    pub const PERFECT: Self = Self([Classification::Correct; WORD_LENGTH]);

    /// Evaluate `guess` against `target`
    ///
    /// # Algorithm
    /// 1. First pass: mark exact matches Correct and remove them from the pool of
    ///    remaining target letters
    /// 2. Second pass: each unmarked letter is Present if the pool still holds
    ///    that letter (consuming one), otherwise Absent
    ///
    /// # Examples
    /// ```
    /// use termox::core::{Classification::*, Evaluation, Word};
    ///
    /// let guess = Word::new("crazy").unwrap();
    /// let target = Word::new("crane").unwrap();
    /// let evaluation = Evaluation::calculate(&guess, &target);
    ///
    /// assert_eq!(
    ///     evaluation.classifications(),
    ///     &[Correct, Correct, Correct, Absent, Absent]
    /// );
    /// ```
    #[must_use]
    pub fn calculate(guess: &Word, target: &Word) -> Self {
        let mut result = [Classification::Absent; WORD_LENGTH];
        let mut remaining = target.char_counts();
        let guess_chars = guess.chars();
        let target_chars = target.chars();

        // First pass: exact position matches
        // Allow: index needed to read guess[i], target[i] and set result[i]
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            if guess_chars[i] == target_chars[i] {
                result[i] = Classification::Correct;
                if let Some(count) = remaining.get_mut(&guess_chars[i]) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: letters elsewhere in the target, while the pool lasts
        #[allow(clippy::needless_range_loop)]
        for i in 0..WORD_LENGTH {
            if result[i] == Classification::Correct {
                continue;
            }
            if let Some(count) = remaining.get_mut(&guess_chars[i])
                && *count > 0
            {
                result[i] = Classification::Present;
                *count -= 1;
            }
        }

        Self(result)
    }

    /// Classification of every position, left to right
    #[inline]
    #[must_use]
    pub const fn classifications(&self) -> &[Classification; WORD_LENGTH] {
        &self.0
    }

    /// Classification at a single position
    ///
    /// # Panics
    /// Panics if position >= 5
    #[inline]
    #[must_use]
    pub const fn at(&self, position: usize) -> Classification {
        self.0[position]
    }

    /// Check if every letter is correct
    #[inline]
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        *self == Self::PERFECT
    }

    /// Convert to an emoji string like "🟩🟨⬜🟩🟨"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|c| c.emoji()).collect()
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_emoji())
    }
}
