//! Core domain types for the word game
//!
//! This module contains the fundamental domain types with no I/O.
//! All types here are pure, testable, and have clear mathematical properties.

mod evaluation;
mod word;

pub use evaluation::{Classification, Evaluation};
pub use word::{WORD_LENGTH, Word, WordError};
