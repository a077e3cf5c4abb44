//! Termox
//!
//! A Wordle-style word game: guess a hidden five-letter word in a limited
//! number of rows, on one board or on up to four boards at once, plus the
//! small HTTP word server the game fetches its words from.
//!
//! # Quick Start
//!
//! ```rust
//! use termox::core::{Classification, Evaluation, Word};
//!
//! let guess = Word::new("crazy").unwrap();
//! let target = Word::new("crane").unwrap();
//!
//! let evaluation = Evaluation::calculate(&guess, &target);
//! assert_eq!(evaluation.at(0), Classification::Correct);
//! assert_eq!(evaluation.to_emoji(), "🟩🟩🟩⬜⬜");
//! ```

// Core domain types
pub mod core;

// Game state machine
pub mod game;

// Word providers
pub mod source;

// Word lists
pub mod wordlists;

// Word server
pub mod server;

// Command-line configuration
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
