//! Word lists for the game
//!
//! Provides the bundled word list compiled into the binary, and helpers to turn
//! newline-separated text into words.

mod embedded;
pub mod loader;

pub use embedded::{EMBEDDED, EMBEDDED_COUNT};
