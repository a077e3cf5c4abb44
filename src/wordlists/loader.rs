//! Word list loading utilities
//!
//! Word lists are plain text, one word per line. Blank lines and entries that
//! are not five ASCII letters are skipped.

use crate::core::Word;
use std::fs;
use std::io;
use std::path::Path;

/// Parse newline-separated text into words, skipping invalid entries
///
/// # Examples
/// ```
/// use termox::wordlists::loader::words_from_text;
///
/// let words = words_from_text("crane\n\nslate\nnope\n");
/// assert_eq!(words.len(), 2);
/// assert_eq!(words[0].text(), "CRANE");
/// ```
#[must_use]
pub fn words_from_text(text: &str) -> Vec<Word> {
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                None
            } else {
                Word::new(trimmed).ok()
            }
        })
        .collect()
}

/// Load words from a file
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read or opened.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let content = fs::read_to_string(path)?;
    Ok(words_from_text(&content))
}

/// Convert embedded string slice to Word vector
///
/// # Examples
/// ```
/// use termox::wordlists::loader::words_from_slice;
/// use termox::wordlists::EMBEDDED;
///
/// let words = words_from_slice(EMBEDDED);
/// assert_eq!(words.len(), EMBEDDED.len());
/// ```
#[must_use]
pub fn words_from_slice(slice: &[&str]) -> Vec<Word> {
    slice.iter().filter_map(|&s| Word::new(s).ok()).collect()
}
