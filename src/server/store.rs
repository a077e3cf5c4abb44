//! Word list file and its in-memory copy
//!
//! The file is the only persisted state: one word per line with a trailing
//! newline. `GET /word` draws from memory. Mutations are serialized behind
//! one lock, rewrite the whole file through a sibling temp file and rename,
//! and only then replace the in-memory copy.

use rand::Rng;
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::info;

/// Length of an acceptable word
const WORD_LEN: usize = crate::core::WORD_LENGTH;

/// Result of `add`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Words appended, uppercased
    Added(Vec<String>),
    /// Body was blank
    EmptyBody,
    /// No five-letter alphabetic token in the body
    NoValidWords,
    /// Every valid token is already listed
    AllDuplicates,
}

/// Result of `remove`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Number of file entries removed (zero when the word was not listed)
    Removed(usize),
    /// The word is not purely alphabetic
    InvalidWord,
}

/// The served word list
#[derive(Debug)]
pub struct WordStore {
    path: PathBuf,
    scratch: PathBuf,
    words: RwLock<Vec<String>>,
}

fn is_candidate(token: &str) -> bool {
    token.len() == WORD_LEN && token.bytes().all(|b| b.is_ascii_alphabetic())
}

fn parse_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// `dir/.name.tmp` next to `path`, so the rename stays on one filesystem
fn scratch_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    name.push(path.file_name().unwrap_or(OsStr::new("wordlist")));
    name.push(".tmp");
    path.with_file_name(name)
}

impl WordStore {
    /// Load the word list file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn open(path: impl Into<PathBuf>) -> io::Result<Self> {
        let path = path.into();
        let text = tokio::fs::read_to_string(&path).await?;
        let words = parse_lines(&text);
        info!(path = %path.display(), words = words.len(), "word list loaded");

        Ok(Self {
            scratch: scratch_path(&path),
            path,
            words: RwLock::new(words),
        })
    }

    /// Uniformly random word from memory
    ///
    /// Uses the thread-local generator, a CSPRNG seeded from the OS.
    pub async fn random_word(&self) -> Option<String> {
        let words = self.words.read().await;
        if words.is_empty() {
            return None;
        }
        let index = rand::rng().random_range(0..words.len());
        Some(words[index].clone())
    }

    /// Current file contents, read from disk
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub async fn read_file(&self) -> io::Result<String> {
        tokio::fs::read_to_string(&self.path).await
    }

    /// Append the new five-letter words found in `body`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or replaced. The in-memory
    /// list is left untouched in that case.
    pub async fn add(&self, body: &str) -> io::Result<AddOutcome> {
        if body.trim().is_empty() {
            return Ok(AddOutcome::EmptyBody);
        }

        let mut candidates: Vec<String> = Vec::new();
        for token in body.lines().map(str::trim).filter(|t| is_candidate(t)) {
            let token = token.to_ascii_uppercase();
            if !candidates.contains(&token) {
                candidates.push(token);
            }
        }
        if candidates.is_empty() {
            return Ok(AddOutcome::NoValidWords);
        }

        let mut words = self.words.write().await;
        let mut text = match self.read_file().await {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err),
        };
        let listed = parse_lines(&text);
        candidates.retain(|candidate| !listed.iter().any(|w| w.eq_ignore_ascii_case(candidate)));
        if candidates.is_empty() {
            return Ok(AddOutcome::AllDuplicates);
        }

        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        for word in &candidates {
            text.push_str(word);
            text.push('\n');
        }
        self.replace_file(&text).await?;

        *words = parse_lines(&text);
        info!(added = candidates.len(), total = words.len(), "words added");
        Ok(AddOutcome::Added(candidates))
    }

    /// Remove every entry equal to `word`, ignoring case
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or replaced. The in-memory
    /// list is left untouched in that case.
    pub async fn remove(&self, word: &str) -> io::Result<RemoveOutcome> {
        let word = word.trim();
        if word.is_empty() || !word.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Ok(RemoveOutcome::InvalidWord);
        }

        let mut words = self.words.write().await;
        let text = self.read_file().await?;
        let mut kept = String::with_capacity(text.len());
        let mut removed = 0;
        for line in text.lines() {
            if line.trim().eq_ignore_ascii_case(word) {
                removed += 1;
            } else {
                kept.push_str(line);
                kept.push('\n');
            }
        }

        if removed > 0 {
            self.replace_file(&kept).await?;
            *words = parse_lines(&kept);
            info!(%word, removed, total = words.len(), "word removed");
        } else {
            // Already gone from the file; drop any copy still served
            words.retain(|w| !w.eq_ignore_ascii_case(word));
        }

        Ok(RemoveOutcome::Removed(removed))
    }

    /// Write `contents` to the scratch file and rename it over the list
    async fn replace_file(&self, contents: &str) -> io::Result<()> {
        tokio::fs::write(&self.scratch, contents).await?;
        if let Err(err) = tokio::fs::rename(&self.scratch, &self.path).await {
            let _ = tokio::fs::remove_file(&self.scratch).await;
            return Err(err);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with(contents: &str) -> (tempfile::TempDir, WordStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wordlist.txt");
        std::fs::write(&path, contents).unwrap();
        let store = WordStore::open(&path).await.unwrap();
        (dir, store)
    }

    async fn served(store: &WordStore) -> usize {
        store.words.read().await.len()
    }

    #[tokio::test]
    async fn open_skips_blank_lines() {
        let (_dir, store) = store_with("CRANE\n\nSLATE\n").await;
        assert_eq!(served(&store).await, 2);
    }

    #[tokio::test]
    async fn random_word_comes_from_list() {
        let (_dir, store) = store_with("CRANE\nSLATE\n").await;
        for _ in 0..20 {
            let word = store.random_word().await.unwrap();
            assert!(word == "CRANE" || word == "SLATE");
        }

        let (_dir, empty) = store_with("").await;
        assert!(empty.random_word().await.is_none());
    }

    #[tokio::test]
    async fn add_appends_new_words() {
        let (_dir, store) = store_with("CRANE\n").await;
        let outcome = store.add("slate\ncrane\nSLATE\nallow\n").await.unwrap();

        assert_eq!(
            outcome,
            AddOutcome::Added(vec!["SLATE".to_string(), "ALLOW".to_string()])
        );
        assert_eq!(store.read_file().await.unwrap(), "CRANE\nSLATE\nALLOW\n");
        assert_eq!(served(&store).await, 3);
    }

    #[tokio::test]
    async fn add_repairs_missing_trailing_newline() {
        let (_dir, store) = store_with("CRANE").await;
        store.add("slate").await.unwrap();
        assert_eq!(store.read_file().await.unwrap(), "CRANE\nSLATE\n");
    }

    #[tokio::test]
    async fn add_classifies_bad_bodies() {
        let (_dir, store) = store_with("CRANE\n").await;
        assert_eq!(store.add("  \n").await.unwrap(), AddOutcome::EmptyBody);
        assert_eq!(
            store.add("toolong\nab1de\nfour").await.unwrap(),
            AddOutcome::NoValidWords
        );
        assert_eq!(store.add("crane\n").await.unwrap(), AddOutcome::AllDuplicates);
        assert_eq!(store.read_file().await.unwrap(), "CRANE\n");
    }

    #[tokio::test]
    async fn remove_is_case_insensitive_and_idempotent() {
        let (_dir, store) = store_with("CRANE\nslate\nALLOW\n").await;
        assert_eq!(store.remove("Slate").await.unwrap(), RemoveOutcome::Removed(1));
        assert_eq!(store.read_file().await.unwrap(), "CRANE\nALLOW\n");

        assert_eq!(store.remove("slate").await.unwrap(), RemoveOutcome::Removed(0));
        assert_eq!(served(&store).await, 2);
    }

    #[tokio::test]
    async fn remove_rejects_non_alphabetic() {
        let (_dir, store) = store_with("CRANE\n").await;
        assert_eq!(store.remove("cr4ne").await.unwrap(), RemoveOutcome::InvalidWord);
        assert_eq!(store.remove("").await.unwrap(), RemoveOutcome::InvalidWord);
    }

    #[tokio::test]
    async fn failed_remove_keeps_serving_the_word() {
        let (dir, store) = store_with("CRANE\nSLATE\n").await;
        let path = dir.path().join("wordlist.txt");
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(store.remove("slate").await.is_err());
        assert_eq!(served(&store).await, 2);
        assert!(store.add("allow").await.is_err());
        assert_eq!(served(&store).await, 2);
    }

    #[tokio::test]
    async fn remove_reads_the_file_not_memory() {
        let (dir, store) = store_with("CRANE\n").await;
        let path = dir.path().join("wordlist.txt");
        std::fs::write(&path, "CRANE\nPLANT\n").unwrap();

        assert_eq!(store.remove("plant").await.unwrap(), RemoveOutcome::Removed(1));
        assert_eq!(store.read_file().await.unwrap(), "CRANE\n");
        assert_eq!(served(&store).await, 1);
    }

    #[tokio::test]
    async fn remove_drops_words_only_in_memory() {
        let (dir, store) = store_with("CRANE\nSLATE\n").await;
        std::fs::write(dir.path().join("wordlist.txt"), "CRANE\n").unwrap();

        assert_eq!(store.remove("slate").await.unwrap(), RemoveOutcome::Removed(0));
        assert_eq!(store.random_word().await.as_deref(), Some("CRANE"));
    }

    #[tokio::test]
    async fn rewrites_leave_no_scratch_file() {
        let (dir, store) = store_with("CRANE\nSLATE\n").await;
        store.add("allow").await.unwrap();
        store.remove("crane").await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("wordlist.txt")]);
        assert_eq!(store.read_file().await.unwrap(), "SLATE\nALLOW\n");
    }
}
