//! Offline target fallback
//!
//! When the word server cannot be reached, a target is drawn from the last
//! word list that was fetched successfully, then from the bundled list. The
//! game sees an ordinary successful fetch either way.

use super::{SourceError, WordSource};
use crate::wordlists::EMBEDDED;
use rand::seq::IndexedRandom;
use std::sync::Mutex;
use tracing::{info, warn};

/// Target used when no list at all is available
pub const LAST_RESORT_WORD: &str = "CRANE";

/// Wraps a source, answering target fetches locally when it fails
#[derive(Debug)]
pub struct OfflineFallback<S> {
    inner: S,
    cached: Mutex<Vec<String>>,
}

impl<S> OfflineFallback<S> {
    #[must_use]
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cached: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    fn remember(&self, text: &str) {
        let words: Vec<String> = text
            .lines()
            .map(|line| line.trim().to_uppercase())
            .filter(|word| !word.is_empty())
            .collect();
        if let Ok(mut cached) = self.cached.lock() {
            *cached = words;
        }
    }

    fn offline_word(&self) -> String {
        let mut rng = rand::rng();
        let from_cache = self
            .cached
            .lock()
            .ok()
            .and_then(|cached| cached.choose(&mut rng).cloned());

        from_cache
            .or_else(|| EMBEDDED.choose(&mut rng).map(|word| (*word).to_string()))
            .unwrap_or_else(|| LAST_RESORT_WORD.to_string())
    }
}

impl<S: WordSource + Sync> WordSource for OfflineFallback<S> {
    async fn fetch_target_word(&self) -> Result<String, SourceError> {
        match self.inner.fetch_target_word().await {
            Ok(word) => Ok(word),
            Err(err) => {
                warn!(error = %err, "target fetch failed");
                info!("offline, serving random word");
                Ok(self.offline_word())
            }
        }
    }

    async fn fetch_word_list(&self) -> Result<String, SourceError> {
        let text = self.inner.fetch_word_list().await?;
        self.remember(&text);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LocalWordSource;
    use crate::wordlists::loader::words_from_text;

    /// A source whose target fetch always fails
    struct Unreachable {
        list: Option<&'static str>,
    }

    impl WordSource for Unreachable {
        async fn fetch_target_word(&self) -> Result<String, SourceError> {
            Err(SourceError::Status {
                url: "http://offline/word".to_string(),
                status: 503,
            })
        }

        async fn fetch_word_list(&self) -> Result<String, SourceError> {
            self.list.map(str::to_string).ok_or(SourceError::Empty)
        }
    }

    #[tokio::test]
    async fn passes_through_successful_fetches() {
        let source = OfflineFallback::new(LocalWordSource::new(words_from_text("slate")));
        assert_eq!(source.fetch_target_word().await.unwrap(), "SLATE");
    }

    #[tokio::test]
    async fn serves_cached_word_when_offline() {
        let source = OfflineFallback::new(Unreachable {
            list: Some("allow\n"),
        });
        source.fetch_word_list().await.unwrap();
        assert_eq!(source.fetch_target_word().await.unwrap(), "ALLOW");
    }

    #[tokio::test]
    async fn falls_back_to_embedded_list() {
        let source = OfflineFallback::new(Unreachable { list: None });
        assert!(source.fetch_word_list().await.is_err());

        let word = source.fetch_target_word().await.unwrap();
        assert!(EMBEDDED.contains(&word.as_str()));
    }
}
