//! Where target words and the accepted-word list come from
//!
//! The game only needs two requests: one random target word, and the full
//! word list. [`HttpWordSource`] asks the word server, [`LocalWordSource`]
//! answers from memory, and [`OfflineFallback`] wraps another source so a
//! failed target fetch still yields a word.

mod fallback;
mod http;
mod local;

pub use fallback::{LAST_RESORT_WORD, OfflineFallback};
pub use http::HttpWordSource;
pub use local::LocalWordSource;

use crate::config::WordSourceConfig;
use std::future::Future;

/// Error fetching words
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },
    #[error("failed to read word list: {0}")]
    Io(#[from] std::io::Error),
    #[error("word list is empty")]
    Empty,
}

/// Provider of target words and the accepted-word list
pub trait WordSource {
    /// One random target word (raw text, not yet validated)
    fn fetch_target_word(&self) -> impl Future<Output = Result<String, SourceError>> + Send;

    /// The accepted-word list as newline-separated text
    fn fetch_word_list(&self) -> impl Future<Output = Result<String, SourceError>> + Send;
}

/// Source picked from client configuration
#[derive(Debug)]
pub enum ClientSource {
    Remote(OfflineFallback<HttpWordSource>),
    Local(LocalWordSource),
}

impl ClientSource {
    /// Build the source a client was configured with
    ///
    /// # Errors
    ///
    /// Returns an error if a local word list file cannot be read or is empty.
    pub fn from_config(config: &WordSourceConfig) -> Result<Self, SourceError> {
        match config {
            WordSourceConfig::Server(url) => {
                Ok(Self::Remote(OfflineFallback::new(HttpWordSource::new(url.as_str()))))
            }
            WordSourceConfig::Embedded => Ok(Self::Local(LocalWordSource::embedded())),
            WordSourceConfig::File(path) => {
                let source = LocalWordSource::from_file(path)?;
                if source.words().is_empty() {
                    return Err(SourceError::Empty);
                }
                Ok(Self::Local(source))
            }
        }
    }

    /// Short description for status lines
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Remote(source) => source.inner().base_url().to_string(),
            Self::Local(source) => format!("offline ({} words)", source.words().len()),
        }
    }
}

impl WordSource for ClientSource {
    async fn fetch_target_word(&self) -> Result<String, SourceError> {
        match self {
            Self::Remote(source) => source.fetch_target_word().await,
            Self::Local(source) => source.fetch_target_word().await,
        }
    }

    async fn fetch_word_list(&self) -> Result<String, SourceError> {
        match self {
            Self::Remote(source) => source.fetch_word_list().await,
            Self::Local(source) => source.fetch_word_list().await,
        }
    }
}

/// Base URL of a loopback port that nothing listens on
#[cfg(test)]
pub(crate) fn closed_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embedded_config_serves_bundled_words() {
        let source = ClientSource::from_config(&WordSourceConfig::Embedded).unwrap();
        let word = source.fetch_target_word().await.unwrap();
        assert!(crate::wordlists::EMBEDDED.contains(&word.as_str()));
        assert!(source.describe().starts_with("offline"));
    }

    #[test]
    fn server_config_describes_url() {
        let source =
            ClientSource::from_config(&WordSourceConfig::Server("http://words.test".to_string()))
                .unwrap();
        assert_eq!(source.describe(), "http://words.test");
    }

    #[test]
    fn empty_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "\n\n").unwrap();
        assert!(matches!(
            ClientSource::from_config(&WordSourceConfig::File(path)),
            Err(SourceError::Empty)
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        assert!(matches!(
            ClientSource::from_config(&WordSourceConfig::File(path)),
            Err(SourceError::Io(_))
        ));
    }
}
