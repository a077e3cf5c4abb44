//! Word server client

use super::{SourceError, WordSource};
use std::time::Duration;
use tracing::debug;

/// Fetches words from a running word server (`GET /word`, `GET /wordlist`)
#[derive(Debug, Clone)]
pub struct HttpWordSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpWordSource {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_text(&self, path: &str) -> Result<String, SourceError> {
        let url = format!("{}{path}", self.base_url);
        debug!(%url, "fetching");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| SourceError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| SourceError::Request { url, source })
    }
}

impl WordSource for HttpWordSource {
    async fn fetch_target_word(&self) -> Result<String, SourceError> {
        self.get_text("/word").await
    }

    async fn fetch_word_list(&self) -> Result<String, SourceError> {
        self.get_text("/wordlist").await
    }
}
