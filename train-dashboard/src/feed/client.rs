//! HTTP client for the train schedule feed.

use std::time::Duration;

use tracing::warn;

use crate::domain::Train;

use super::error::FeedError;
use super::source::TrainSource;

/// Default feed URL.
pub const DEFAULT_FEED_URL: &str = "http://localhost:5001/api/trains";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the feed client.
#[derive(Debug, Clone)]
pub struct FeedClientConfig {
    /// URL returning a JSON array of trains
    pub url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl FeedClientConfig {
    /// Create a config for the given feed URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for FeedClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_URL)
    }
}

/// Client for the train schedule feed.
#[derive(Debug, Clone)]
pub struct FeedClient {
    http: reqwest::Client,
    url: String,
}

impl FeedClient {
    /// Create a new feed client.
    pub fn new(config: FeedClientConfig) -> Result<Self, FeedError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            url: config.url,
        })
    }

    /// The URL this client polls.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the full train list.
    pub async fn fetch_all(&self) -> Result<Vec<Train>, FeedError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FeedError::Api {
                status: status.as_u16(),
                message: body.chars().take(500).collect(),
            });
        }

        let body = response.text().await?;
        parse_trains(&body)
    }
}

impl TrainSource for FeedClient {
    async fn fetch(&self) -> Result<Vec<Train>, FeedError> {
        self.fetch_all().await
    }
}

/// Decode a feed body.
///
/// The body must be a JSON array. Entries that are not valid trains are
/// skipped and logged rather than failing the whole fetch.
pub(crate) fn parse_trains(body: &str) -> Result<Vec<Train>, FeedError> {
    let entries: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| FeedError::Json {
            message: e.to_string(),
        })?;

    let mut trains = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<Train>(entry) {
            Ok(train) => trains.push(train),
            Err(e) => warn!(index, error = %e, "skipping malformed train entry"),
        }
    }

    Ok(trains)
}
