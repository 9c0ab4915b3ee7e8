//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building the HTTP client with the configured user agent and timeouts
//! - Single GET attempts with error classification
//! - Fixed-delay retry of failed attempts

use crate::config::FetcherConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Why a single request attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("Request timeout")]
    Timeout,

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("{0}")]
    Network(String),
}

/// Terminal failure of a page fetch after all attempts
#[derive(Debug, Clone, Error)]
#[error("Failed to fetch {url} after {attempts} attempt(s): {last_cause}")]
pub struct FetchError {
    /// The URL that was requested
    pub url: String,

    /// Error of the final attempt
    pub last_cause: AttemptError,

    /// Number of attempts made
    pub attempts: u32,
}

/// A source of raw page content, one attempt per call
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Performs a single request for `url` and returns the body
    async fn get(&self, url: &str) -> Result<String, AttemptError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use bin_scrape::config::FetcherConfig;
/// use bin_scrape::pipeline::build_http_client;
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(config.request_timeout())
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// [`PageSource`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
}

impl HttpPageSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn from_config(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn get(&self, url: &str) -> Result<String, AttemptError> {
        let response = self.client.get(url).send().await.map_err(classify_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AttemptError::Status(status.as_u16()));
        }

        response.text().await.map_err(classify_error)
    }
}

/// Maps a transport error onto an [`AttemptError`]
fn classify_error(e: reqwest::Error) -> AttemptError {
    if e.is_timeout() {
        AttemptError::Timeout
    } else if e.is_connect() {
        AttemptError::Connect(e.to_string())
    } else if let Some(status) = e.status() {
        AttemptError::Status(status.as_u16())
    } else {
        AttemptError::Network(e.to_string())
    }
}

/// How many times to try a page and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_retries: u32,

    /// Fixed wait after each failed attempt except the last
    pub retry_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    pub fn from_config(config: &FetcherConfig) -> Self {
        Self::new(config.max_retries, config.retry_delay())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&FetcherConfig::default())
    }
}

/// Fetches pages from a [`PageSource`], retrying with a fixed delay
///
/// # Retry Logic
///
/// | Condition | Action |
/// |-----------|--------|
/// | Any attempt error, attempts remaining | Wait `retry_delay`, retry |
/// | Any attempt error, last attempt | Return `FetchError` |
///
/// The delay is the same for every error kind and attempt number. The
/// caller's task stays suspended for the whole delay.
#[derive(Clone)]
pub struct RetryingFetcher {
    source: Arc<dyn PageSource>,
    policy: RetryPolicy,
}

impl RetryingFetcher {
    pub fn new(source: Arc<dyn PageSource>, policy: RetryPolicy) -> Self {
        Self { source, policy }
    }

    /// Fetches `url`, returning the body of the first successful attempt
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let max_attempts = self.policy.max_retries.max(1);
        let mut attempt = 1;

        loop {
            tracing::debug!("Requesting {} (attempt {}/{})", url, attempt, max_attempts);

            let cause = match self.source.get(url).await {
                Ok(body) => return Ok(body),
                Err(e) => e,
            };

            tracing::warn!(
                "Request to {} failed, attempt {} of {}: {}",
                url,
                attempt,
                max_attempts,
                cause
            );

            if attempt >= max_attempts {
                return Err(FetchError {
                    url: url.to_string(),
                    last_cause: cause,
                    attempts: attempt,
                });
            }

            tracing::info!(
                "Waiting {:?} before retrying {}",
                self.policy.retry_delay,
                url
            );
            tokio::time::sleep(self.policy.retry_delay).await;
            attempt += 1;
        }
    }
}
