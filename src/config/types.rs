use serde::Deserialize;
use std::time::Duration;

/// Default listing URL; page numbers are appended as `?page=<n>`
pub const DEFAULT_BASE_URL: &str = "https://bincheck.org/russia";

/// Default number of listing pages to enumerate
pub const DEFAULT_TOTAL_PAGES: u32 = 73;

/// Default number of pages allowed in flight at once
pub const DEFAULT_CONCURRENCY_LIMIT: u32 = 5;

/// Default number of attempts per page before giving up
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default fixed wait between attempts (two minutes)
pub const DEFAULT_RETRY_DELAY_MS: u64 = 120_000;

/// Default per-request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default output file
pub const DEFAULT_OUTPUT_PATH: &str = "parsed_data.csv";

/// Main configuration structure for Bin-Scrape
///
/// Every section and key is optional; missing values fall back to the
/// defaults above.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which pages to fetch
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Listing URL without the page parameter
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Pages 1..=total_pages are fetched
    #[serde(rename = "total-pages")]
    pub total_pages: u32,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            total_pages: DEFAULT_TOTAL_PAGES,
        }
    }
}

/// Concurrency and retry behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Maximum number of pages in flight (including those waiting to retry)
    #[serde(rename = "concurrency-limit")]
    pub concurrency_limit: u32,

    /// Attempts per page before the page is degraded to an empty result
    #[serde(rename = "max-retries")]
    pub max_retries: u32,

    /// Fixed wait between attempts (milliseconds)
    #[serde(rename = "retry-delay-ms")]
    pub retry_delay_ms: u64,

    /// Timeout applied to each individual request (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl FetcherConfig {
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: DEFAULT_CONCURRENCY_LIMIT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: format!("bin-scrape/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the delimited output file
    pub path: String,

    /// Field delimiter
    pub delimiter: char,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_OUTPUT_PATH.to_string(),
            delimiter: ',',
        }
    }
}
