//! Bin-Scrape: a bounded-concurrency listing scraper
//!
//! This crate fetches a fixed range of paginated listing pages, extracts the
//! rows of each page's results table, and writes the combined records to a
//! delimited file. Pages are fetched concurrently under a fixed permit budget,
//! retried with a fixed delay, and reassembled in page order.

pub mod config;
pub mod model;
pub mod output;
pub mod pipeline;

use thiserror::Error;

/// Main error type for Bin-Scrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid selector: {0}")]
    Selector(String),

    #[error("Task for page {page} failed: {message}")]
    TaskFailed { page: u32, message: String },

    #[error("Page task did not complete: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Bin-Scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{Aggregate, PageResult, PageStatus, PageTask, Record};
pub use output::RunSummary;
pub use pipeline::run_scrape;
