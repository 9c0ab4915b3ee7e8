//! Configuration module for Bin-Scrape
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! A missing file, section, or key falls back to the built-in defaults.
//!
//! # Example
//!
//! ```no_run
//! use bin_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("scrape.toml")).unwrap();
//! println!("Fetching {} pages", config.source.total_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetcherConfig, OutputConfig, SourceConfig, DEFAULT_BASE_URL,
    DEFAULT_CONCURRENCY_LIMIT, DEFAULT_MAX_RETRIES, DEFAULT_OUTPUT_PATH,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_DELAY_MS, DEFAULT_TOTAL_PAGES,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
