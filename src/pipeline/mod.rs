//! Scrape pipeline: fetch, extract, schedule, aggregate
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with fixed-delay retries
//! - Table row extraction
//! - Bounded-concurrency scheduling of page tasks
//! - Page-ordered aggregation of the results

mod aggregator;
mod extractor;
mod fetcher;
mod page_urls;
mod scheduler;

pub use aggregator::aggregate;
pub use extractor::{extract, Extractor};
pub use fetcher::{
    build_http_client, AttemptError, FetchError, HttpPageSource, PageSource, RetryPolicy,
    RetryingFetcher,
};
pub use page_urls::PageUrls;
pub use scheduler::Scheduler;

use crate::config::{validate, Config};
use crate::model::Aggregate;
use crate::output::{CsvSink, RunSummary, Sink};
use crate::ScrapeError;
use chrono::Utc;
use std::sync::Arc;

/// Fetches every configured page through `source` and aggregates the records
///
/// Individual page failures never fail the run; only an invalid configuration
/// or a broken task does.
pub async fn scrape(config: &Config, source: Arc<dyn PageSource>) -> Result<Aggregate, ScrapeError> {
    validate(config)?;
    let scheduler = Scheduler::from_config(config, source)?;
    let results = scheduler.run(config.source.total_pages).await?;
    let aggregate = aggregate(results);

    tracing::info!(
        "Collected {} records from {} pages ({} degraded, peak concurrency {})",
        aggregate.len(),
        aggregate.pages_total,
        aggregate.pages_degraded,
        scheduler.peak_in_flight()
    );

    Ok(aggregate)
}

/// Runs a complete scrape and writes the output file
///
/// This is the main entry point. It will:
/// 1. Build the HTTP client
/// 2. Fetch and extract every page under the concurrency limit
/// 3. Aggregate the records in page order
/// 4. Write the delimited output
///
/// A failed write is logged and reflected in the returned summary; it does not
/// turn the run into an error.
///
/// # Example
///
/// ```no_run
/// use bin_scrape::config::Config;
/// use bin_scrape::pipeline::run_scrape;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let summary = run_scrape(&Config::default()).await?;
/// println!("{} records", summary.records);
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: &Config) -> Result<RunSummary, ScrapeError> {
    let source = HttpPageSource::from_config(&config.fetcher)?;
    let sink = CsvSink::from_config(&config.output);
    run_scrape_with(config, Arc::new(source), &sink).await
}

/// Like [`run_scrape`], with the page source and sink supplied by the caller
pub async fn run_scrape_with(
    config: &Config,
    source: Arc<dyn PageSource>,
    sink: &dyn Sink,
) -> Result<RunSummary, ScrapeError> {
    let started_at = Utc::now();
    tracing::info!(
        "Starting scrape of {} pages from {}",
        config.source.total_pages,
        config.source.base_url
    );

    let aggregate = scrape(config, source).await?;

    let output_written = match sink.write(&aggregate) {
        Ok(()) => {
            tracing::info!(
                "Wrote {} records to {}",
                aggregate.len(),
                sink.destination()
            );
            true
        }
        Err(e) => {
            tracing::error!("Failed to write {}: {}", sink.destination(), e);
            false
        }
    };

    Ok(RunSummary {
        started_at,
        finished_at: Utc::now(),
        pages_total: aggregate.pages_total,
        pages_extracted: aggregate.pages_extracted,
        pages_degraded: aggregate.pages_degraded,
        records: aggregate.len() as u64,
        output_path: sink.destination(),
        output_written,
    })
}
