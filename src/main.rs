//! Bin-Scrape main entry point
//!
//! This is the command-line interface for the Bin-Scrape listing scraper.

use anyhow::Context;
use bin_scrape::config::{load_config_with_hash, validate, Config};
use bin_scrape::output::print_summary;
use bin_scrape::pipeline::{run_scrape, PageUrls};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Bin-Scrape: a bounded-concurrency listing scraper
///
/// Fetches a fixed range of listing pages, extracts the rows of each page's
/// table, and writes them in page order to a delimited file.
#[derive(Parser, Debug)]
#[command(name = "bin-scrape")]
#[command(version)]
#[command(about = "A bounded-concurrency listing scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Override the number of pages to fetch
    #[arg(long, value_name = "N")]
    pages: Option<u32>,

    /// Override the output file path
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Validate config and show what would be fetched without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(pages) = cli.pages {
        config.source.total_pages = pages;
    }
    if let Some(output) = cli.output {
        config.output.path = output;
    }
    validate(&config).context("invalid configuration")?;

    if cli.dry_run {
        handle_dry_run(&config)?;
        return Ok(());
    }

    let summary = run_scrape(&config).await.context("scrape failed")?;
    tracing::info!(
        "Scrape completed: {} records from {} of {} pages",
        summary.records,
        summary.pages_extracted,
        summary.pages_total
    );

    if !cli.quiet {
        println!();
        print_summary(&summary);
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bin_scrape=info,warn"),
            1 => EnvFilter::new("bin_scrape=debug,info"),
            2 => EnvFilter::new("bin_scrape=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the effective configuration
fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    let urls = PageUrls::parse(&config.source.base_url)?;

    println!("=== Bin-Scrape Dry Run ===\n");

    println!("Source:");
    println!("  Base URL: {}", config.source.base_url);
    println!("  Total pages: {}", config.source.total_pages);
    println!("  First page: {}", urls.url_for(1));
    println!("  Last page: {}", urls.url_for(config.source.total_pages));

    println!("\nFetcher:");
    println!("  Concurrency limit: {}", config.fetcher.concurrency_limit);
    println!("  Max retries: {}", config.fetcher.max_retries);
    println!("  Retry delay: {}ms", config.fetcher.retry_delay_ms);
    println!(
        "  Request timeout: {}s",
        config.fetcher.request_timeout_secs
    );
    println!("  User agent: {}", config.fetcher.user_agent);

    println!("\nOutput:");
    println!("  Path: {}", config.output.path);
    println!("  Delimiter: {:?}", config.output.delimiter);

    println!("\n✓ Configuration is valid");
    println!(
        "✓ Would fetch {} pages, at most {} at a time",
        config.source.total_pages, config.fetcher.concurrency_limit
    );

    Ok(())
}
