//! Integration tests for the scraper
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full fetch, extract, aggregate, and write cycle end-to-end.

use bin_scrape::config::{Config, FetcherConfig, OutputConfig, SourceConfig};
use bin_scrape::pipeline::{run_scrape, run_scrape_with, HttpPageSource};
use bin_scrape::output::CsvSink;
use bin_scrape::{ConfigError, ScrapeError};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HEADER: &str = "bin,brand,bank,type,level";

/// Creates a test configuration pointing at the mock server
fn create_test_config(base_url: &str, pages: u32, limit: u32, output: &Path) -> Config {
    Config {
        source: SourceConfig {
            base_url: format!("{}/russia", base_url),
            total_pages: pages,
        },
        fetcher: FetcherConfig {
            concurrency_limit: limit,
            max_retries: 3,
            retry_delay_ms: 10, // Very short for testing
            request_timeout_secs: 5,
            user_agent: "TestScraper/1.0".to_string(),
        },
        output: OutputConfig {
            path: output.display().to_string(),
            delimiter: ',',
        },
    }
}

fn listing(rows: &[[&str; 5]]) -> String {
    let body: String = rows
        .iter()
        .map(|cells| {
            let tds: String = cells.iter().map(|c| format!("<td> {} </td>", c)).collect();
            format!("<tr>{}</tr>", tds)
        })
        .collect();

    format!(
        r#"<html><head><title>BIN list</title></head><body>
        <table class="table">
            <thead><tr><th>BIN</th><th>Brand</th><th>Bank</th><th>Type</th><th>Level</th></tr></thead>
            <tbody>{}</tbody>
        </table>
        </body></html>"#,
        body
    )
}

async fn mount_page(server: &MockServer, page: u32, template: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path("/russia"))
        .and(query_param("page", page.to_string()))
        .respond_with(template)
        .expect(times)
        .mount(server)
        .await;
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .expect("Failed to read output")
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_failed_middle_page_is_skipped_in_order() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("parsed_data.csv");

    mount_page(
        &server,
        1,
        html(listing(&[["411111", "VISA", "SBERBANK", "DEBIT", "CLASSIC"]])),
        1,
    )
    .await;
    mount_page(&server, 2, ResponseTemplate::new(500), 3).await;
    mount_page(
        &server,
        3,
        html(listing(&[["555555", "MASTERCARD", "VTB BANK", "CREDIT", "GOLD"]])),
        1,
    )
    .await;

    let config = create_test_config(&server.uri(), 3, 2, &output);
    let summary = run_scrape(&config).await.expect("Scrape failed");

    assert_eq!(summary.pages_total, 3);
    assert_eq!(summary.pages_extracted, 2);
    assert_eq!(summary.pages_degraded, 1);
    assert_eq!(summary.records, 2);
    assert!(summary.output_written);

    assert_eq!(
        read_lines(&output),
        vec![
            HEADER.to_string(),
            "411111,VISA,SBERBANK,DEBIT,CLASSIC".to_string(),
            "555555,MASTERCARD,VTB BANK,CREDIT,GOLD".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_all_pages_failing_writes_header_only() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("parsed_data.csv");

    for page in 1..=3 {
        mount_page(&server, page, ResponseTemplate::new(503), 3).await;
    }

    let config = create_test_config(&server.uri(), 3, 5, &output);
    let summary = run_scrape(&config).await.expect("Scrape failed");

    assert_eq!(summary.records, 0);
    assert_eq!(summary.pages_degraded, 3);
    assert_eq!(read_lines(&output), vec![HEADER.to_string()]);
}

#[tokio::test]
async fn test_page_without_rows_is_not_retried() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("parsed_data.csv");

    mount_page(
        &server,
        1,
        html("<html><body><p>No BINs found</p></body></html>".to_string()),
        1,
    )
    .await;

    let config = create_test_config(&server.uri(), 1, 5, &output);
    let summary = run_scrape(&config).await.expect("Scrape failed");

    assert_eq!(summary.pages_extracted, 1);
    assert_eq!(summary.pages_degraded, 0);
    assert_eq!(read_lines(&output), vec![HEADER.to_string()]);
}

#[tokio::test]
async fn test_transient_failure_recovers() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("parsed_data.csv");

    // First two attempts fail, the third succeeds
    Mock::given(method("GET"))
        .and(path("/russia"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    mount_page(
        &server,
        1,
        html(listing(&[["220000", "MIR", "BANK ROSSIYA", "DEBIT", "STANDARD"]])),
        1,
    )
    .await;

    let config = create_test_config(&server.uri(), 1, 5, &output);
    let summary = run_scrape(&config).await.expect("Scrape failed");

    assert_eq!(summary.records, 1);
    assert_eq!(summary.pages_degraded, 0);
    assert_eq!(
        read_lines(&output)[1],
        "220000,MIR,BANK ROSSIYA,DEBIT,STANDARD"
    );
}

#[tokio::test]
async fn test_out_of_order_completion_keeps_page_order() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("parsed_data.csv");

    // Page 1 is the slowest, page 5 the fastest
    for page in 1..=5u32 {
        let bin = format!("{}11111", page);
        let template = html(listing(&[
            [bin.as_str(), "VISA", "A", "DEBIT", "CLASSIC"],
            [bin.as_str(), "VISA", "B", "CREDIT", "GOLD"],
        ]))
        .set_delay(Duration::from_millis(40 * (6 - page as u64)));
        mount_page(&server, page, template, 1).await;
    }

    let config = create_test_config(&server.uri(), 5, 5, &output);
    run_scrape(&config).await.expect("Scrape failed");

    let lines = read_lines(&output);
    assert_eq!(lines.len(), 11);

    let order: Vec<String> = lines[1..]
        .iter()
        .map(|line| {
            let mut cells = line.split(',');
            let bin = cells.next().unwrap();
            let bank = cells.nth(1).unwrap();
            format!("{}:{}", bin, bank)
        })
        .collect();
    assert_eq!(
        order,
        vec![
            "111111:A", "111111:B", "211111:A", "211111:B", "311111:A", "311111:B",
            "411111:A", "411111:B", "511111:A", "511111:B",
        ]
    );
}

#[tokio::test]
async fn test_write_failure_does_not_fail_run() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("no-such-dir").join("parsed_data.csv");

    mount_page(
        &server,
        1,
        html(listing(&[["411111", "VISA", "SBERBANK", "DEBIT", "CLASSIC"]])),
        1,
    )
    .await;

    let config = create_test_config(&server.uri(), 1, 5, &output);
    let summary = run_scrape(&config).await.expect("Scrape failed");

    assert_eq!(summary.records, 1);
    assert!(!summary.output_written);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_tab_delimited_output_with_custom_sink() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("parsed_data.tsv");

    mount_page(
        &server,
        1,
        html(listing(&[["411111", "VISA", "Bank, Ltd", "DEBIT", "CLASSIC"]])),
        1,
    )
    .await;

    let config = create_test_config(&server.uri(), 1, 1, &output);
    let source = HttpPageSource::from_config(&config.fetcher).expect("Failed to build client");
    let sink = CsvSink::new(&output, '\t');

    run_scrape_with(&config, Arc::new(source), &sink)
        .await
        .expect("Scrape failed");

    assert_eq!(
        read_lines(&output),
        vec![
            "bin\tbrand\tbank\ttype\tlevel".to_string(),
            "411111\tVISA\tBank, Ltd\tDEBIT\tCLASSIC".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_invalid_config_fails_before_fetching() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("parsed_data.csv");

    mount_page(&server, 1, ResponseTemplate::new(200), 0).await;

    let mut config = create_test_config(&server.uri(), 1, 5, &output);
    config.fetcher.concurrency_limit = 0;

    let result = run_scrape(&config).await;

    assert!(matches!(
        result,
        Err(ScrapeError::Config(ConfigError::Validation(_)))
    ));
    assert!(!output.exists());
}
