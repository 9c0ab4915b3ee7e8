//! Run summary reporting

use chrono::{DateTime, Utc};

/// Outcome of one complete scrape run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// Pages enumerated
    pub pages_total: u32,

    /// Pages fetched and extracted
    pub pages_extracted: u32,

    /// Pages that failed every attempt
    pub pages_degraded: u32,

    /// Records in the aggregate
    pub records: u64,

    /// Where the output was (or would have been) written
    pub output_path: String,

    /// Whether the output write succeeded
    pub output_written: bool,
}

impl RunSummary {
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }

    /// Returns the share of pages that were extracted, as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.pages_total == 0 {
            return 0.0;
        }
        (self.pages_extracted as f64 / self.pages_total as f64) * 100.0
    }
}

/// Prints the summary to stdout in a formatted manner
pub fn print_summary(summary: &RunSummary) {
    println!("=== Scrape Summary ===\n");

    println!("Run:");
    println!("  Started: {}", summary.started_at.to_rfc3339());
    println!("  Finished: {}", summary.finished_at.to_rfc3339());
    println!("  Duration: {} seconds", summary.duration_seconds());
    println!();

    println!("Pages:");
    println!("  Total: {}", summary.pages_total);
    println!("  Extracted: {}", summary.pages_extracted);
    println!("  Degraded: {}", summary.pages_degraded);
    println!();

    println!("Records: {}", summary.records);
    if summary.output_written {
        println!("Output: {}", summary.output_path);
    } else {
        println!("Output: {} (write failed)", summary.output_path);
    }

    println!(
        "Success Rate: {:.1}% ({} / {} pages extracted)",
        summary.success_rate(),
        summary.pages_extracted,
        summary.pages_total
    );
}
