//! Output module for persisting scrape results
//!
//! This module handles:
//! - Writing the aggregate as a delimited file
//! - Summarizing a run for the console

mod csv;
mod summary;
mod traits;

pub use csv::{format_delimited, write_delimited, CsvSink};
pub use summary::{print_summary, RunSummary};
pub use traits::{OutputError, OutputResult, Sink};
