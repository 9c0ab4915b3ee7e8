//! Data model for the scrape pipeline
//!
//! # Components
//!
//! - `PageTask`: one page number to fetch
//! - `FetchOutcome`: page content or the terminal fetch error
//! - `Record`: one extracted table row
//! - `PageResult`: the records of one page, or an empty degraded result
//! - `Aggregate`: all records in page order

mod aggregate;
mod page;
mod record;

// Re-export main types
pub use aggregate::Aggregate;
pub use page::{FetchOutcome, PageResult, PageStatus, PageTask};
pub use record::{Record, RECORD_FIELDS};
