//! Output sink trait and errors
//!
//! This module defines the trait interface for output sinks, which persist
//! the aggregate of a run.

use crate::model::Aggregate;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for output sinks
///
/// A sink receives the complete, page-ordered aggregate once per run.
/// Implementations must be thread-safe.
pub trait Sink: Send + Sync {
    /// Persists every record of `aggregate`, in order
    fn write(&self, aggregate: &Aggregate) -> OutputResult<()>;

    /// Human-readable description of where output goes
    fn destination(&self) -> String;
}
