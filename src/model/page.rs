//! Per-page units of work and their results
use crate::model::record::Record;
use crate::pipeline::FetchError;
use std::fmt;

/// One unit of work: a listing page number (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageTask {
    pub page: u32,
}

impl PageTask {
    pub fn new(page: u32) -> Self {
        Self { page }
    }

    /// Enumerates tasks for pages `1..=page_count` in ascending order
    pub fn range(page_count: u32) -> impl Iterator<Item = PageTask> {
        (1..=page_count).map(PageTask::new)
    }

    /// Zero-based slot of this page in an ordered result vector
    pub fn slot(&self) -> usize {
        (self.page as usize).saturating_sub(1)
    }
}

impl fmt::Display for PageTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {}", self.page)
    }
}

/// Result of the fetch stage for one page
#[derive(Debug)]
pub enum FetchOutcome {
    /// Page body was retrieved
    Fetched { task: PageTask, content: String },

    /// Every attempt failed
    Failed { task: PageTask, error: FetchError },
}

impl FetchOutcome {
    pub fn task(&self) -> PageTask {
        match self {
            Self::Fetched { task, .. } | Self::Failed { task, .. } => *task,
        }
    }
}

/// How a page's records were obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageStatus {
    /// Page was fetched and its table extracted (possibly zero rows)
    Extracted,

    /// Page failed after all retries and contributes no records
    Degraded,
}

impl PageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extracted => "extracted",
            Self::Degraded => "degraded",
        }
    }
}

impl fmt::Display for PageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered records extracted from one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub task: PageTask,
    pub records: Vec<Record>,
    pub status: PageStatus,
}

impl PageResult {
    pub fn extracted(task: PageTask, records: Vec<Record>) -> Self {
        Self {
            task,
            records,
            status: PageStatus::Extracted,
        }
    }

    /// Empty result standing in for a page that could not be fetched
    pub fn degraded(task: PageTask) -> Self {
        Self {
            task,
            records: Vec::new(),
            status: PageStatus::Degraded,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.status == PageStatus::Degraded
    }
}
