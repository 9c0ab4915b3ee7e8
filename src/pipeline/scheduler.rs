//! Bounded scheduler for page tasks
//!
//! This module handles:
//! - Enumerating the page range in ascending order
//! - Global concurrency limiting via an owned-permit semaphore
//! - Running fetch-then-extract for each page on its own task
//! - Degrading pages whose fetch failed to empty results
//! - Reassembling results in page order

use crate::config::Config;
use crate::model::{FetchOutcome, PageResult, PageTask};
use crate::pipeline::extractor::Extractor;
use crate::pipeline::fetcher::{PageSource, RetryPolicy, RetryingFetcher};
use crate::pipeline::page_urls::PageUrls;
use crate::ScrapeError;
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinSet;

/// Tracks how many tasks hold a permit, and the most that ever did at once
#[derive(Debug, Default)]
struct InFlight {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl InFlight {
    fn enter(self: &Arc<Self>) -> InFlightGuard {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        InFlightGuard(Arc::clone(self))
    }
}

struct InFlightGuard(Arc<InFlight>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.current.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Runs one fetch-and-extract task per page under a fixed permit budget
///
/// Each task holds its permit from admission until its result is resolved,
/// including any retry delays. Pages are admitted in ascending order; they
/// may finish in any order.
pub struct Scheduler {
    fetcher: RetryingFetcher,
    extractor: Arc<Extractor>,
    urls: PageUrls,
    concurrency_limit: usize,
    global_semaphore: Arc<Semaphore>,
    in_flight: Arc<InFlight>,
}

impl Scheduler {
    /// Creates a new scheduler
    ///
    /// A `concurrency_limit` of zero is treated as one.
    pub fn new(
        fetcher: RetryingFetcher,
        extractor: Extractor,
        urls: PageUrls,
        concurrency_limit: usize,
    ) -> Self {
        let concurrency_limit = concurrency_limit.max(1);

        Self {
            fetcher,
            extractor: Arc::new(extractor),
            urls,
            concurrency_limit,
            global_semaphore: Arc::new(Semaphore::new(concurrency_limit)),
            in_flight: Arc::new(InFlight::default()),
        }
    }

    /// Creates a scheduler for `config` that fetches through `source`
    pub fn from_config(config: &Config, source: Arc<dyn PageSource>) -> Result<Self, ScrapeError> {
        let fetcher = RetryingFetcher::new(source, RetryPolicy::from_config(&config.fetcher));
        let extractor = Extractor::new().map_err(|e| ScrapeError::Selector(e.to_string()))?;
        let urls = PageUrls::parse(&config.source.base_url)?;

        Ok(Self::new(
            fetcher,
            extractor,
            urls,
            config.fetcher.concurrency_limit as usize,
        ))
    }

    pub fn concurrency_limit(&self) -> usize {
        self.concurrency_limit
    }

    /// Highest number of tasks that held a permit at the same time so far
    pub fn peak_in_flight(&self) -> usize {
        self.in_flight.peak.load(Ordering::SeqCst)
    }

    /// Fetches and extracts pages `1..=page_count`
    ///
    /// Returns exactly one [`PageResult`] per page, ordered by page number.
    /// Pages that fail every attempt are returned as degraded, empty results.
    ///
    /// # Errors
    ///
    /// A task that panics aborts the whole run with [`ScrapeError::TaskFailed`]
    /// as soon as it is observed. No further pages are admitted and the
    /// remaining tasks are cancelled.
    pub async fn run(&self, page_count: u32) -> Result<Vec<PageResult>, ScrapeError> {
        let mut slots: Vec<Option<PageResult>> = (0..page_count).map(|_| None).collect();
        let mut tasks: JoinSet<Result<PageResult, ScrapeError>> = JoinSet::new();
        let mut pages = PageTask::range(page_count);
        let mut next = pages.next();

        tracing::info!(
            "Scheduling {} pages with concurrency limit {}",
            page_count,
            self.concurrency_limit
        );

        loop {
            tokio::select! {
                biased;

                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    let result = joined??;
                    let task = result.task;

                    match slots.get_mut(task.slot()) {
                        Some(entry) => *entry = Some(result),
                        None => {
                            return Err(ScrapeError::TaskFailed {
                                page: task.page,
                                message: format!("outside the range 1..={}", page_count),
                            })
                        }
                    }
                }

                // Admission happens here, in page order
                acquired = self.global_semaphore.clone().acquire_owned(), if next.is_some() => {
                    match (acquired, next.take()) {
                        (Ok(permit), Some(task)) => {
                            self.spawn_page(&mut tasks, task, permit);
                            next = pages.next();
                        }
                        (Err(_), _) => {
                            tracing::warn!("Permit pool closed, admitting no further pages");
                        }
                        (Ok(_), None) => {}
                    }
                }

                else => break,
            }
        }

        slots
            .into_iter()
            .zip(PageTask::range(page_count))
            .map(|(slot, task)| {
                slot.ok_or_else(|| ScrapeError::TaskFailed {
                    page: task.page,
                    message: "produced no result".to_string(),
                })
            })
            .collect()
    }

    /// Spawns the fetch-and-extract task for `task`, holding `permit` until it ends
    fn spawn_page(
        &self,
        tasks: &mut JoinSet<Result<PageResult, ScrapeError>>,
        task: PageTask,
        permit: OwnedSemaphorePermit,
    ) {
        let fetcher = self.fetcher.clone();
        let extractor = Arc::clone(&self.extractor);
        let in_flight = Arc::clone(&self.in_flight);
        let semaphore = Arc::clone(&self.global_semaphore);
        let url = self.urls.url_for(task.page);

        tasks.spawn(async move {
            let _permit = permit;
            let _guard = in_flight.enter();

            let work = async {
                tracing::debug!("Starting {} ({})", task, url);
                let outcome = match fetcher.fetch(url.as_str()).await {
                    Ok(content) => FetchOutcome::Fetched { task, content },
                    Err(error) => FetchOutcome::Failed { task, error },
                };

                resolve(&extractor, outcome)
            };

            AssertUnwindSafe(work).catch_unwind().await.map_err(|payload| {
                // Closed while this task still holds its permit
                semaphore.close();
                ScrapeError::TaskFailed {
                    page: task.page,
                    message: panic_message(payload.as_ref()),
                }
            })
        });
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "task panicked".to_string()
    }
}

/// Turns a fetch outcome into the page's result
///
/// This is the only place a failed page is degraded.
fn resolve(extractor: &Extractor, outcome: FetchOutcome) -> PageResult {
    let task = outcome.task();

    match outcome {
        FetchOutcome::Fetched { content, .. } => {
            let records = extractor.extract(&content);
            if records.is_empty() {
                tracing::info!("{} has no table rows", task);
            } else {
                tracing::debug!("{} yielded {} records", task, records.len());
            }
            for record in &records {
                tracing::trace!("{}: {}", task, record);
            }
            PageResult::extracted(task, records)
        }
        FetchOutcome::Failed { error, .. } => {
            tracing::error!("Error scraping {}, contributing no records: {}", task, error);
            PageResult::degraded(task)
        }
    }
}
