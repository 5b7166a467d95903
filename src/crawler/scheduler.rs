//! Batch scheduler for document fetching
//!
//! This module handles:
//! - Partitioning the task list into consecutive fixed-size batches
//! - Running every fetch of a batch concurrently, then waiting for all of them
//! - Isolating per-task failures (errors and panics) as failed results
//! - Progress accounting and throttling between batches
//!
//! All fetches of a batch are polled from the calling task. Nothing is spawned,
//! so the completion counter and the result slots need no locking.

use crate::crawler::ArticleDoc;
use crate::ScrollError;
use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

/// An absolute URL queued for document retrieval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTask {
    pub url: String,
}

impl FetchTask {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Outcome of one fetch task; exactly one is produced per task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    Success { url: String, doc: ArticleDoc },
    Failure { url: String, error: String },
}

impl FetchResult {
    pub fn url(&self) -> &str {
        match self {
            Self::Success { url, .. } | Self::Failure { url, .. } => url,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Returns the size of every batch for `total` tasks
///
/// All batches hold `batch_size` tasks except possibly the last one.
pub fn batch_sizes(total: usize, batch_size: usize) -> Vec<usize> {
    let batch_size = batch_size.max(1);
    (0..total)
        .step_by(batch_size)
        .map(|start| batch_size.min(total - start))
        .collect()
}

/// Drives bounded-concurrency fetching of a flat task list
#[derive(Debug, Clone)]
pub struct BatchScheduler {
    batch_size: usize,
    inter_batch_delay: Duration,
}

impl BatchScheduler {
    /// Creates a scheduler; a batch size of zero is treated as one
    pub fn new(batch_size: usize, inter_batch_delay: Duration) -> Self {
        Self {
            batch_size: batch_size.max(1),
            inter_batch_delay,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Fetches every task, batch by batch
    ///
    /// # Guarantees
    ///
    /// - Batch N+1 starts only after every fetch of batch N has settled
    /// - `on_progress` receives 1, 2, ..., N as tasks settle, whatever their outcome
    /// - A failing or panicking fetch becomes a `Failure` and affects nothing else
    /// - The delay is applied between batches only, never after the last one
    /// - Results follow task order, not completion order
    ///
    /// No timeout is applied here; a fetch that never completes stalls its
    /// batch. `fetch_one` must bound its own latency when that matters.
    pub async fn run<F, Fut, P>(
        &self,
        tasks: &[FetchTask],
        fetch_one: F,
        mut on_progress: P,
    ) -> Vec<FetchResult>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Result<ArticleDoc, ScrollError>>,
        P: FnMut(usize),
    {
        let mut slots: Vec<Option<FetchResult>> = vec![None; tasks.len()];
        let mut completed = 0usize;
        let batch_count = batch_sizes(tasks.len(), self.batch_size).len();

        let fetch_one = &fetch_one;

        for (batch_index, batch) in tasks.chunks(self.batch_size).enumerate() {
            let offset = batch_index * self.batch_size;
            tracing::debug!(
                "Starting batch {}/{} ({} documents)",
                batch_index + 1,
                batch_count,
                batch.len()
            );

            let mut in_flight: FuturesUnordered<_> = batch
                .iter()
                .enumerate()
                .map(|(i, task)| {
                    let url = task.url.clone();
                    let fetch =
                        AssertUnwindSafe(async move { fetch_one(url).await }).catch_unwind();
                    async move { (offset + i, fetch.await) }
                })
                .collect();

            while let Some((index, outcome)) = in_flight.next().await {
                let url = tasks[index].url.clone();
                let result = match outcome {
                    Ok(Ok(doc)) => FetchResult::Success { url, doc },
                    Ok(Err(e)) => {
                        tracing::warn!("Failed to harvest {}: {}", url, e);
                        FetchResult::Failure {
                            url,
                            error: e.to_string(),
                        }
                    }
                    Err(_) => {
                        tracing::warn!("Fetch task for {} panicked", url);
                        FetchResult::Failure {
                            url,
                            error: "fetch task panicked".to_string(),
                        }
                    }
                };
                slots[index] = Some(result);

                completed += 1;
                on_progress(completed);
            }

            if batch_index + 1 < batch_count && !self.inter_batch_delay.is_zero() {
                tokio::time::sleep(self.inter_batch_delay).await;
            }
        }

        slots.into_iter().flatten().collect()
    }
}
