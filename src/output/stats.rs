//! Harvest statistics and progress reporting
//!
//! Progress is reported through log events; rendering a terminal progress bar
//! is left to whoever consumes those events.

use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Log a progress line every this many settled documents
const PROGRESS_LOG_INTERVAL: usize = 10;

/// Tracks settled documents for the scheduler's progress callback
#[derive(Debug)]
pub struct ProgressTracker {
    total: usize,
    completed: usize,
    started: Instant,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            completed: 0,
            started: Instant::now(),
        }
    }

    /// Records the scheduler's completion counter
    pub fn record(&mut self, completed: usize) {
        self.completed = completed;

        if completed % PROGRESS_LOG_INTERVAL == 0 || completed == self.total {
            let elapsed = self.started.elapsed().as_secs_f64();
            let rate = if elapsed > 0.0 {
                completed as f64 / elapsed
            } else {
                0.0
            };
            tracing::info!(
                "Progress: {}/{} documents ({:.1}%), {:.2} docs/sec",
                completed,
                self.total,
                self.percent(),
                rate
            );
        }
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.completed as f64 / self.total as f64) * 100.0
        }
    }
}

/// Summary of a completed harvest
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Nodes in the navigation tree, including the synthetic root
    pub navigation_nodes: usize,

    /// Documents scheduled for fetching
    pub tasks: usize,

    pub successes: usize,
    pub failures: usize,

    /// Distinct titles in the combined index
    pub index_entries: usize,

    pub duration: Duration,

    pub output_dir: PathBuf,
}

impl CrawlStatistics {
    pub fn success_rate(&self) -> f64 {
        if self.tasks == 0 {
            0.0
        } else {
            (self.successes as f64 / self.tasks as f64) * 100.0
        }
    }

    /// Articles whose index slot was taken by a later article with the same title
    pub fn title_collisions(&self) -> usize {
        self.successes.saturating_sub(self.index_entries)
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Harvest Statistics ===\n");

    println!("Overview:");
    println!("  Navigation nodes: {}", stats.navigation_nodes);
    println!("  Documents scheduled: {}", stats.tasks);
    println!("  Harvested: {}", stats.successes);
    println!("  Failed: {}", stats.failures);
    println!("  Index entries: {}", stats.index_entries);
    if stats.title_collisions() > 0 {
        println!(
            "  Title collisions (overwritten in index): {}",
            stats.title_collisions()
        );
    }
    println!("  Duration: {:.1}s", stats.duration.as_secs_f64());
    println!();

    println!(
        "Success Rate: {:.1}% ({} / {} documents harvested)",
        stats.success_rate(),
        stats.successes,
        stats.tasks
    );
    println!("Output: {}", stats.output_dir.display());
}
