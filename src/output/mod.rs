//! Output module for harvest results
//!
//! This module handles:
//! - Aggregating fetch results into the combined index
//! - Writing navigation, index, article and run documents
//! - Progress accounting and harvest statistics

mod aggregate;
mod json_output;
pub mod stats;
mod traits;

pub use aggregate::{aggregate, Aggregate, AggregateIndex, FailedDocument, IndexEntry};
pub use json_output::{sanitize_filename, JsonOutputHandler};
pub use stats::{print_statistics, CrawlStatistics, ProgressTracker};
pub use traits::{OutputError, OutputHandler, OutputResult, RunManifest};
