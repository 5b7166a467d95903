//! Output handler traits and types
//!
//! This module defines the trait interface for output handlers and the run
//! manifest written alongside the harvested documents.

use crate::crawler::ArticleDoc;
use crate::nav::NavNode;
use crate::output::aggregate::{AggregateIndex, FailedDocument};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize output: {0}")]
    Format(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Metadata describing one harvest run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub base_url: String,
    pub config_hash: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub batch_size: usize,
    pub navigation_nodes: usize,
    pub task_count: usize,
    pub success_count: usize,
    pub failure_count: usize,
}

/// Persists the products of a harvest
///
/// Implementations decide where and how documents are stored; the
/// coordinator only decides what is written and in which order.
pub trait OutputHandler {
    /// Writes the resolved navigation tree
    fn write_navigation(&self, tree: &NavNode) -> OutputResult<()>;

    /// Writes the combined title-keyed index
    fn write_index(&self, index: &AggregateIndex) -> OutputResult<()>;

    /// Writes one article; `sequence` is 1-based in task order
    fn write_article(&self, sequence: usize, doc: &ArticleDoc) -> OutputResult<()>;

    /// Writes the list of documents that could not be harvested
    fn write_failures(&self, failures: &[FailedDocument]) -> OutputResult<()>;

    /// Writes the run manifest
    fn write_manifest(&self, manifest: &RunManifest) -> OutputResult<()>;
}
