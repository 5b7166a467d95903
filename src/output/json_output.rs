//! JSON file output handler
//!
//! Layout of an output directory:
//!
//! ```text
//! <dir>/navigation.json
//! <dir>/index.json
//! <dir>/failures.json
//! <dir>/manifest.json
//! <dir>/articles/001-<title>.json
//! ```

use crate::crawler::ArticleDoc;
use crate::nav::NavNode;
use crate::output::aggregate::{AggregateIndex, FailedDocument};
use crate::output::traits::{OutputHandler, OutputResult, RunManifest};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const MAX_FILENAME_TITLE: usize = 80;

/// Writes harvest products as pretty-printed JSON files
#[derive(Debug, Clone)]
pub struct JsonOutputHandler {
    directory: PathBuf,
}

impl JsonOutputHandler {
    /// Creates the handler and its directory tree
    pub fn new(directory: impl Into<PathBuf>) -> OutputResult<Self> {
        let directory = directory.into();
        fs::create_dir_all(directory.join("articles"))?;
        Ok(Self { directory })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the article file for a 1-based sequence number
    pub fn article_path(&self, sequence: usize, doc: &ArticleDoc) -> PathBuf {
        self.directory.join("articles").join(format!(
            "{:03}-{}.json",
            sequence,
            sanitize_filename(&doc.title)
        ))
    }

    fn write_json<T: Serialize + ?Sized>(&self, path: &Path, value: &T) -> OutputResult<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json)?;
        tracing::debug!("Wrote {}", path.display());
        Ok(())
    }
}

impl OutputHandler for JsonOutputHandler {
    fn write_navigation(&self, tree: &NavNode) -> OutputResult<()> {
        self.write_json(&self.directory.join("navigation.json"), tree)
    }

    fn write_index(&self, index: &AggregateIndex) -> OutputResult<()> {
        self.write_json(&self.directory.join("index.json"), index)
    }

    fn write_article(&self, sequence: usize, doc: &ArticleDoc) -> OutputResult<()> {
        self.write_json(&self.article_path(sequence, doc), doc)
    }

    fn write_failures(&self, failures: &[FailedDocument]) -> OutputResult<()> {
        self.write_json(&self.directory.join("failures.json"), failures)
    }

    fn write_manifest(&self, manifest: &RunManifest) -> OutputResult<()> {
        self.write_json(&self.directory.join("manifest.json"), manifest)
    }
}

/// Turns an article title into a file-name-safe fragment
///
/// Keeps ASCII alphanumerics, `-` and `_`; every other run of characters
/// becomes a single `_`. The result is trimmed of `_`, capped at 80 characters
/// and never empty.
///
/// # Examples
///
/// ```
/// use sumi_scroll::output::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Getting Started: Install"), "Getting_Started_Install");
/// assert_eq!(sanitize_filename("???"), "untitled");
/// ```
pub fn sanitize_filename(title: &str) -> String {
    let mut sanitized = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            if pending_separator && !sanitized.is_empty() {
                sanitized.push('_');
            }
            pending_separator = false;
            sanitized.push(c);
        } else {
            pending_separator = true;
        }
    }

    let truncated: String = sanitized.chars().take(MAX_FILENAME_TITLE).collect();
    let trimmed = truncated.trim_matches('_');
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}
