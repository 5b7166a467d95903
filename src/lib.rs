//! Sumi-Scroll: a polite documentation site harvester
//!
//! This crate extracts the navigation tree of a documentation site, resolves every
//! navigation link against the site origin, then fetches each referenced article in
//! throttled batches and emits per-article records plus a combined index.

pub mod config;
pub mod crawler;
pub mod nav;
pub mod output;
pub mod url;

use crate::crawler::FetchFailure;
use thiserror::Error;

/// Main error type for Sumi-Scroll operations
#[derive(Debug, Error)]
pub enum ScrollError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch navigation page {url}: {source}")]
    NavFetch { url: String, source: FetchFailure },

    #[error("Failed to parse navigation page {url}: {message}")]
    NavParse { url: String, message: String },

    #[error("Malformed navigation item at depth {depth}: {snippet}")]
    MalformedNavNode { depth: u32, snippet: String },

    #[error("Failed to fetch document {url}: {source}")]
    DocumentFetch { url: String, source: FetchFailure },

    #[error("No article container matching '{selector}' in {url}")]
    MissingArticleContainer { url: String, selector: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),
}

impl ScrollError {
    /// Returns true if the error aborts the whole run.
    ///
    /// Only per-document failures are recoverable; they are captured as
    /// failed fetch results and never escape the batch scheduler.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::DocumentFetch { .. } | Self::MissingArticleContainer { .. }
        )
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(#[from] ::url::ParseError),

    #[error("URL has no host: {0}")]
    MissingHost(String),
}

/// Result type alias for Sumi-Scroll operations
pub type Result<T> = std::result::Result<T, ScrollError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{ArticleDoc, FetchResult, FetchTask};
pub use nav::NavNode;
pub use crate::url::{resolve_link, site_origin};
