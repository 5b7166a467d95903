//! Crawler module for navigation and document harvesting
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching with a fixed header policy
//! - Article extraction from fetched pages
//! - Bounded-concurrency batch scheduling
//! - Overall harvest coordination

mod article;
mod coordinator;
mod fetcher;
mod scheduler;

pub use article::{extract_article, ArticleDoc, ArticleExtractor};
pub use coordinator::{run_crawl, run_navigation_only, Coordinator};
pub use fetcher::{build_http_client, fetch_html, FetchFailure};
pub use scheduler::{batch_sizes, BatchScheduler, FetchResult, FetchTask};
