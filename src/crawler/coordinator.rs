//! Harvest coordinator - main orchestration logic
//!
//! This module drives one harvest run:
//! - Fetching and extracting the navigation tree (fatal on failure)
//! - Resolving navigation links and flattening them into fetch tasks
//! - Fetching articles through the batch scheduler
//! - Aggregating results and handing them to the output handler

use crate::config::Config;
use crate::crawler::article::{ArticleDoc, ArticleExtractor};
use crate::crawler::fetcher::{build_http_client, fetch_html};
use crate::crawler::scheduler::{BatchScheduler, FetchResult, FetchTask};
use crate::nav::{collect_fetch_tasks, resolve_tree, NavExtractor, NavNode};
use crate::output::{
    aggregate, CrawlStatistics, JsonOutputHandler, OutputHandler, ProgressTracker, RunManifest,
};
use crate::url::{shares_origin, site_origin};
use crate::ScrollError;
use chrono::Utc;
use reqwest::Client;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Main harvest coordinator structure
pub struct Coordinator {
    config: Config,
    client: Client,
    origin: String,
    navigation: NavExtractor,
    article: ArticleExtractor,
    scheduler: BatchScheduler,
}

impl Coordinator {
    /// Creates a coordinator from a validated configuration
    ///
    /// Compiles every selector and builds the HTTP client up front, so a run
    /// never fails halfway on configuration problems.
    pub fn new(config: Config) -> Result<Self, ScrollError> {
        let origin = site_origin(&config.site.base_url)?;
        let client = build_http_client(&config.fetch)?;
        let navigation = NavExtractor::new(&config.navigation)?;
        let article = ArticleExtractor::new(&config.article)?;
        let scheduler = BatchScheduler::new(
            config.fetch.batch_size,
            Duration::from_millis(config.fetch.inter_batch_delay_ms),
        );

        Ok(Self {
            config,
            client,
            origin,
            navigation,
            article,
            scheduler,
        })
    }

    /// Fetches the navigation page and returns the resolved tree
    ///
    /// Any failure here is fatal: there is no partial navigation result.
    pub async fn fetch_navigation(&self) -> Result<NavNode, ScrollError> {
        let base_url = &self.config.site.base_url;
        tracing::info!("Fetching navigation from {}", base_url);

        let body = fetch_html(&self.client, base_url)
            .await
            .map_err(|source| ScrollError::NavFetch {
                url: base_url.clone(),
                source,
            })?;

        let mut tree = self.navigation.extract_document(&body, base_url)?;
        resolve_tree(&mut tree, &self.origin);

        tracing::info!(
            "Navigation tree has {} nodes ({} top-level entries)",
            tree.node_count() - 1,
            tree.children.len()
        );
        Ok(tree)
    }

    /// Flattens a resolved tree into fetch tasks
    pub fn plan(&self, tree: &NavNode) -> Vec<FetchTask> {
        let tasks = collect_fetch_tasks(tree);
        for task in tasks.iter().filter(|t| !shares_origin(&t.url, &self.origin)) {
            tracing::debug!("In-domain entry points off-site: {}", task.url);
        }
        tasks
    }

    /// Fetches and extracts a single article
    pub async fn fetch_article(&self, url: String) -> Result<ArticleDoc, ScrollError> {
        let body = fetch_html(&self.client, &url)
            .await
            .map_err(|source| ScrollError::DocumentFetch {
                url: url.clone(),
                source,
            })?;

        self.article.extract(&body, &url)
    }

    /// Fetches every task through the batch scheduler
    pub async fn harvest(&self, tasks: &[FetchTask]) -> Vec<FetchResult> {
        tracing::info!(
            "Harvesting {} documents in batches of {}",
            tasks.len(),
            self.scheduler.batch_size()
        );

        let mut progress = ProgressTracker::new(tasks.len());
        self.scheduler
            .run(
                tasks,
                |url| self.fetch_article(url),
                |completed| progress.record(completed),
            )
            .await
    }

    /// Runs a complete harvest and writes every output document
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlStatistics)` - The run finished; some documents may have failed
    /// * `Err(ScrollError)` - A fatal error aborted the run
    pub async fn run(
        &self,
        output: &dyn OutputHandler,
        output_dir: &Path,
        config_hash: &str,
    ) -> Result<CrawlStatistics, ScrollError> {
        let started_at = Utc::now();
        let start_time = Instant::now();

        let tree = self.fetch_navigation().await?;
        output.write_navigation(&tree)?;

        let tasks = self.plan(&tree);
        let results = self.harvest(&tasks).await;
        let aggregate = aggregate(results);

        output.write_index(&aggregate.index)?;
        for (i, doc) in aggregate.documents.iter().enumerate() {
            output.write_article(i + 1, doc)?;
        }
        output.write_failures(&aggregate.failures)?;

        if aggregate.title_collisions() > 0 {
            tracing::warn!(
                "{} articles share a title with a later article and were overwritten in the index",
                aggregate.title_collisions()
            );
        }

        output.write_manifest(&RunManifest {
            base_url: self.config.site.base_url.clone(),
            config_hash: config_hash.to_string(),
            started_at,
            finished_at: Utc::now(),
            batch_size: self.scheduler.batch_size(),
            navigation_nodes: tree.node_count(),
            task_count: tasks.len(),
            success_count: aggregate.success_count(),
            failure_count: aggregate.failure_count(),
        })?;

        let stats = CrawlStatistics {
            navigation_nodes: tree.node_count(),
            tasks: tasks.len(),
            successes: aggregate.success_count(),
            failures: aggregate.failure_count(),
            index_entries: aggregate.index.len(),
            duration: start_time.elapsed(),
            output_dir: output_dir.to_path_buf(),
        };

        tracing::info!(
            "Harvest completed: {} of {} documents in {:?}",
            stats.successes,
            stats.tasks,
            stats.duration
        );

        Ok(stats)
    }
}

/// Runs a complete harvest into a JSON output directory
///
/// This is the main entry point for starting a harvest. It will:
/// 1. Build the HTTP client and compile selectors
/// 2. Fetch and resolve the navigation tree
/// 3. Fetch every in-domain document in throttled batches
/// 4. Write navigation, index, articles, failures and manifest
pub async fn run_crawl(
    config: Config,
    output_dir: PathBuf,
    config_hash: &str,
) -> Result<CrawlStatistics, ScrollError> {
    let coordinator = Coordinator::new(config)?;
    let output = JsonOutputHandler::new(&output_dir)?;
    coordinator.run(&output, &output_dir, config_hash).await
}

/// Fetches only the navigation tree and writes `navigation.json`
///
/// Returns the tree together with the number of documents a full run would fetch.
pub async fn run_navigation_only(
    config: Config,
    output_dir: PathBuf,
) -> Result<(NavNode, usize), ScrollError> {
    let coordinator = Coordinator::new(config)?;
    let output = JsonOutputHandler::new(&output_dir)?;

    let tree = coordinator.fetch_navigation().await?;
    output.write_navigation(&tree)?;
    let task_count = coordinator.plan(&tree).len();

    Ok((tree, task_count))
}
