//! Sumi-Scroll main entry point
//!
//! This is the command-line interface for the Sumi-Scroll documentation harvester.

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use std::path::PathBuf;
use sumi_scroll::config::{load_config_with_hash, Config};
use sumi_scroll::crawler::{run_crawl, run_navigation_only};
use sumi_scroll::output::print_statistics;
use tracing_subscriber::EnvFilter;

/// Sumi-Scroll: A polite documentation site harvester
///
/// Sumi-Scroll reads a documentation site's navigation menu, then fetches
/// every article it references in throttled batches and writes each article
/// plus a combined title index as JSON.
#[derive(Parser, Debug)]
#[command(name = "sumi-scroll")]
#[command(version = "1.0.0")]
#[command(about = "A polite documentation site harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show the effective settings without fetching anything
    #[arg(long, conflicts_with = "nav_only")]
    dry_run: bool,

    /// Fetch and write only the navigation tree
    #[arg(long, conflicts_with = "dry_run")]
    nav_only: bool,

    /// Override the output directory from the configuration
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let output_dir = resolve_output_dir(&config, cli.output.as_deref());

    if cli.dry_run {
        handle_dry_run(&config, &output_dir);
    } else if cli.nav_only {
        handle_nav_only(config, output_dir).await?;
    } else {
        handle_crawl(config, output_dir, &config_hash).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sumi_scroll=info,warn"),
            1 => EnvFilter::new("sumi_scroll=debug,info"),
            2 => EnvFilter::new("sumi_scroll=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Picks the run's output directory
///
/// The run-start timestamp is computed once here and passed down explicitly.
fn resolve_output_dir(config: &Config, cli_override: Option<&std::path::Path>) -> PathBuf {
    let base = cli_override
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(&config.output.directory));

    if config.output.timestamped {
        base.join(Local::now().format("%Y%m%d-%H%M%S").to_string())
    } else {
        base
    }
}

/// Handles the --dry-run mode: shows what a harvest would use
fn handle_dry_run(config: &Config, output_dir: &std::path::Path) {
    println!("=== Sumi-Scroll Dry Run ===\n");

    println!("Site:");
    println!("  Base URL: {}", config.site.base_url);

    println!("\nNavigation:");
    println!("  Container: {}", config.navigation.container_selector);
    println!("  Items: {}", config.navigation.item_selector);
    println!("  Anchor: {}", config.navigation.anchor_selector);
    println!(
        "  Depth marker: {} (root depth {})",
        config.navigation.depth_attribute, config.navigation.root_depth
    );
    println!("  External marker: {}", config.navigation.external_marker);

    println!("\nArticle:");
    println!("  Container: {}", config.article.container_selector);
    println!("  Title: {}", config.article.title_selector);
    println!(
        "  Breadcrumbs: {} (joined with {:?})",
        config.article.breadcrumb_selector, config.article.breadcrumb_separator
    );

    println!("\nFetch:");
    println!("  Batch size: {}", config.fetch.batch_size);
    println!("  Inter-batch delay: {}ms", config.fetch.inter_batch_delay_ms);
    println!("  Request timeout: {}s", config.fetch.request_timeout_secs);
    println!("  User agent: {}", config.fetch.user_agent);

    println!("\nOutput:");
    println!("  Directory: {}", output_dir.display());

    println!("\n✓ Configuration is valid");
}

/// Handles the --nav-only mode: writes navigation.json and reports the plan
async fn handle_nav_only(config: Config, output_dir: PathBuf) -> anyhow::Result<()> {
    let (tree, task_count) = run_navigation_only(config, output_dir.clone())
        .await
        .context("Navigation harvest failed")?;

    println!(
        "✓ Navigation tree with {} entries written to {}",
        tree.node_count() - 1,
        output_dir.join("navigation.json").display()
    );
    println!("✓ A full harvest would fetch {} documents", task_count);

    Ok(())
}

/// Handles the main harvest operation
async fn handle_crawl(
    config: Config,
    output_dir: PathBuf,
    config_hash: &str,
) -> anyhow::Result<()> {
    tracing::info!("Writing harvest to {}", output_dir.display());

    match run_crawl(config, output_dir, config_hash).await {
        Ok(stats) => {
            print_statistics(&stats);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            Err(e).context("Harvest aborted")
        }
    }
}
