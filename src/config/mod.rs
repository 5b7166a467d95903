//! Configuration module for Sumi-Scroll
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use sumi_scroll::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Documents per batch: {}", config.fetch.batch_size);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ArticleConfig, Config, FetchConfig, NavigationConfig, OutputConfig, SiteConfig,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{compile_selector, validate, MAX_ROOT_DEPTH};
