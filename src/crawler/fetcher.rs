//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building an HTTP client with the fixed header policy
//! - GET requests for the navigation page and every article
//! - Classifying transport and status failures

use crate::config::FetchConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Why a single GET did not produce a page body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to read body: {0}")]
    Body(String),
}

impl FetchFailure {
    fn from_reqwest(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_connect() {
            Self::Connect(error.to_string())
        } else {
            Self::Network(error.to_string())
        }
    }
}

/// Builds an HTTP client with the configured user agent and timeout
///
/// Every request sends `Accept: text/html` and a browser-like `User-Agent`.
/// Redirects are followed with reqwest's default policy.
///
/// # Example
///
/// ```no_run
/// use sumi_scroll::config::FetchConfig;
/// use sumi_scroll::crawler::build_http_client;
///
/// let client = build_http_client(&FetchConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetchConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("text/html"));

    Client::builder()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns its body as text
///
/// | Condition            | Result                    |
/// |----------------------|---------------------------|
/// | 2xx                  | `Ok(body)`                |
/// | any other status     | `FetchFailure::Status`    |
/// | timeout              | `FetchFailure::Timeout`   |
/// | connection refused   | `FetchFailure::Connect`   |
/// | body read failure    | `FetchFailure::Body`      |
///
/// No retries are attempted.
pub async fn fetch_html(client: &Client, url: &str) -> Result<String, FetchFailure> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| FetchFailure::from_reqwest(&e))?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!("GET {} returned {}", url, status);
        return Err(FetchFailure::Status(status.as_u16()));
    }

    response
        .text()
        .await
        .map_err(|e| FetchFailure::Body(e.to_string()))
}
