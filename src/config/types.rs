use serde::Deserialize;

/// Browser-like user agent sent with every request unless overridden
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Main configuration structure for Sumi-Scroll
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub site: SiteConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub article: ArticleConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    pub output: OutputConfig,
}

/// The documentation site to harvest
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Page holding the navigation menu; its origin is the base for relative links
    #[serde(rename = "base-url")]
    pub base_url: String,
}

/// Selectors describing the navigation menu structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Element enclosing the whole navigation menu
    #[serde(rename = "container-selector")]
    pub container_selector: String,

    /// Navigation item elements (one per menu entry)
    #[serde(rename = "item-selector")]
    pub item_selector: String,

    /// Primary anchor inside an item
    #[serde(rename = "anchor-selector")]
    pub anchor_selector: String,

    /// Attribute carrying an item's structural depth
    #[serde(rename = "depth-attribute")]
    pub depth_attribute: String,

    /// Class or attribute marking an anchor as leaving the site
    #[serde(rename = "external-marker")]
    pub external_marker: String,

    /// Depth assigned to the synthetic root
    #[serde(rename = "root-depth")]
    pub root_depth: u32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            container_selector: "nav".to_string(),
            item_selector: "li".to_string(),
            anchor_selector: "a".to_string(),
            depth_attribute: "data-depth".to_string(),
            external_marker: "external".to_string(),
            root_depth: 1,
        }
    }
}

/// Selectors describing an article page
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArticleConfig {
    #[serde(rename = "container-selector")]
    pub container_selector: String,

    #[serde(rename = "title-selector")]
    pub title_selector: String,

    #[serde(rename = "breadcrumb-selector")]
    pub breadcrumb_selector: String,

    #[serde(rename = "breadcrumb-separator")]
    pub breadcrumb_separator: String,
}

impl Default for ArticleConfig {
    fn default() -> Self {
        Self {
            container_selector: "article".to_string(),
            title_selector: "h1".to_string(),
            breadcrumb_selector: ".breadcrumb li".to_string(),
            breadcrumb_separator: " > ".to_string(),
        }
    }
}

/// Batch fetching behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Maximum number of documents fetched concurrently
    #[serde(rename = "batch-size")]
    pub batch_size: usize,

    /// Pause between consecutive batches (milliseconds)
    #[serde(rename = "inter-batch-delay-ms")]
    pub inter_batch_delay_ms: u64,

    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            inter_batch_delay_ms: 1000,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving the JSON documents
    pub directory: String,

    /// Write into a subdirectory named after the run start time
    #[serde(default = "default_timestamped")]
    pub timestamped: bool,
}

fn default_timestamped() -> bool {
    true
}
