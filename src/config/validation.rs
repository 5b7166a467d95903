use crate::config::types::{
    ArticleConfig, Config, FetchConfig, NavigationConfig, OutputConfig, SiteConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Deepest depth marker a navigation root may carry
pub const MAX_ROOT_DEPTH: u32 = 1000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_navigation_config(&config.navigation)?;
    validate_article_config(&config.article)?;
    validate_fetch_config(&config.fetch)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Compiles a CSS selector, mapping parse failures to a configuration error
pub fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Validates the site section
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use HTTP or HTTPS",
            config.base_url
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' has no host",
            config.base_url
        )));
    }

    Ok(())
}

/// Validates navigation selectors
fn validate_navigation_config(config: &NavigationConfig) -> Result<(), ConfigError> {
    compile_selector(&config.container_selector)?;
    compile_selector(&config.item_selector)?;
    compile_selector(&config.anchor_selector)?;

    if config.depth_attribute.trim().is_empty() {
        return Err(ConfigError::Validation(
            "depth-attribute cannot be empty".to_string(),
        ));
    }

    if config.external_marker.trim().is_empty() {
        return Err(ConfigError::Validation(
            "external-marker cannot be empty".to_string(),
        ));
    }

    if config.root_depth > MAX_ROOT_DEPTH {
        return Err(ConfigError::Validation(format!(
            "root-depth must be at most {}, got {}",
            MAX_ROOT_DEPTH, config.root_depth
        )));
    }

    Ok(())
}

/// Validates article selectors
fn validate_article_config(config: &ArticleConfig) -> Result<(), ConfigError> {
    compile_selector(&config.container_selector)?;
    compile_selector(&config.title_selector)?;
    compile_selector(&config.breadcrumb_selector)?;
    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.batch_size < 1 || config.batch_size > 100 {
        return Err(ConfigError::Validation(format!(
            "batch-size must be between 1 and 100, got {}",
            config.batch_size
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > 600 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be between 1 and 600, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> Config {
        Config {
            site: SiteConfig {
                base_url: "https://docs.example.com/guide/".to_string(),
            },
            navigation: NavigationConfig::default(),
            article: ArticleConfig::default(),
            fetch: FetchConfig::default(),
            output: OutputConfig {
                directory: "./output".to_string(),
                timestamped: false,
            },
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&create_test_config()).is_ok());
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let mut config = create_test_config();
        config.site.base_url = "ftp://docs.example.com/".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));

        config.site.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_rejects_invalid_selector() {
        let mut config = create_test_config();
        config.article.container_selector = "article[".to_string();

        match validate(&config) {
            Err(ConfigError::InvalidSelector { selector, .. }) => {
                assert_eq!(selector, "article[");
            }
            other => panic!("expected InvalidSelector, got {:?}", other),
        }
    }

    #[test]
    fn test_batch_size_bounds() {
        let mut config = create_test_config();
        config.fetch.batch_size = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));

        config.fetch.batch_size = 101;
        assert!(validate(&config).is_err());

        config.fetch.batch_size = 100;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_rejects_empty_markers() {
        let mut config = create_test_config();
        config.navigation.depth_attribute = " ".to_string();
        assert!(validate(&config).is_err());

        let mut config = create_test_config();
        config.navigation.external_marker = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_root_depth_bound() {
        let mut config = create_test_config();
        config.navigation.root_depth = MAX_ROOT_DEPTH;
        assert!(validate(&config).is_ok());

        config.navigation.root_depth = u32::MAX;
        match validate(&config) {
            Err(ConfigError::Validation(message)) => assert!(message.contains("root-depth")),
            other => panic!("expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_empty_output_directory() {
        let mut config = create_test_config();
        config.output.directory = String::new();
        assert!(validate(&config).is_err());
    }
}
