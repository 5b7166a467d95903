//! Article extraction
//!
//! Pure transform from a fetched article page to an [`ArticleDoc`]. No I/O.

use crate::config::{compile_selector, ArticleConfig};
use crate::{ConfigError, ScrollError};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

/// A parsed documentation article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleDoc {
    pub url: String,
    pub title: String,
    /// Ancestor section labels joined with the configured separator
    pub breadcrumbs: String,
    /// Inner markup of the article container, kept verbatim
    pub content: String,
}

/// Compiled selectors for article pages
#[derive(Debug, Clone)]
pub struct ArticleExtractor {
    container: Selector,
    container_source: String,
    title: Selector,
    breadcrumb: Selector,
    page_title: Selector,
    separator: String,
}

impl ArticleExtractor {
    pub fn new(config: &ArticleConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            container: compile_selector(&config.container_selector)?,
            container_source: config.container_selector.clone(),
            title: compile_selector(&config.title_selector)?,
            breadcrumb: compile_selector(&config.breadcrumb_selector)?,
            page_title: compile_selector("title")?,
            separator: config.breadcrumb_separator.clone(),
        })
    }

    /// Extracts an article from a fetched page
    ///
    /// The title is the trimmed text of the title selector inside the article
    /// container, falling back to the document `<title>`, then to an empty
    /// string. Breadcrumb segments are searched in the whole document.
    ///
    /// # Returns
    ///
    /// * `Ok(ArticleDoc)` - The extracted article
    /// * `Err(ScrollError::MissingArticleContainer)` - No article container
    pub fn extract(&self, html: &str, url: &str) -> Result<ArticleDoc, ScrollError> {
        let document = Html::parse_document(html);

        let container = document.select(&self.container).next().ok_or_else(|| {
            ScrollError::MissingArticleContainer {
                url: url.to_string(),
                selector: self.container_source.clone(),
            }
        })?;

        let title = container
            .select(&self.title)
            .next()
            .map(|element| normalize_text(&element.text().collect::<String>()))
            .filter(|text| !text.is_empty())
            .or_else(|| {
                document
                    .select(&self.page_title)
                    .next()
                    .map(|element| normalize_text(&element.text().collect::<String>()))
            })
            .unwrap_or_default();

        let breadcrumbs = document
            .select(&self.breadcrumb)
            .map(|segment| normalize_text(&segment.text().collect::<String>()))
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join(&self.separator);

        Ok(ArticleDoc {
            url: url.to_string(),
            title,
            breadcrumbs,
            content: container.inner_html(),
        })
    }
}

fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Convenience wrapper: compiles selectors and extracts in one call
pub fn extract_article(
    html: &str,
    url: &str,
    config: &ArticleConfig,
) -> Result<ArticleDoc, ScrollError> {
    ArticleExtractor::new(config)?.extract(html, url)
}
