//! Navigation tree extraction
//!
//! This module turns the navigation menu of a documentation page into a
//! [`NavNode`] tree. Every item carries a depth marker attribute; extraction
//! trusts that marker and only descends into items marked `depth + 1`.

use crate::config::{compile_selector, NavigationConfig};
use crate::nav::NavNode;
use crate::{ConfigError, ScrollError};
use scraper::{ElementRef, Html, Selector};

const SNIPPET_LEN: usize = 120;

/// Extracts navigation trees using a compiled set of selectors
#[derive(Debug, Clone)]
pub struct NavExtractor {
    container: Selector,
    item: Selector,
    anchor: Selector,
    depth_attribute: String,
    external_marker: String,
    root_depth: u32,
}

impl NavExtractor {
    /// Compiles the navigation selectors from configuration
    pub fn new(config: &NavigationConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            container: compile_selector(&config.container_selector)?,
            item: compile_selector(&config.item_selector)?,
            anchor: compile_selector(&config.anchor_selector)?,
            depth_attribute: config.depth_attribute.clone(),
            external_marker: config.external_marker.clone(),
            root_depth: config.root_depth,
        })
    }

    /// Parses a navigation page and extracts its tree
    ///
    /// # Arguments
    ///
    /// * `html` - The navigation page markup
    /// * `page_url` - URL the markup was fetched from (for error reporting)
    ///
    /// # Returns
    ///
    /// * `Ok(NavNode)` - The synthetic root with the menu as its children
    /// * `Err(ScrollError::NavParse)` - No navigation container on the page
    /// * `Err(ScrollError::MalformedNavNode)` - An item without a primary anchor
    pub fn extract_document(&self, html: &str, page_url: &str) -> Result<NavNode, ScrollError> {
        let document = Html::parse_document(html);

        let container = document
            .select(&self.container)
            .next()
            .ok_or_else(|| ScrollError::NavParse {
                url: page_url.to_string(),
                message: "navigation container not found".to_string(),
            })?;

        self.extract_root(container)
    }

    /// Builds the synthetic root from the navigation container element
    pub fn extract_root(&self, container: ElementRef<'_>) -> Result<NavNode, ScrollError> {
        let child_depth = next_depth(self.root_depth, container)?;
        let children = self
            .child_items(container, child_depth, true)
            .into_iter()
            .map(|item| self.extract(item, child_depth))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NavNode::root(self.root_depth, children))
    }

    /// Extracts one navigation item and, recursively, its children
    ///
    /// Children are the items marked `depth + 1` that belong to this item.
    /// An item without any such children is a leaf.
    pub fn extract(&self, item: ElementRef<'_>, depth: u32) -> Result<NavNode, ScrollError> {
        let anchor = self
            .primary_anchor(item)
            .ok_or_else(|| ScrollError::MalformedNavNode {
                depth,
                snippet: snippet(&item.html()),
            })?;

        let title = collapse_whitespace(&anchor.text().collect::<String>());
        let href = anchor.value().attr("href").unwrap_or("").trim().to_string();
        let is_external = self.is_external(anchor);

        let child_depth = next_depth(depth, item)?;
        let children = self
            .child_items(item, child_depth, false)
            .into_iter()
            .map(|child| self.extract(child, child_depth))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(NavNode {
            title,
            href,
            is_external,
            depth,
            children,
        })
    }

    /// Finds the first anchor owned by `item` (not by a nested item)
    fn primary_anchor<'a>(&self, item: ElementRef<'a>) -> Option<ElementRef<'a>> {
        item.select(&self.anchor)
            .find(|anchor| self.enclosing_item(*anchor) == Some(item))
    }

    /// Items marked `child_depth` whose nearest enclosing item is `parent`
    ///
    /// For the root container, items with no enclosing item inside the
    /// container qualify. Marked items owned by an unmarked wrapper item are
    /// skipped.
    fn child_items<'a>(
        &self,
        parent: ElementRef<'a>,
        child_depth: u32,
        is_root: bool,
    ) -> Vec<ElementRef<'a>> {
        parent
            .select(&self.item)
            .filter(|candidate| *candidate != parent)
            .filter(|candidate| self.depth_marker(*candidate) == Some(child_depth))
            .filter(|candidate| match self.enclosing_item(*candidate) {
                Some(owner) if owner == parent => true,
                Some(owner) if is_root && is_ancestor_of(owner, parent) => true,
                Some(owner) => {
                    if self.depth_marker(owner).is_none() {
                        tracing::debug!(
                            "Skipping navigation item at depth {} nested in an unmarked item: {}",
                            child_depth,
                            snippet(&candidate.html())
                        );
                    }
                    false
                }
                None => is_root,
            })
            .collect()
    }

    fn enclosing_item<'a>(&self, element: ElementRef<'a>) -> Option<ElementRef<'a>> {
        element
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|ancestor| self.item.matches(ancestor))
    }

    fn depth_marker(&self, element: ElementRef<'_>) -> Option<u32> {
        element
            .value()
            .attr(&self.depth_attribute)
            .and_then(|value| value.trim().parse().ok())
    }

    fn is_external(&self, anchor: ElementRef<'_>) -> bool {
        let element = anchor.value();
        element.classes().any(|class| class == self.external_marker)
            || element.attr(&self.external_marker).is_some()
    }
}

/// Depth of the children of an item at `depth`
fn next_depth(depth: u32, item: ElementRef<'_>) -> Result<u32, ScrollError> {
    depth
        .checked_add(1)
        .ok_or_else(|| ScrollError::MalformedNavNode {
            depth,
            snippet: snippet(&item.html()),
        })
}

fn is_ancestor_of(candidate: ElementRef<'_>, element: ElementRef<'_>) -> bool {
    element.ancestors().any(|ancestor| ancestor == *candidate)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn snippet(html: &str) -> String {
    let collapsed = collapse_whitespace(html);
    if collapsed.chars().count() <= SNIPPET_LEN {
        collapsed
    } else {
        let cut: String = collapsed.chars().take(SNIPPET_LEN).collect();
        format!("{}...", cut)
    }
}

/// Convenience wrapper: compiles selectors and extracts the tree in one call
pub fn extract_navigation(
    html: &str,
    page_url: &str,
    config: &NavigationConfig,
) -> Result<NavNode, ScrollError> {
    NavExtractor::new(config)?.extract_document(html, page_url)
}
