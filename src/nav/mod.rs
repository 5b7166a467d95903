//! Navigation module
//!
//! This module contains everything that operates on the site's navigation menu:
//! - The owned [`NavNode`] tree value
//! - Extraction of the tree from navigation markup
//! - Traversal utilities for link resolution and task collection

mod extract;
mod tree;
mod walk;

pub use extract::{extract_navigation, NavExtractor};
pub use tree::NavNode;
pub use walk::{
    collect_fetch_tasks, resolve_tree, walk_post_order, walk_post_order_mut, walk_pre_order,
};
