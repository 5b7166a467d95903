use serde::Serialize;

/// One entry of a documentation site's navigation menu
///
/// The tree is rooted at a synthetic node with an empty title and href.
/// `depth` is the structural marker read from the source element, never
/// recomputed from the tree shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavNode {
    pub title: String,
    pub href: String,
    #[serde(rename = "isExternal")]
    pub is_external: bool,
    pub depth: u32,
    pub children: Vec<NavNode>,
}

impl NavNode {
    /// Creates the synthetic root of a navigation tree
    pub fn root(depth: u32, children: Vec<NavNode>) -> Self {
        Self {
            title: String::new(),
            href: String::new(),
            is_external: false,
            depth,
            children,
        }
    }

    /// Creates a node without children
    pub fn leaf(title: impl Into<String>, href: impl Into<String>, depth: u32) -> Self {
        Self {
            title: title.into(),
            href: href.into(),
            is_external: false,
            depth,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree, including `self`
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(NavNode::node_count).sum::<usize>()
    }
}
