//! Tree traversal over navigation trees
//!
//! Pre-order visits children in source order, which keeps the flattened task
//! list deterministic. Link resolution does not depend on order and uses the
//! post-order mutable walk.

use crate::crawler::FetchTask;
use crate::nav::NavNode;
use crate::url::resolve_link;

/// Visits `node` and then every descendant, children in source order
pub fn walk_pre_order<'a, F>(node: &'a NavNode, visit: &mut F)
where
    F: FnMut(&'a NavNode),
{
    visit(node);
    for child in &node.children {
        walk_pre_order(child, visit);
    }
}

/// Visits every descendant of `node` before `node` itself
pub fn walk_post_order<'a, F>(node: &'a NavNode, visit: &mut F)
where
    F: FnMut(&'a NavNode),
{
    for child in &node.children {
        walk_post_order(child, visit);
    }
    visit(node);
}

/// Post-order walk granting mutable access to each node
pub fn walk_post_order_mut<F>(node: &mut NavNode, visit: &mut F)
where
    F: FnMut(&mut NavNode),
{
    for child in &mut node.children {
        walk_post_order_mut(child, visit);
    }
    visit(node);
}

/// Rewrites every non-empty href in the tree into an absolute URL
pub fn resolve_tree(root: &mut NavNode, base_origin: &str) {
    walk_post_order_mut(root, &mut |node: &mut NavNode| {
        if !node.href.is_empty() {
            node.href = resolve_link(&node.href, base_origin);
        }
    });
}

/// Flattens the tree into fetch tasks for every in-domain, non-root node
///
/// Order follows a pre-order walk, so parents come before their children and
/// siblings keep their menu order.
pub fn collect_fetch_tasks(root: &NavNode) -> Vec<FetchTask> {
    let mut tasks = Vec::new();
    for child in &root.children {
        walk_pre_order(child, &mut |node: &NavNode| {
            if !node.is_external && !node.href.is_empty() {
                tasks.push(FetchTask::new(node.href.clone()));
            }
        });
    }
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://docs.example.com";

    /// root -> [A, B(external), C -> [D]]
    fn sample_tree() -> NavNode {
        let a = NavNode::leaf("A", "/a", 2);
        let mut b = NavNode::leaf("B", "https://elsewhere.org/b", 2);
        b.is_external = true;
        let mut c = NavNode::leaf("C", "c", 2);
        c.children.push(NavNode::leaf("D", "/c/d", 3));
        NavNode::root(1, vec![a, b, c])
    }

    #[test]
    fn test_pre_order_visits_parents_first() {
        let tree = sample_tree();
        let mut titles = Vec::new();
        walk_pre_order(&tree, &mut |node: &NavNode| titles.push(node.title.clone()));

        assert_eq!(titles, vec!["", "A", "B", "C", "D"]);
    }

    #[test]
    fn test_post_order_visits_children_first() {
        let tree = sample_tree();
        let mut titles = Vec::new();
        walk_post_order(&tree, &mut |node: &NavNode| titles.push(node.title.clone()));

        assert_eq!(titles, vec!["A", "B", "D", "C", ""]);
    }

    #[test]
    fn test_resolve_tree_makes_hrefs_absolute() {
        let mut tree = sample_tree();
        resolve_tree(&mut tree, BASE);

        assert_eq!(tree.href, "");
        assert_eq!(tree.children[0].href, "https://docs.example.com/a");
        assert_eq!(tree.children[1].href, "https://elsewhere.org/b");
        assert_eq!(tree.children[2].href, "https://docs.example.com/c");
        assert_eq!(
            tree.children[2].children[0].href,
            "https://docs.example.com/c/d"
        );
    }

    #[test]
    fn test_resolve_tree_twice_is_noop() {
        let mut once = sample_tree();
        resolve_tree(&mut once, BASE);
        let mut twice = once.clone();
        resolve_tree(&mut twice, BASE);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_collect_skips_root_and_external() {
        let mut tree = sample_tree();
        resolve_tree(&mut tree, BASE);
        let urls: Vec<String> = collect_fetch_tasks(&tree)
            .into_iter()
            .map(|task| task.url)
            .collect();

        assert_eq!(
            urls,
            vec![
                "https://docs.example.com/a",
                "https://docs.example.com/c",
                "https://docs.example.com/c/d",
            ]
        );
    }

    #[test]
    fn test_collect_from_empty_tree() {
        let tree = NavNode::root(1, vec![]);
        assert!(collect_fetch_tasks(&tree).is_empty());
    }
}
