//! Terminal rendering of trees, for debugging and display.

use std::fmt::Display;

use generational_arena::{Arena, Index};
use termtree::Tree;

use crate::tree::TreeNode;

/// Builds a [`termtree::Tree`] from the subtree rooted at `root`,
/// children in sibling order. A stale root renders as an empty-tree
/// placeholder rather than failing; display is best effort.
pub fn render<T: Display>(nodes: &Arena<TreeNode<T>>, root: Index) -> Tree<String> {
    match nodes.get(root) {
        Some(node) => {
            let mut out = Tree::new(node.value.to_string());
            for (child, _) in node.children().iter_forward(nodes) {
                out.push(render(nodes, child));
            }
            out
        }
        None => Tree::new("(empty tree)".to_string()),
    }
}
