//! Parent-linked stack and the ancestor walk built on it.
//!
//! A [`Stack`] threads nodes through their `parent` links, LIFO from
//! `top`. The same walk, started from an arbitrary node with
//! [`iter_from`], is the traversal primitive the tree uses for size
//! propagation and [`depth`] without recursion.

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::error::{StructureError, StructureResult};
use crate::node::{NodeRef, Parented};

/// Boundary record of a stack: the deepest pushed node and the count.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stack {
    top: NodeRef,
    count: usize,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns `top` without mutation, `None` when empty.
    pub fn peek(&self) -> NodeRef {
        self.top
    }

    /// Links a detached node as the new `top`; its parent becomes the old
    /// top.
    #[instrument(level = "trace", skip(self, nodes))]
    pub fn push<N: Parented>(&mut self, nodes: &mut Arena<N>, id: Index) -> StructureResult<()> {
        {
            let node = nodes.get(id).ok_or(StructureError::StaleHandle)?;
            if node.parent().is_some() || self.top == Some(id) {
                return Err(StructureError::AlreadyLinked);
            }
        }
        if let Some(node) = nodes.get_mut(id) {
            node.set_parent(self.top);
        }
        self.top = Some(id);
        self.count += 1;
        Ok(())
    }

    /// Unlinks and returns the top node, resetting its parent link;
    /// `None` when the stack is empty.
    #[instrument(level = "trace", skip_all)]
    pub fn pop<N: Parented>(&mut self, nodes: &mut Arena<N>) -> NodeRef {
        let id = self.top?;
        match nodes.get_mut(id) {
            Some(node) => {
                self.top = node.parent();
                node.set_parent(None);
            }
            // stale top: drop the entry so the stack stays usable
            None => self.top = None,
        }
        self.count = self.count.saturating_sub(1);
        Some(id)
    }

    /// Pops every node, resetting their parent links.
    #[instrument(level = "trace", skip_all)]
    pub fn clear<N: Parented>(&mut self, nodes: &mut Arena<N>) {
        while self.pop(nodes).is_some() {}
    }

    /// Fresh LIFO cursor from `top` down to the sentinel.
    pub fn iter<'a, N: Parented>(&self, nodes: &'a Arena<N>) -> AncestorIter<'a, N> {
        AncestorIter {
            nodes,
            cursor: self.top,
        }
    }
}

/// Cursor following `parent` links until the sentinel, starting node
/// included. A stale handle mid-chain ends the walk.
pub struct AncestorIter<'a, N> {
    nodes: &'a Arena<N>,
    cursor: NodeRef,
}

impl<'a, N: Parented> Iterator for AncestorIter<'a, N> {
    type Item = (Index, &'a N);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.nodes.get(id)?;
        self.cursor = node.parent();
        Some((id, node))
    }
}

/// Ancestor walk rooted at an arbitrary node rather than a stack's top.
pub fn iter_from<N: Parented>(nodes: &Arena<N>, id: Index) -> AncestorIter<'_, N> {
    AncestorIter {
        nodes,
        cursor: Some(id),
    }
}

/// Number of edges from the node to its root: a root is at depth 0.
pub fn depth<N: Parented>(nodes: &Arena<N>, id: Index) -> usize {
    iter_from(nodes, id).count().saturating_sub(1)
}
