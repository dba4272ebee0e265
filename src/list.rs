//! Intrusive doubly linked list over arena handles.
//!
//! A [`List`] holds only the boundary links and a count; the nodes it
//! threads live in a caller-owned [`Arena`]. A node belongs to at most one
//! list at a time, and the operations here validate what they can cheaply
//! see (stale handles, already-linked nodes, detached anchors) before any
//! link is touched. Membership in *this* list versus another cannot be
//! told apart in O(1) from the link fields alone; that part of the
//! contract stays with the caller.
//!
//! Iteration is lazy and restartable: each call produces an independent
//! cursor that can be abandoned at any point. Mutating the list while a
//! cursor over it is alive is unsupported (the borrow on the arena
//! prevents it within one scope).

use std::cmp::Ordering;
use std::collections::HashSet;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::error::{StructureError, StructureResult};
use crate::node::{Linked, NodeRef};

/// Boundary record of a doubly linked list: `first`, `last`, and the
/// number of threaded nodes.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct List {
    first: NodeRef,
    last: NodeRef,
    count: usize,
}

impl List {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn first(&self) -> NodeRef {
        self.first
    }

    pub fn last(&self) -> NodeRef {
        self.last
    }

    /// Links a detached node as the new `first`.
    #[instrument(level = "trace", skip(self, nodes))]
    pub fn insert<N: Linked>(&mut self, nodes: &mut Arena<N>, id: Index) -> StructureResult<()> {
        self.check_detached(nodes, id)?;
        match self.first {
            Some(first) => {
                if let Some(head) = nodes.get_mut(first) {
                    head.set_previous(Some(id));
                }
                if let Some(node) = nodes.get_mut(id) {
                    node.set_next(Some(first));
                }
            }
            None => self.last = Some(id),
        }
        self.first = Some(id);
        self.count += 1;
        Ok(())
    }

    /// Links a detached node as the new `last`.
    #[instrument(level = "trace", skip(self, nodes))]
    pub fn append<N: Linked>(&mut self, nodes: &mut Arena<N>, id: Index) -> StructureResult<()> {
        self.check_detached(nodes, id)?;
        match self.last {
            Some(last) => {
                if let Some(tail) = nodes.get_mut(last) {
                    tail.set_next(Some(id));
                }
                if let Some(node) = nodes.get_mut(id) {
                    node.set_previous(Some(last));
                }
            }
            None => self.first = Some(id),
        }
        self.last = Some(id);
        self.count += 1;
        Ok(())
    }

    /// Splices a detached node immediately before `anchor`, which must be
    /// linked into this list.
    #[instrument(level = "trace", skip(self, nodes))]
    pub fn insert_before<N: Linked>(
        &mut self,
        nodes: &mut Arena<N>,
        id: Index,
        anchor: Index,
    ) -> StructureResult<()> {
        self.check_detached(nodes, id)?;
        let before = {
            let node = nodes.get(anchor).ok_or(StructureError::StaleHandle)?;
            if !self.is_threaded(anchor, node) {
                return Err(StructureError::DetachedAnchor);
            }
            node.previous()
        };
        match before {
            Some(prev) => {
                if let Some(node) = nodes.get_mut(prev) {
                    node.set_next(Some(id));
                }
            }
            None => self.first = Some(id),
        }
        if let Some(node) = nodes.get_mut(id) {
            node.set_previous(before);
            node.set_next(Some(anchor));
        }
        if let Some(node) = nodes.get_mut(anchor) {
            node.set_previous(Some(id));
        }
        self.count += 1;
        Ok(())
    }

    /// Splices a detached node immediately after `anchor`, which must be
    /// linked into this list.
    #[instrument(level = "trace", skip(self, nodes))]
    pub fn insert_after<N: Linked>(
        &mut self,
        nodes: &mut Arena<N>,
        id: Index,
        anchor: Index,
    ) -> StructureResult<()> {
        self.check_detached(nodes, id)?;
        let after = {
            let node = nodes.get(anchor).ok_or(StructureError::StaleHandle)?;
            if !self.is_threaded(anchor, node) {
                return Err(StructureError::DetachedAnchor);
            }
            node.next()
        };
        match after {
            Some(next) => {
                if let Some(node) = nodes.get_mut(next) {
                    node.set_previous(Some(id));
                }
            }
            None => self.last = Some(id),
        }
        if let Some(node) = nodes.get_mut(id) {
            node.set_next(after);
            node.set_previous(Some(anchor));
        }
        if let Some(node) = nodes.get_mut(anchor) {
            node.set_next(Some(id));
        }
        self.count += 1;
        Ok(())
    }

    /// Unlinks and returns the first node, `None` when the list is empty.
    #[instrument(level = "trace", skip_all)]
    pub fn remove_first<N: Linked>(&mut self, nodes: &mut Arena<N>) -> StructureResult<NodeRef> {
        match self.first {
            Some(id) => {
                self.remove(nodes, id)?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Unlinks and returns the last node, `None` when the list is empty.
    #[instrument(level = "trace", skip_all)]
    pub fn remove_last<N: Linked>(&mut self, nodes: &mut Arena<N>) -> StructureResult<NodeRef> {
        match self.last {
            Some(id) => {
                self.remove(nodes, id)?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Unlinks and returns the node immediately before `anchor`, `None`
    /// when the anchor is first.
    #[instrument(level = "trace", skip(self, nodes))]
    pub fn remove_before<N: Linked>(
        &mut self,
        nodes: &mut Arena<N>,
        anchor: Index,
    ) -> StructureResult<NodeRef> {
        let target = nodes
            .get(anchor)
            .ok_or(StructureError::StaleHandle)?
            .previous();
        match target {
            Some(id) => {
                self.remove(nodes, id)?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Unlinks and returns the node immediately after `anchor`, `None`
    /// when the anchor is last.
    #[instrument(level = "trace", skip(self, nodes))]
    pub fn remove_after<N: Linked>(
        &mut self,
        nodes: &mut Arena<N>,
        anchor: Index,
    ) -> StructureResult<NodeRef> {
        let target = nodes.get(anchor).ok_or(StructureError::StaleHandle)?.next();
        match target {
            Some(id) => {
                self.remove(nodes, id)?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Unlinks a member node from wherever it sits, relinking its former
    /// neighbors and resetting its own links.
    #[instrument(level = "trace", skip(self, nodes))]
    pub fn remove<N: Linked>(&mut self, nodes: &mut Arena<N>, id: Index) -> StructureResult<()> {
        let (prev, next) = {
            let node = nodes.get(id).ok_or(StructureError::StaleHandle)?;
            if !self.is_threaded(id, node) {
                return Err(StructureError::DetachedAnchor);
            }
            (node.previous(), node.next())
        };
        match prev {
            Some(p) => {
                if let Some(node) = nodes.get_mut(p) {
                    node.set_next(next);
                }
            }
            None => self.first = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = nodes.get_mut(n) {
                    node.set_previous(prev);
                }
            }
            None => self.last = prev,
        }
        if let Some(node) = nodes.get_mut(id) {
            node.set_next(None);
            node.set_previous(None);
        }
        self.count = self.count.saturating_sub(1);
        Ok(())
    }

    /// Whether `id` is the first node, by handle identity.
    pub fn is_first(&self, id: Index) -> bool {
        self.first == Some(id)
    }

    /// Whether `id` is the last node, by handle identity.
    pub fn is_last(&self, id: Index) -> bool {
        self.last == Some(id)
    }

    /// Comparator form of [`List::is_first`]: the first node's record and
    /// the given node's record compare equal.
    pub fn is_first_by<N, F>(&self, nodes: &Arena<N>, id: Index, compare: F) -> bool
    where
        N: Linked,
        F: Fn(&N, &N) -> Ordering,
    {
        match (self.first.and_then(|f| nodes.get(f)), nodes.get(id)) {
            (Some(first), Some(node)) => compare(first, node) == Ordering::Equal,
            _ => false,
        }
    }

    /// Comparator form of [`List::is_last`].
    pub fn is_last_by<N, F>(&self, nodes: &Arena<N>, id: Index, compare: F) -> bool
    where
        N: Linked,
        F: Fn(&N, &N) -> Ordering,
    {
        match (self.last.and_then(|l| nodes.get(l)), nodes.get(id)) {
            (Some(last), Some(node)) => compare(last, node) == Ordering::Equal,
            _ => false,
        }
    }

    /// Linear membership scan from `first`.
    pub fn has<N: Linked>(&self, nodes: &Arena<N>, id: Index) -> bool {
        self.iter_forward(nodes).any(|(i, _)| i == id)
    }

    /// Collects every node for which all predicates hold, short-circuiting
    /// per node on the first failing predicate. An empty list or an empty
    /// match is an empty set, not an error.
    pub fn query<N: Linked>(
        &self,
        nodes: &Arena<N>,
        predicates: &[&dyn Fn(&N) -> bool],
    ) -> HashSet<Index> {
        let mut matches = HashSet::new();
        'nodes: for (id, node) in self.iter_forward(nodes) {
            for predicate in predicates {
                if !predicate(node) {
                    continue 'nodes;
                }
            }
            matches.insert(id);
        }
        matches
    }

    /// Fresh forward cursor from `first`.
    pub fn iter_forward<'a, N: Linked>(&self, nodes: &'a Arena<N>) -> Iter<'a, N> {
        Iter {
            nodes,
            cursor: self.first,
        }
    }

    /// Fresh backward cursor from `last`.
    pub fn iter_backward<'a, N: Linked>(&self, nodes: &'a Arena<N>) -> RevIter<'a, N> {
        RevIter {
            nodes,
            cursor: self.last,
        }
    }

    /// Unlinks every node and resets the boundary record.
    #[instrument(level = "trace", skip_all)]
    pub fn clear<N: Linked>(&mut self, nodes: &mut Arena<N>) {
        let mut cursor = self.first;
        while let Some(id) = cursor {
            cursor = match nodes.get_mut(id) {
                Some(node) => {
                    let next = node.next();
                    node.set_next(None);
                    node.set_previous(None);
                    next
                }
                None => None,
            };
        }
        self.first = None;
        self.last = None;
        self.count = 0;
    }

    fn check_detached<N: Linked>(&self, nodes: &Arena<N>, id: Index) -> StructureResult<()> {
        let node = nodes.get(id).ok_or(StructureError::StaleHandle)?;
        if node.is_linked() || self.first == Some(id) {
            return Err(StructureError::AlreadyLinked);
        }
        Ok(())
    }

    // A sole member carries no sibling links, so the boundary check is
    // part of what "threaded" means here.
    fn is_threaded<N: Linked>(&self, id: Index, node: &N) -> bool {
        node.is_linked() || self.first == Some(id)
    }
}

/// Forward cursor following `next` links; ends at the sentinel. A stale
/// handle mid-chain ends the walk.
pub struct Iter<'a, N> {
    nodes: &'a Arena<N>,
    cursor: NodeRef,
}

impl<'a, N: Linked> Iterator for Iter<'a, N> {
    type Item = (Index, &'a N);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.nodes.get(id)?;
        self.cursor = node.next();
        Some((id, node))
    }
}

/// Backward cursor following `previous` links.
pub struct RevIter<'a, N> {
    nodes: &'a Arena<N>,
    cursor: NodeRef,
}

impl<'a, N: Linked> Iterator for RevIter<'a, N> {
    type Item = (Index, &'a N);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let node = self.nodes.get(id)?;
        self.cursor = node.previous();
        Some((id, node))
    }
}

/// Forward cursor rooted at an arbitrary member node, starting node
/// included, walking outward to the end of the list.
pub fn iter_from<N: Linked>(nodes: &Arena<N>, id: Index) -> Iter<'_, N> {
    Iter {
        nodes,
        cursor: Some(id),
    }
}

/// Backward cursor rooted at an arbitrary member node, starting node
/// included.
pub fn iter_back_from<N: Linked>(nodes: &Arena<N>, id: Index) -> RevIter<'_, N> {
    RevIter {
        nodes,
        cursor: Some(id),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::node::ListNode;

    fn collect(nodes: &Arena<ListNode<i32>>, list: &List) -> Vec<i32> {
        list.iter_forward(nodes).map(|(_, n)| n.value).collect()
    }

    #[test]
    fn splice_at_head_updates_first() {
        let mut nodes = Arena::new();
        let mut list = List::new();
        let n1 = nodes.insert(ListNode::new(1));
        let n2 = nodes.insert(ListNode::new(2));

        list.insert(&mut nodes, n1).unwrap();
        list.insert_before(&mut nodes, n2, n1).unwrap();

        assert_eq!(list.first(), Some(n2));
        assert_eq!(list.last(), Some(n1));
        assert_eq!(collect(&nodes, &list), [2, 1]);
    }

    #[test]
    fn splice_at_tail_updates_last() {
        let mut nodes = Arena::new();
        let mut list = List::new();
        let n1 = nodes.insert(ListNode::new(1));
        let n2 = nodes.insert(ListNode::new(2));

        list.append(&mut nodes, n1).unwrap();
        list.insert_after(&mut nodes, n2, n1).unwrap();

        assert_eq!(list.first(), Some(n1));
        assert_eq!(list.last(), Some(n2));
        assert_eq!(collect(&nodes, &list), [1, 2]);
    }

    #[test]
    fn remove_middle_relinks_neighbors() {
        let mut nodes = Arena::new();
        let mut list = List::new();
        let n1 = nodes.insert(ListNode::new(1));
        let n2 = nodes.insert(ListNode::new(2));
        let n3 = nodes.insert(ListNode::new(3));

        list.append(&mut nodes, n1).unwrap();
        list.append(&mut nodes, n2).unwrap();
        list.append(&mut nodes, n3).unwrap();
        list.remove(&mut nodes, n2).unwrap();

        assert_eq!(collect(&nodes, &list), [1, 3]);
        assert_eq!(list.count(), 2);
        assert!(!nodes[n2].is_linked());
    }

    #[test]
    fn removed_node_can_be_reinserted() {
        let mut nodes = Arena::new();
        let mut list = List::new();
        let n1 = nodes.insert(ListNode::new(1));

        list.insert(&mut nodes, n1).unwrap();
        list.remove(&mut nodes, n1).unwrap();
        list.append(&mut nodes, n1).unwrap();

        assert_eq!(collect(&nodes, &list), [1]);
        assert_eq!(list.count(), 1);
    }

    #[test]
    fn sole_member_cannot_be_inserted_twice() {
        let mut nodes = Arena::new();
        let mut list = List::new();
        let n1 = nodes.insert(ListNode::new(1));

        list.insert(&mut nodes, n1).unwrap();

        assert_eq!(
            list.insert(&mut nodes, n1),
            Err(StructureError::AlreadyLinked)
        );
        assert_eq!(list.count(), 1);
    }
}
