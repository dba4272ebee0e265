//! Tree composed from the list and the ancestor walk.
//!
//! A [`TreeNode`] embeds both link shapes: sibling `next`/`previous`
//! maintained by the parent's children [`List`], a `parent` link for the
//! upward walk, plus a `children` boundary record and the subtree `size`
//! (the node itself counts, so `size >= 1`). All nodes of a forest share
//! one caller-owned [`Arena`]; a tree is identified by its root handle,
//! sibling order delegates to list splices, and size propagation
//! delegates to the ancestor walk.
//!
//! The insertion helpers propagate size increases themselves, and
//! [`remove_child`] propagates the matching decrease. The manual
//! [`increase_size`]/[`decrease_size`] operations stay public for callers
//! that splice subtrees by hand; both validate the whole ancestor chain
//! before touching any size, so a failed call mutates nothing.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::mem;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::error::{StructureError, StructureResult};
use crate::list::List;
use crate::node::{Linked, NodeRef, Parented};
use crate::stack;

/// Tree element: payload, parent and sibling links, children boundary
/// record, and the subtree size.
#[derive(Debug)]
pub struct TreeNode<T> {
    pub value: T,
    parent: NodeRef,
    next: NodeRef,
    previous: NodeRef,
    children: List,
    size: usize,
}

impl<T> TreeNode<T> {
    /// Count of nodes in the subtree rooted here, this node included.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The children boundary record; nodes appear in sibling order.
    pub fn children(&self) -> &List {
        &self.children
    }
}

impl<T> Linked for TreeNode<T> {
    fn next(&self) -> NodeRef {
        self.next
    }

    fn previous(&self) -> NodeRef {
        self.previous
    }

    fn set_next(&mut self, link: NodeRef) {
        self.next = link;
    }

    fn set_previous(&mut self, link: NodeRef) {
        self.previous = link;
    }
}

impl<T> Parented for TreeNode<T> {
    fn parent(&self) -> NodeRef {
        self.parent
    }

    fn set_parent(&mut self, link: NodeRef) {
        self.parent = link;
    }
}

/// Creates a detached tree node: no links, empty children, `size = 1`.
pub fn create<T>(nodes: &mut Arena<TreeNode<T>>, value: T) -> Index {
    nodes.insert(TreeNode {
        value,
        parent: None,
        next: None,
        previous: None,
        children: List::new(),
        size: 1,
    })
}

/// Attaches `child` as the new first child of `parent` and propagates the
/// child's subtree size to the parent and every ancestor.
#[instrument(level = "trace", skip(nodes))]
pub fn insert_child<T>(
    nodes: &mut Arena<TreeNode<T>>,
    child: Index,
    parent: Index,
) -> StructureResult<()> {
    attach(nodes, child, parent, true)
}

/// Attaches `child` as the new last child of `parent` and propagates the
/// child's subtree size to the parent and every ancestor.
#[instrument(level = "trace", skip(nodes))]
pub fn append_child<T>(
    nodes: &mut Arena<TreeNode<T>>,
    child: Index,
    parent: Index,
) -> StructureResult<()> {
    attach(nodes, child, parent, false)
}

fn attach<T>(
    nodes: &mut Arena<TreeNode<T>>,
    child: Index,
    parent: Index,
    front: bool,
) -> StructureResult<()> {
    let delta = {
        let node = nodes.get(child).ok_or(StructureError::StaleHandle)?;
        if node.parent.is_some() {
            return Err(StructureError::AlreadyLinked);
        }
        node.size
    };
    // The whole ancestor chain must be live before anything is spliced,
    // and it must not run through the node being attached: a parent chain
    // through `child` would turn the size walk into a cycle.
    let mut cursor = Some(parent);
    while let Some(i) = cursor {
        if i == child {
            return Err(StructureError::CycleDetected);
        }
        cursor = nodes.get(i).ok_or(StructureError::StaleHandle)?.parent;
    }

    // The children record is moved out while the arena is mutably
    // borrowed for the splice; the splice touches sibling links only,
    // never the parent record itself.
    let mut children = match nodes.get_mut(parent) {
        Some(node) => mem::take(&mut node.children),
        None => return Err(StructureError::StaleHandle),
    };
    let spliced = if front {
        children.insert(nodes, child)
    } else {
        children.append(nodes, child)
    };
    if let Some(node) = nodes.get_mut(parent) {
        node.children = children;
    }
    spliced?;

    if let Some(node) = nodes.get_mut(child) {
        node.parent = Some(parent);
    }
    apply_increase(nodes, parent, delta);
    Ok(())
}

/// Detaches `child` from its parent, restoring ancestor sizes. The
/// subtree below the child stays intact and the child becomes a root.
#[instrument(level = "trace", skip(nodes))]
pub fn remove_child<T>(nodes: &mut Arena<TreeNode<T>>, child: Index) -> StructureResult<()> {
    let (parent, delta) = {
        let node = nodes.get(child).ok_or(StructureError::StaleHandle)?;
        match node.parent {
            Some(parent) => (parent, node.size),
            None => return Err(StructureError::NotAChild),
        }
    };
    validate_decrease(nodes, parent, delta)?;

    let mut children = match nodes.get_mut(parent) {
        Some(node) => mem::take(&mut node.children),
        None => return Err(StructureError::StaleHandle),
    };
    let unlinked = children.remove(nodes, child);
    if let Some(node) = nodes.get_mut(parent) {
        node.children = children;
    }
    unlinked?;

    if let Some(node) = nodes.get_mut(child) {
        node.parent = None;
    }
    apply_decrease(nodes, parent, delta);
    Ok(())
}

/// Adds `delta` to the size of the node and every ancestor. Rejects a
/// zero delta; validates the chain before mutating.
#[instrument(level = "trace", skip(nodes))]
pub fn increase_size<T>(
    nodes: &mut Arena<TreeNode<T>>,
    id: Index,
    delta: usize,
) -> StructureResult<()> {
    if delta == 0 {
        return Err(StructureError::InvalidDelta);
    }
    validate_chain(nodes, id)?;
    apply_increase(nodes, id, delta);
    Ok(())
}

/// Subtracts `delta` from the size of the node and every ancestor.
/// Rejects a zero delta and any delta that would push a visited size
/// below one; validates the chain before mutating.
#[instrument(level = "trace", skip(nodes))]
pub fn decrease_size<T>(
    nodes: &mut Arena<TreeNode<T>>,
    id: Index,
    delta: usize,
) -> StructureResult<()> {
    if delta == 0 {
        return Err(StructureError::InvalidDelta);
    }
    validate_decrease(nodes, id, delta)?;
    apply_decrease(nodes, id, delta);
    Ok(())
}

fn validate_chain<T>(nodes: &Arena<TreeNode<T>>, id: Index) -> StructureResult<()> {
    let mut cursor = Some(id);
    while let Some(i) = cursor {
        cursor = nodes.get(i).ok_or(StructureError::StaleHandle)?.parent;
    }
    Ok(())
}

fn validate_decrease<T>(
    nodes: &Arena<TreeNode<T>>,
    id: Index,
    delta: usize,
) -> StructureResult<()> {
    let mut cursor = Some(id);
    while let Some(i) = cursor {
        let node = nodes.get(i).ok_or(StructureError::StaleHandle)?;
        if node.size <= delta {
            return Err(StructureError::SizeUnderflow {
                delta,
                size: node.size,
            });
        }
        cursor = node.parent;
    }
    Ok(())
}

fn apply_increase<T>(nodes: &mut Arena<TreeNode<T>>, id: Index, delta: usize) {
    let mut cursor = Some(id);
    while let Some(i) = cursor {
        cursor = match nodes.get_mut(i) {
            Some(node) => {
                node.size += delta;
                node.parent
            }
            None => None,
        };
    }
}

fn apply_decrease<T>(nodes: &mut Arena<TreeNode<T>>, id: Index, delta: usize) {
    let mut cursor = Some(id);
    while let Some(i) = cursor {
        cursor = match nodes.get_mut(i) {
            Some(node) => {
                node.size -= delta;
                node.parent
            }
            None => None,
        };
    }
}

/// Whether the node has no parent.
pub fn is_root<T>(nodes: &Arena<TreeNode<T>>, id: Index) -> bool {
    nodes.get(id).map(|n| n.parent.is_none()).unwrap_or(false)
}

/// Whether the node has no children.
pub fn is_leaf<T>(nodes: &Arena<TreeNode<T>>, id: Index) -> bool {
    nodes.get(id).map(|n| n.children.is_empty()).unwrap_or(false)
}

/// Whether `parent` is the node's parent, by handle identity.
pub fn is_child<T>(nodes: &Arena<TreeNode<T>>, id: Index, parent: Index) -> bool {
    nodes
        .get(id)
        .map(|n| n.parent == Some(parent))
        .unwrap_or(false)
}

/// Comparator form of [`is_child`]: the node's actual parent payload and
/// the given parent's payload compare equal.
pub fn is_child_by<T, F>(nodes: &Arena<TreeNode<T>>, id: Index, parent: Index, compare: F) -> bool
where
    F: Fn(&T, &T) -> Ordering,
{
    let actual = match nodes.get(id).and_then(|n| n.parent) {
        Some(p) => match nodes.get(p) {
            Some(node) => node,
            None => return false,
        },
        None => return false,
    };
    match nodes.get(parent) {
        Some(claimed) => compare(&actual.value, &claimed.value) == Ordering::Equal,
        None => false,
    }
}

/// Whether the node is the first of `parent`'s children.
pub fn is_first_child<T>(nodes: &Arena<TreeNode<T>>, id: Index, parent: Index) -> bool {
    nodes
        .get(parent)
        .map(|p| p.children.is_first(id))
        .unwrap_or(false)
}

/// Whether the node is the last of `parent`'s children.
pub fn is_last_child<T>(nodes: &Arena<TreeNode<T>>, id: Index, parent: Index) -> bool {
    nodes
        .get(parent)
        .map(|p| p.children.is_last(id))
        .unwrap_or(false)
}

/// Whether the node is `parent`'s only child.
pub fn is_only_child<T>(nodes: &Arena<TreeNode<T>>, id: Index, parent: Index) -> bool {
    is_first_child(nodes, id, parent) && is_last_child(nodes, id, parent)
}

/// Comparator form of [`is_first_child`].
pub fn is_first_child_by<T, F>(
    nodes: &Arena<TreeNode<T>>,
    id: Index,
    parent: Index,
    compare: F,
) -> bool
where
    F: Fn(&T, &T) -> Ordering,
{
    nodes
        .get(parent)
        .map(|p| {
            p.children
                .is_first_by(nodes, id, |a, b| compare(&a.value, &b.value))
        })
        .unwrap_or(false)
}

/// Comparator form of [`is_last_child`].
pub fn is_last_child_by<T, F>(
    nodes: &Arena<TreeNode<T>>,
    id: Index,
    parent: Index,
    compare: F,
) -> bool
where
    F: Fn(&T, &T) -> Ordering,
{
    nodes
        .get(parent)
        .map(|p| {
            p.children
                .is_last_by(nodes, id, |a, b| compare(&a.value, &b.value))
        })
        .unwrap_or(false)
}

/// Number of edges from the node to its root, via the ancestor walk.
pub fn depth<T>(nodes: &Arena<TreeNode<T>>, id: Index) -> usize {
    stack::depth(nodes, id)
}

/// Fresh lazy depth-first pre-order cursor over the subtree rooted at
/// `root`: the node itself, then each child's subtree in sibling order.
pub fn iter<T>(nodes: &Arena<TreeNode<T>>, root: Index) -> PreOrderIter<'_, T> {
    PreOrderIter {
        nodes,
        stack: vec![root],
    }
}

/// Collects every node of the subtree for which all predicates hold,
/// short-circuiting per node on the first failing predicate.
pub fn query<T>(
    nodes: &Arena<TreeNode<T>>,
    root: Index,
    predicates: &[&dyn Fn(&TreeNode<T>) -> bool],
) -> HashSet<Index> {
    let mut matches = HashSet::new();
    'nodes: for (id, node) in iter(nodes, root) {
        for predicate in predicates {
            if !predicate(node) {
                continue 'nodes;
            }
        }
        matches.insert(id);
    }
    matches
}

/// Depth-first pre-order cursor backed by an explicit stack.
pub struct PreOrderIter<'a, T> {
    nodes: &'a Arena<TreeNode<T>>,
    stack: Vec<Index>,
}

impl<'a, T> Iterator for PreOrderIter<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                // Push children last-to-first so the first child pops next
                for (child, _) in node.children.iter_backward(self.nodes) {
                    self.stack.push(child);
                }
                return Some((id, node));
            }
        }
        None
    }
}
