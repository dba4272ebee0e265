//! Link fields and the capability traits that make a record threadable.
//!
//! Links are arena handles behind an `Option`: `None` is the sentinel
//! "no such link" value, shared by every structure in the crate and never
//! dereferenced. A record becomes list- or stack-compatible by exposing
//! its link fields through [`Linked`] or [`Parented`]; no base type is
//! required, and the link fields live inside the element itself.

use generational_arena::Index;

/// A link to another node in the same arena, `None` for the sentinel.
pub type NodeRef = Option<Index>;

/// Capability of records that can be threaded into a doubly linked
/// [`List`](crate::list::List).
pub trait Linked {
    fn next(&self) -> NodeRef;
    fn previous(&self) -> NodeRef;
    fn set_next(&mut self, link: NodeRef);
    fn set_previous(&mut self, link: NodeRef);

    /// Whether the node is threaded into a list through either link.
    ///
    /// The sole member of a list carries no sibling links, so this alone
    /// cannot prove detachment; list operations also check their own
    /// boundaries.
    fn is_linked(&self) -> bool {
        self.next().is_some() || self.previous().is_some()
    }
}

/// Capability of records that can be threaded into a
/// [`Stack`](crate::stack::Stack) or walked upward along parent links.
pub trait Parented {
    fn parent(&self) -> NodeRef;
    fn set_parent(&mut self, link: NodeRef);
}

/// Minimal list element: a payload plus the two sibling links.
///
/// Created detached; insert operations thread it, remove operations reset
/// it. The caller controls its lifetime through the owning arena.
#[derive(Debug, Clone)]
pub struct ListNode<T> {
    pub value: T,
    next: NodeRef,
    previous: NodeRef,
}

impl<T> ListNode<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            next: None,
            previous: None,
        }
    }
}

impl<T> Linked for ListNode<T> {
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

/// Minimal stack element: a payload plus the parent link.
#[derive(Debug, Clone)]
pub struct StackNode<T> {
    pub value: T,
    parent: NodeRef,
}

impl<T> StackNode<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            parent: None,
        }
    }
}

impl<T> Parented for StackNode<T> {
    fn parent(&self) -> NodeRef {
        self.parent
    }

    fn set_parent(&mut self, link: NodeRef) {
        self.parent = link;
    }
}
