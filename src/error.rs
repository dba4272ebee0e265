//! Structural operation errors.
//!
//! Absent conditions are not errors: removing from an empty list yields
//! `None` and a query without matches yields an empty set. Errors are
//! reserved for rejected arguments and detected structural corruption, and
//! every mutating operation validates before touching any link, so a
//! returned error means nothing was modified.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StructureError {
    /// Size deltas must be strictly positive.
    #[error("size delta must be greater than zero")]
    InvalidDelta,

    /// The node is still threaded into a structure and cannot be inserted
    /// again until it is removed.
    #[error("node is already linked")]
    AlreadyLinked,

    /// The anchor node is not linked into the list it was used against.
    #[error("anchor node is detached")]
    DetachedAnchor,

    /// The node has no parent to detach from.
    #[error("node is not a child of any parent")]
    NotAChild,

    /// Attaching a node underneath itself or its own descendant would
    /// close a cycle through the parent links.
    #[error("attachment would create a cycle")]
    CycleDetected,

    /// The handle does not resolve to a live arena node.
    #[error("node handle is stale")]
    StaleHandle,

    /// Decreasing by this delta would push a subtree size below one.
    #[error("size delta {delta} exceeds remaining subtree size {size}")]
    SizeUnderflow { delta: usize, size: usize },
}

pub type StructureResult<T> = Result<T, StructureError>;
