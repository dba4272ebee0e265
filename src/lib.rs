//! Arena-backed intrusive data structures: a doubly linked list, a
//! parent-linked stack, and a tree composed from the two, plus the
//! comparison sorts and comparators used to order their contents.
//!
//! Nodes live in a caller-owned [`Arena`] and carry their link fields
//! inside the element record; links are [`NodeRef`] handles with `None`
//! as the sentinel. Structure heads ([`List`], [`Stack`]) hold only
//! boundary links and a count, so a node can move between structures and
//! outlive any of them; the caller controls node lifetime through the
//! arena.
//!
//! ```
//! use linkarena::{tree, Arena, TreeNode};
//!
//! let mut nodes: Arena<TreeNode<&str>> = Arena::new();
//! let root = tree::create(&mut nodes, "root");
//! let a = tree::create(&mut nodes, "a");
//! let g = tree::create(&mut nodes, "g");
//! tree::append_child(&mut nodes, a, root)?;
//! tree::append_child(&mut nodes, g, a)?;
//!
//! // subtree sizes propagate to every ancestor
//! assert_eq!(nodes[root].size(), 3);
//! assert_eq!(tree::depth(&nodes, g), 2);
//!
//! // lazy pre-order traversal: parents strictly before descendants
//! let order: Vec<&str> = tree::iter(&nodes, root).map(|(_, n)| n.value).collect();
//! assert_eq!(order, ["root", "a", "g"]);
//! # Ok::<(), linkarena::StructureError>(())
//! ```
//!
//! Everything is single-threaded and synchronous. Structures hand out
//! lazy, restartable cursors; mutating a structure while one of its
//! cursors is alive is unsupported, and the arena borrow rules prevent it
//! within one scope.

pub mod compare;
pub mod error;
pub mod list;
pub mod node;
pub mod render;
pub mod sort;
pub mod stack;
pub mod tree;
pub mod util;

pub use compare::{float_compare, key_compare, value_compare, Keyed};
pub use error::{StructureError, StructureResult};
pub use list::List;
pub use node::{Linked, ListNode, NodeRef, Parented, StackNode};
pub use render::render;
pub use sort::{insertion_sort, selection_sort};
pub use stack::Stack;
pub use tree::TreeNode;

// the arena and its handle type are part of the public API surface
pub use generational_arena::{Arena, Index};
