//! Generic ordered N-ary tree.
//!
//! Nodes live in an arena owned by [`Tree`] and are addressed by [`NodeId`].
//! Each node owns the ordered list of its children and keeps a non-owning
//! back-reference to its parent.
//!
//! | Module | Description |
//! |--------|-------------|
//! | `node` | Arena, node type and structural mutation |
//! | `traversal` | Pre-order iteration, search and neighbours |
//!
//! # Example
//!
//! ```
//! use browser_tabtree::tree::Tree;
//!
//! let mut tree = Tree::new();
//! let a = tree.create_node("a");
//! let b = tree.create_node("b");
//! tree.append_child(tree.root(), a).unwrap();
//! tree.append_child(a, b).unwrap();
//!
//! assert_eq!(tree.next_node(a), Some(b));
//! assert_eq!(tree.depth(b).unwrap(), 2);
//! ```
//!
//! [`NodeId`]: crate::identifiers::NodeId

// ============================================================================
// Submodules
// ============================================================================

mod node;
mod traversal;

// ============================================================================
// Re-exports
// ============================================================================

pub use node::{Tree, TreeNode};
pub use traversal::PreOrder;
