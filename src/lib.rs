//! An ordered map on a binary search tree, in two flavours:
//!
//! - [`AvlTree`] keeps itself height balanced. After every insert or
//!   remove each node's subtree heights differ by at most one, so lookups,
//!   inserts and removals are O(log n).
//! - [`UnbalancedTree`] is the plain binary search tree both are built on.
//!   Its shape depends on insertion order; sorted input degrades it to a list.
//!
//! Nodes live in an arena owned by the tree and link to each other through
//! handles, so rotations and node swaps relink in O(1) without any
//! ownership juggling.
//!
//! ```
//! use avlbst::{AvlTree, KeyError};
//!
//! let mut tree = AvlTree::new();
//! for key in 1..=7 {
//!     tree.insert(key, key * 10);
//! }
//! assert_eq!(tree.height(), 3);
//! assert_eq!(tree.at(&4), Ok(&40));
//! assert_eq!(tree.at(&8), Err(KeyError));
//!
//! let keys: Vec<_> = tree.keys().copied().collect();
//! assert_eq!(keys, [1, 2, 3, 4, 5, 6, 7]);
//! ```
//!
//! Enable the `consistency_check` feature to get
//! [`Tree::check_consistency`] outside of this crate's tests.

mod arena;
mod avl;
mod balance;
mod equal_paths;
mod error;
mod iter;
mod node;
mod print;
mod raw;
mod tree;

pub use avl::Avl;
pub use balance::{Balance, Unbalanced};
pub use equal_paths::{equal_paths, BinaryNode};
pub use error::KeyError;
pub use iter::{Cursor, Iter, IterMut, Keys, Values, ValuesMut};
pub use tree::{AvlTree, Tree, UnbalancedTree};
