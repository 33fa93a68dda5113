use thiserror::Error;

/// Returned by [`Tree::at`](crate::Tree::at) and
/// [`Tree::at_mut`](crate::Tree::at_mut) when the key is absent.
///
/// ```
/// use avlbst::{AvlTree, KeyError};
///
/// let tree: AvlTree<i32, &str> = AvlTree::new();
/// assert_eq!(tree.at(&7), Err(KeyError));
/// assert_eq!(KeyError.to_string(), "key not found");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
#[error("key not found")]
pub struct KeyError;
