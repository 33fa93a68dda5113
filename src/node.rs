use crate::arena::Handle;

pub(crate) type Link = Option<Handle>;

/// A key-value pair plus its position in the tree.
///
/// Links are non-owning; the arena inside the tree owns every node.
/// `balance` is height(right) - height(left) and only maintained by
/// balancing strategies, others leave it at zero.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) parent: Link,
    pub(crate) left: Link,
    pub(crate) right: Link,
    pub(crate) balance: i8,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V, parent: Link) -> Self {
        Self {
            key,
            value,
            parent,
            left: None,
            right: None,
            balance: 0,
        }
    }

    pub(crate) fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
