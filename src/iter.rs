use std::fmt;
use std::iter::FusedIterator;
use std::ptr;
use std::vec;

use crate::node::Link;
use crate::raw::RawTree;

/// An iterator over the entries of a tree, in ascending key order.
pub struct Iter<'a, K, V> {
    tree: &'a RawTree<K, V>,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(tree: &'a RawTree<K, V>) -> Self {
        Self {
            tree,
            front: tree.first(),
            back: tree.last(),
            remaining: tree.len(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.front = self.tree.successor(handle);
        self.remaining -= 1;
        let node = self.tree.node(handle);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.back = self.tree.predecessor(handle);
        self.remaining -= 1;
        let node = self.tree.node(handle);
        Some((&node.key, &node.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

/// A mutable iterator over the entries of a tree, in ascending key order.
///
/// The visiting order is resolved up front, so building one walks the
/// whole tree once.
pub struct IterMut<'a, K, V> {
    entries: vec::IntoIter<(&'a K, &'a mut V)>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(tree: &'a mut RawTree<K, V>) -> Self {
        let mut order = Vec::with_capacity(tree.len());
        let mut current = tree.first();
        while let Some(handle) = current {
            order.push(handle.to_index());
            current = tree.successor(handle);
        }

        let mut slots: Vec<Option<(&'a K, &'a mut V)>> = tree
            .nodes_mut()
            .map(|slot| slot.map(|node| (&node.key, &mut node.value)))
            .collect();
        let entries: Vec<_> = order
            .into_iter()
            .map(|index| slots[index].take().expect("`IterMut::new()` - node visited twice"))
            .collect();
        Self {
            entries: entries.into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.entries.next_back()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An iterator over the keys of a tree, in ascending order.
pub struct Keys<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// An iterator over the values of a tree, in ascending key order.
pub struct Values<'a, K, V> {
    pub(crate) inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// A mutable iterator over the values of a tree, in ascending key order.
pub struct ValuesMut<'a, K, V> {
    pub(crate) inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

/// A position in a tree: either on an entry or past the last one.
///
/// Moving forward visits the in-order successor. Two cursors are equal when
/// they belong to the same tree and rest on the same entry, or are both at
/// the end.
pub struct Cursor<'a, K, V> {
    tree: &'a RawTree<K, V>,
    current: Link,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) fn new(tree: &'a RawTree<K, V>, current: Link) -> Self {
        Self { tree, current }
    }

    /// Returns true once the cursor has moved past the last entry.
    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    /// The key under the cursor, `None` at the end.
    pub fn key(&self) -> Option<&'a K> {
        self.key_value().map(|(key, _)| key)
    }

    /// The value under the cursor, `None` at the end.
    pub fn value(&self) -> Option<&'a V> {
        self.key_value().map(|(_, value)| value)
    }

    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        let tree = self.tree;
        self.current.map(|handle| {
            let node = tree.node(handle);
            (&node.key, &node.value)
        })
    }

    /// Advances to the in-order successor. Stays put at the end.
    pub fn move_next(&mut self) {
        if let Some(handle) = self.current {
            self.current = self.tree.successor(handle);
        }
    }

    /// Steps back to the in-order predecessor; from the end this is the
    /// last entry. Moving back from the first entry reaches the end.
    pub fn move_prev(&mut self) {
        self.current = match self.current {
            Some(handle) => self.tree.predecessor(handle),
            None => self.tree.last(),
        };
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.current == other.current
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key_value() {
            Some((key, value)) => f.debug_tuple("Cursor").field(key).field(value).finish(),
            None => f.write_str("Cursor(end)"),
        }
    }
}
