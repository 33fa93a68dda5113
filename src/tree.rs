use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::ops::Index;

use crate::avl::Avl;
use crate::balance::{Balance, Unbalanced};
use crate::error::KeyError;
use crate::iter::{Cursor, Iter, IterMut, Keys, Values, ValuesMut};
use crate::raw::{Insertion, RawTree};

/// An ordered map on a binary search tree.
///
/// The balancing strategy `B` decides what happens after the structural
/// part of an insert or remove. Use the [`AvlTree`] and [`UnbalancedTree`]
/// aliases rather than naming `B` directly.
///
/// ```
/// use avlbst::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.insert(2, "two");
/// tree.insert(1, "one");
/// tree.insert(3, "three");
/// assert_eq!(tree.get(&1), Some(&"one"));
/// assert_eq!(tree.remove(&1), Some("one"));
/// assert!(tree.get(&1).is_none());
/// assert!(tree.is_balanced());
/// ```
pub struct Tree<K, V, B = Avl> {
    raw: RawTree<K, V>,
    balance: PhantomData<B>,
}

/// A map that keeps itself height balanced with AVL rotations.
pub type AvlTree<K, V> = Tree<K, V, Avl>;

/// A map on a plain binary search tree, shaped by insertion order.
pub type UnbalancedTree<K, V> = Tree<K, V, Unbalanced>;

impl<K, V, B: Balance> Tree<K, V, B> {
    /// Creates an empty map.
    /// No memory is allocated until the first item is inserted.
    pub const fn new() -> Self {
        Self {
            raw: RawTree::new(),
            balance: PhantomData,
        }
    }

    /// Returns true if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns the number of levels on the longest root-to-leaf path,
    /// zero for an empty map.
    pub fn height(&self) -> usize {
        let Some(root) = self.raw.root() else {
            return 0;
        };
        if B::TRACKS_BALANCE {
            // Following the taller side always lands on a deepest leaf.
            let mut height = 0;
            let mut current = Some(root);
            while let Some(handle) = current {
                height += 1;
                current = if self.raw.balance(handle) < 0 {
                    self.raw.left(handle)
                } else {
                    self.raw.right(handle).or(self.raw.left(handle))
                };
            }
            height
        } else {
            self.raw.heights()[root.to_index()]
        }
    }

    /// Clears the map, deallocating all memory.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns true if, at every node, the heights of the two subtrees
    /// differ by at most one. Always true for an [`AvlTree`].
    pub fn is_balanced(&self) -> bool {
        self.raw.is_balanced()
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.raw)
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.raw)
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Returns a cursor on the smallest entry, or at the end when empty.
    pub fn cursor_front(&self) -> Cursor<'_, K, V> {
        Cursor::new(&self.raw, self.raw.first())
    }

    /// Returns the cursor past the last entry.
    pub fn cursor_end(&self) -> Cursor<'_, K, V> {
        Cursor::new(&self.raw, None)
    }

    /// Returns the entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.cursor_front().key_value()
    }

    /// Returns the entry with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        Cursor::new(&self.raw, self.raw.last()).key_value()
    }

    pub(crate) fn as_raw(&self) -> &RawTree<K, V> {
        &self.raw
    }

    #[cfg(test)]
    pub(crate) fn as_raw_mut(&mut self) -> &mut RawTree<K, V> {
        &mut self.raw
    }
}

impl<K: Ord, V, B: Balance> Tree<K, V, B> {
    /// Returns a reference to the value corresponding to the key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns references to the key-value pair corresponding to the key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).and_then(|cursor| cursor.key_value())
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let handle = self.raw.find(key)?;
        Some(&mut self.raw.node_mut(handle).value)
    }

    /// Returns true if the map contains a value for the key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.raw.find(key).is_some()
    }

    /// Returns the value for the key, or [`KeyError`] when it is absent.
    /// Unlike indexing, an absent key does not panic.
    pub fn at<Q>(&self, key: &Q) -> Result<&V, KeyError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(KeyError)
    }

    /// Mutable counterpart of [`Self::at`].
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, KeyError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key).ok_or(KeyError)
    }

    /// Returns a cursor on the entry for the key, `None` if absent.
    pub fn find<Q>(&self, key: &Q) -> Option<Cursor<'_, K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.raw.find(key).map(|handle| Cursor::new(&self.raw, Some(handle)))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the key was present its value is overwritten in place, the old
    /// value is returned and the shape of the tree does not change.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.raw.insert(key, value) {
            Insertion::Replaced(old) => Some(old),
            Insertion::Created(handle) => {
                B::inserted(&mut self.raw, handle);
                None
            }
        }
    }

    /// Removes a key from the map.
    /// Returns the value at the key if the key was previously in the map.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value.
    ///
    /// A node with two children first trades places with its in-order
    /// predecessor, so it is always spliced out with at most one child.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let handle = self.raw.find(key)?;
        if self.raw.left(handle).is_some() && self.raw.right(handle).is_some() {
            let predecessor = self
                .raw
                .predecessor(handle)
                .expect("`remove_entry()` - node with a left child has a predecessor");
            B::swap(&mut self.raw, handle, predecessor);
        }

        if let Some((parent, diff)) = self.raw.unlink(handle) {
            B::unlinked(&mut self.raw, parent, diff);
        }
        let node = self.raw.free(handle);
        debug_assert!(self.raw.find(key).is_none());
        Some((node.key, node.value))
    }

    /// Panics unless every link, key order, the node count and all balance
    /// factors are consistent.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) {
        self.raw.check_consistency(B::TRACKS_BALANCE);
    }
}

impl<K, V, B: Balance> Default for Tree<K, V, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone, B> Clone for Tree<K, V, B> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            balance: PhantomData,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, B: Balance> fmt::Debug for Tree<K, V, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, B: Balance> PartialEq for Tree<K, V, B> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, B: Balance> Eq for Tree<K, V, B> {}

impl<K: Ord, V, B: Balance> FromIterator<(K, V)> for Tree<K, V, B> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V, B: Balance> Extend<(K, V)> for Tree<K, V, B> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, Q, V, B> Index<&Q> for Tree<K, V, B>
where
    K: Ord + Borrow<Q>,
    Q: Ord + ?Sized,
    B: Balance,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present; [`Tree::at`] reports it instead.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V, B: Balance> IntoIterator for &'a Tree<K, V, B> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, B: Balance> IntoIterator for &'a mut Tree<K, V, B> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
