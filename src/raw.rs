use std::borrow::Borrow;
use std::cmp::Ordering;
use std::mem;

use crate::arena::{Arena, Handle};
use crate::node::{Link, Node};

/// Structural layer of the search tree: node storage, links and the plain
/// (unbalanced) binary search tree operations.
///
/// Balancing strategies build on the primitives here and only ever touch
/// links and balance factors, never keys or values.
#[derive(Clone)]
pub struct RawTree<K, V> {
    nodes: Arena<Node<K, V>>,
    root: Link,
}

/// Outcome of the plain BST insert.
pub(crate) enum Insertion<V> {
    /// A new leaf was attached.
    Created(Handle),
    /// The key was present; carries the overwritten value.
    Replaced(V),
}

#[allow(clippy::enum_variant_names)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

impl<K, V> RawTree<K, V> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn root(&self) -> Link {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    #[inline]
    pub(crate) fn parent(&self, handle: Handle) -> Link {
        self.node(handle).parent
    }

    #[inline]
    pub(crate) fn left(&self, handle: Handle) -> Link {
        self.node(handle).left
    }

    #[inline]
    pub(crate) fn right(&self, handle: Handle) -> Link {
        self.node(handle).right
    }

    #[inline]
    pub(crate) fn balance(&self, handle: Handle) -> i8 {
        self.node(handle).balance
    }

    #[inline]
    pub(crate) fn set_balance(&mut self, handle: Handle, balance: i8) {
        self.node_mut(handle).balance = balance;
    }

    pub(crate) fn is_left_child(&self, handle: Handle) -> bool {
        match self.parent(handle) {
            Some(parent) => self.left(parent) == Some(handle),
            None => false,
        }
    }

    /// Points the slot of `parent` that holds `old` at `new`.
    /// Without a parent, `old` was the root.
    pub(crate) fn replace_child(&mut self, parent: Link, old: Handle, new: Link) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let parent_node = self.node_mut(parent);
                if parent_node.left == Some(old) {
                    parent_node.left = new;
                } else {
                    debug_assert_eq!(
                        parent_node.right,
                        Some(old),
                        "`replace_child()` - not a child of `parent`"
                    );
                    parent_node.right = new;
                }
            }
        }
    }

    fn set_child(&mut self, parent: Handle, is_left: bool, child: Link) {
        if is_left {
            self.node_mut(parent).left = child;
        } else {
            self.node_mut(parent).right = child;
        }
    }

    pub(crate) fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.left(handle) {
            handle = left;
        }
        handle
    }

    pub(crate) fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.right(handle) {
            handle = right;
        }
        handle
    }

    pub(crate) fn first(&self) -> Link {
        self.root.map(|root| self.leftmost(root))
    }

    pub(crate) fn last(&self) -> Link {
        self.root.map(|root| self.rightmost(root))
    }

    /// In-order successor: leftmost of the right subtree, else the first
    /// ancestor reached from a left child.
    pub(crate) fn successor(&self, handle: Handle) -> Link {
        if let Some(right) = self.right(handle) {
            return Some(self.leftmost(right));
        }
        let mut child = handle;
        let mut parent = self.parent(handle);
        while let Some(current) = parent {
            if self.right(current) != Some(child) {
                break;
            }
            child = current;
            parent = self.parent(current);
        }
        parent
    }

    /// In-order predecessor, mirror image of [`Self::successor`].
    pub(crate) fn predecessor(&self, handle: Handle) -> Link {
        if let Some(left) = self.left(handle) {
            return Some(self.rightmost(left));
        }
        let mut child = handle;
        let mut parent = self.parent(handle);
        while let Some(current) = parent {
            if self.left(current) != Some(child) {
                break;
            }
            child = current;
            parent = self.parent(current);
        }
        parent
    }

    /// Exchanges the positions of two nodes without moving their payload.
    /// Handles held for any other node stay valid; either node may be the
    /// other's parent.
    pub(crate) fn node_swap(&mut self, n1: Handle, n2: Handle) {
        if n1 == n2 {
            return;
        }
        let exchange = |link: Link| match link {
            Some(handle) if handle == n1 => Some(n2),
            Some(handle) if handle == n2 => Some(n1),
            other => other,
        };

        let (p1, l1, r1) = {
            let node = self.node(n1);
            (node.parent, node.left, node.right)
        };
        let (p2, l2, r2) = {
            let node = self.node(n2);
            (node.parent, node.left, node.right)
        };
        let n1_is_left = self.is_left_child(n1);
        let n2_is_left = self.is_left_child(n2);

        // Outer neighbours first, sides were recorded above so siblings work too.
        if let Some(parent) = p1.filter(|&parent| parent != n2) {
            self.set_child(parent, n1_is_left, Some(n2));
        }
        if let Some(parent) = p2.filter(|&parent| parent != n1) {
            self.set_child(parent, n2_is_left, Some(n1));
        }
        for child in [l1, r1].into_iter().flatten().filter(|&child| child != n2) {
            self.node_mut(child).parent = Some(n2);
        }
        for child in [l2, r2].into_iter().flatten().filter(|&child| child != n1) {
            self.node_mut(child).parent = Some(n1);
        }

        let node = self.node_mut(n1);
        node.parent = exchange(p2);
        node.left = exchange(l2);
        node.right = exchange(r2);

        let node = self.node_mut(n2);
        node.parent = exchange(p1);
        node.left = exchange(l1);
        node.right = exchange(r1);

        if self.root == Some(n1) {
            self.root = Some(n2);
        } else if self.root == Some(n2) {
            self.root = Some(n1);
        }
    }

    /// Splices a node with at most one child out of the tree.
    ///
    /// Returns the former parent and the change in its balance factor:
    /// `+1` when its left side lost the node, `-1` for the right side.
    /// The node itself stays allocated until [`Self::free`].
    pub(crate) fn unlink(&mut self, handle: Handle) -> Option<(Handle, i8)> {
        let node = self.node(handle);
        debug_assert!(
            node.left.is_none() || node.right.is_none(),
            "`RawTree::unlink()` - node has two children"
        );
        let child = node.left.or(node.right);
        let parent = node.parent;

        if let Some(child) = child {
            self.node_mut(child).parent = parent;
        }
        match parent {
            None => {
                self.root = child;
                None
            }
            Some(parent) => {
                if self.left(parent) == Some(handle) {
                    self.node_mut(parent).left = child;
                    Some((parent, 1))
                } else {
                    self.node_mut(parent).right = child;
                    Some((parent, -1))
                }
            }
        }
    }

    /// Releases an unlinked node and hands back its payload.
    pub(crate) fn free(&mut self, handle: Handle) -> Node<K, V> {
        self.nodes.take(handle)
    }

    /// Releases all nodes children-first and empties the tree.
    pub(crate) fn clear(&mut self) {
        let mut order = Vec::with_capacity(self.len());
        self.postorder(|handle| order.push(handle));
        let released = order.len();
        for handle in order {
            self.nodes.free(handle);
        }
        debug_assert!(self.nodes.is_empty());
        self.nodes.clear();
        self.root = None;
        log::debug!("cleared tree, released {released} nodes");
    }

    /// Subtree heights in levels, indexed by handle; a leaf has height 1.
    pub(crate) fn heights(&self) -> Vec<usize> {
        let mut heights = vec![0; self.nodes.slot_count()];
        self.postorder(|handle| {
            let node = self.node(handle);
            let left = node.left.map_or(0, |left| heights[left.to_index()]);
            let right = node.right.map_or(0, |right| heights[right.to_index()]);
            heights[handle.to_index()] = 1 + left.max(right);
        });
        heights
    }

    /// Whether the two subtree heights differ by at most one at every node.
    pub(crate) fn is_balanced(&self) -> bool {
        let heights = self.heights();
        let height = |link: Link| link.map_or(0, |handle: Handle| heights[handle.to_index()]);
        let mut balanced = true;
        self.preorder(|handle| {
            let node = self.node(handle);
            if height(node.left).abs_diff(height(node.right)) > 1 {
                balanced = false;
            }
        });
        balanced
    }

    /// Slot-indexed mutable access to all nodes, for building `IterMut`.
    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = Option<&mut Node<K, V>>> {
        self.nodes.slots_mut()
    }

    pub(crate) fn preorder<F: FnMut(Handle)>(&self, f: F) {
        self.traverse(f, |_| {});
    }

    pub(crate) fn postorder<F: FnMut(Handle)>(&self, f: F) {
        self.traverse(|_| {}, f);
    }

    fn traverse<Pre, Post>(&self, mut preorder: Pre, mut postorder: Post)
    where
        Pre: FnMut(Handle),
        Post: FnMut(Handle),
    {
        if let Some(mut handle) = self.root {
            let mut dir = Direction::FromParent;
            loop {
                match dir {
                    Direction::FromParent => {
                        preorder(handle);
                        if let Some(left) = self.left(handle) {
                            handle = left;
                        } else {
                            dir = Direction::FromLeft;
                        }
                    }
                    Direction::FromLeft => {
                        if let Some(right) = self.right(handle) {
                            handle = right;
                            dir = Direction::FromParent;
                        } else {
                            dir = Direction::FromRight;
                        }
                    }
                    Direction::FromRight => {
                        postorder(handle);
                        match self.parent(handle) {
                            Some(parent) => {
                                if self.left(parent) == Some(handle) {
                                    dir = Direction::FromLeft;
                                } else {
                                    dir = Direction::FromRight;
                                }
                                handle = parent;
                            }
                            None => break,
                        }
                    }
                }
            }
        }
    }
}

impl<K: Ord, V> RawTree<K, V> {
    pub(crate) fn find<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node(handle);
            current = match key.cmp(node.key.borrow()) {
                Ordering::Equal => break,
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        current
    }

    /// Plain BST insert: overwrite on an equal key, otherwise attach a new
    /// leaf below the last visited node. Never restructures.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Insertion<V> {
        let mut parent: Link = None;
        let mut is_left = false;
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.node_mut(handle);
            match key.cmp(&node.key) {
                Ordering::Equal => return Insertion::Replaced(mem::replace(&mut node.value, value)),
                Ordering::Less => {
                    is_left = true;
                    current = node.left;
                }
                Ordering::Greater => {
                    is_left = false;
                    current = node.right;
                }
            }
            parent = Some(handle);
        }

        let handle = self.nodes.alloc(Node::new(key, value, parent));
        match parent {
            None => self.root = Some(handle),
            Some(parent) => self.set_child(parent, is_left, Some(handle)),
        }
        Insertion::Created(handle)
    }

    /// Panics if links, key order, node count or balance factors are off.
    /// `tracks_balance` selects between checking the stored factors
    /// against true heights and requiring them all to be zero.
    #[cfg(any(test, feature = "consistency_check"))]
    pub(crate) fn check_consistency(&self, tracks_balance: bool) {
        if let Some(root) = self.root {
            assert!(self.parent(root).is_none(), "root has a parent");
        }

        let heights = self.heights();
        let height =
            |link: Link| link.map_or(0, |handle: Handle| heights[handle.to_index()] as isize);
        let mut num_nodes = 0;
        self.preorder(|handle| {
            let node = self.node(handle);

            // Check link for left child node
            if let Some(left) = node.left {
                assert_eq!(self.parent(left), Some(handle));
                assert!(self.node(left).key < node.key);
            }

            // Check link for right child node
            if let Some(right) = node.right {
                assert_eq!(self.parent(right), Some(handle));
                assert!(self.node(right).key > node.key);
            }

            let difference = height(node.right) - height(node.left);
            if tracks_balance {
                assert_eq!(isize::from(node.balance), difference, "stale balance factor");
                assert!(difference.abs() <= 1, "AVL condition violated");
            } else {
                assert_eq!(node.balance, 0);
            }

            num_nodes += 1;
        });
        assert_eq!(num_nodes, self.len());

        // Whole-subtree ordering: in-order walk is strictly ascending
        let mut current = self.first();
        let mut walked = 0;
        while let Some(handle) = current {
            let next = self.successor(handle);
            if let Some(next) = next {
                assert!(self.node(handle).key < self.node(next).key);
            }
            walked += 1;
            current = next;
        }
        assert_eq!(walked, self.len());
    }
}
