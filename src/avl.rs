//! AVL balancing on top of the structural tree.
//!
//! Every node stores `balance = height(right) - height(left)`. At rest the
//! factor is -1, 0 or +1 everywhere; ±2 only exists while a fix-up runs.

use crate::arena::Handle;
use crate::balance::Balance;
use crate::raw::RawTree;

/// AVL height balancing: a single or double rotation after inserts, an
/// upward fix-up after removals. Height stays below ~1.44 log2(n + 1).
#[derive(Debug)]
pub enum Avl {}

impl Balance for Avl {
    const TRACKS_BALANCE: bool = true;

    fn inserted<K, V>(tree: &mut RawTree<K, V>, node: Handle) {
        let Some(mut parent) = tree.parent(node) else {
            return;
        };
        let delta = if tree.left(parent) == Some(node) { -1 } else { 1 };
        tree.update_balance(parent, delta);

        // The parent's subtree only grew if its factor left zero.
        let mut child = node;
        while tree.balance(parent) != 0 {
            let Some(grandparent) = tree.parent(parent) else {
                return;
            };
            let delta = if tree.left(grandparent) == Some(parent) { -1 } else { 1 };
            tree.update_balance(grandparent, delta);
            if tree.balance(grandparent).abs() == 2 {
                tree.fix_insert(child, parent, grandparent);
                return;
            }
            child = parent;
            parent = grandparent;
        }
    }

    fn swap<K, V>(tree: &mut RawTree<K, V>, n1: Handle, n2: Handle) {
        tree.node_swap(n1, n2);
        // Factors describe positions, so they follow the swap.
        let balance = tree.balance(n1);
        tree.set_balance(n1, tree.balance(n2));
        tree.set_balance(n2, balance);
    }

    fn unlinked<K, V>(tree: &mut RawTree<K, V>, parent: Handle, diff: i8) {
        let mut pending = Some((parent, diff));
        while let Some((node, diff)) = pending {
            pending = tree.fix_remove(node, diff);
        }
    }
}

impl<K, V> RawTree<K, V> {
    pub(crate) fn update_balance(&mut self, handle: Handle, delta: i8) {
        self.node_mut(handle).balance += delta;
    }

    /// Promotes `x`, the right child of `y`, into `y`'s position.
    /// Links only; balance factors are left to the caller.
    pub(crate) fn rotate_left(&mut self, x: Handle, y: Handle) {
        debug_assert_eq!(
            self.right(y),
            Some(x),
            "`rotate_left()` - `x` is not the right child of `y`"
        );
        log::trace!("rotate left");
        let parent = self.parent(y);
        let inner = self.left(x);

        self.node_mut(y).right = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(y);
        }

        self.node_mut(x).left = Some(y);
        self.node_mut(y).parent = Some(x);

        self.node_mut(x).parent = parent;
        self.replace_child(parent, y, Some(x));
    }

    /// Promotes `x`, the left child of `y`, into `y`'s position.
    pub(crate) fn rotate_right(&mut self, x: Handle, y: Handle) {
        debug_assert_eq!(
            self.left(y),
            Some(x),
            "`rotate_right()` - `x` is not the left child of `y`"
        );
        log::trace!("rotate right");
        let parent = self.parent(y);
        let inner = self.right(x);

        self.node_mut(y).left = inner;
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(y);
        }

        self.node_mut(x).right = Some(y);
        self.node_mut(y).parent = Some(x);

        self.node_mut(x).parent = parent;
        self.replace_child(parent, y, Some(x));
    }

    /// Restores balance at `grandparent` (factor ±2) after an insert that
    /// went through `parent` and then `child`. The rotated subtree gets back
    /// its height from before the insert, so nothing above changes.
    fn fix_insert(&mut self, child: Handle, parent: Handle, grandparent: Handle) {
        match self.balance(grandparent) {
            2 => {
                if self.right(parent) == Some(child) {
                    log::trace!("insert fix-up: single rotation, right-heavy");
                    self.rotate_left(parent, grandparent);
                    self.set_balance(parent, 0);
                    self.set_balance(grandparent, 0);
                } else {
                    log::trace!("insert fix-up: double rotation, right-heavy");
                    self.rotate_right(child, parent);
                    self.rotate_left(child, grandparent);
                    let (parent_balance, grandparent_balance) = match self.balance(child) {
                        1 => (0, -1),
                        -1 => (1, 0),
                        _ => (0, 0),
                    };
                    self.set_balance(parent, parent_balance);
                    self.set_balance(grandparent, grandparent_balance);
                    self.set_balance(child, 0);
                }
            }
            -2 => {
                if self.left(parent) == Some(child) {
                    log::trace!("insert fix-up: single rotation, left-heavy");
                    self.rotate_right(parent, grandparent);
                    self.set_balance(parent, 0);
                    self.set_balance(grandparent, 0);
                } else {
                    log::trace!("insert fix-up: double rotation, left-heavy");
                    self.rotate_left(child, parent);
                    self.rotate_right(child, grandparent);
                    let (parent_balance, grandparent_balance) = match self.balance(child) {
                        -1 => (0, 1),
                        1 => (-1, 0),
                        _ => (0, 0),
                    };
                    self.set_balance(parent, parent_balance);
                    self.set_balance(grandparent, grandparent_balance);
                    self.set_balance(child, 0);
                }
            }
            balance => unreachable!("`fix_insert()` - grandparent balance {balance} is not ±2"),
        }
    }

    /// One level of the removal fix-up: `node`'s balance changes by `diff`
    /// because one of its subtrees shrank.
    ///
    /// Returns the next level to fix when this subtree shrank as well.
    fn fix_remove(&mut self, node: Handle, diff: i8) -> Option<(Handle, i8)> {
        // Taken before any rotation; the subtree root keeps this parent slot.
        let upward = self
            .parent(node)
            .map(|parent| (parent, if self.left(parent) == Some(node) { 1 } else { -1 }));

        match self.balance(node) + diff {
            0 => {
                self.set_balance(node, 0);
                upward
            }
            balance @ (1 | -1) => {
                self.set_balance(node, balance);
                None
            }
            -2 => {
                let child = self
                    .left(node)
                    .expect("`fix_remove()` - left-heavy node without a left child");
                match self.balance(child) {
                    0 => {
                        log::trace!("remove fix-up: single rotation, height kept");
                        self.rotate_right(child, node);
                        self.set_balance(node, -1);
                        self.set_balance(child, 1);
                        None
                    }
                    -1 => {
                        log::trace!("remove fix-up: single rotation");
                        self.rotate_right(child, node);
                        self.set_balance(node, 0);
                        self.set_balance(child, 0);
                        upward
                    }
                    _ => {
                        log::trace!("remove fix-up: double rotation");
                        let grandchild = self
                            .right(child)
                            .expect("`fix_remove()` - right-heavy child without a right child");
                        self.rotate_left(grandchild, child);
                        self.rotate_right(grandchild, node);
                        let (node_balance, child_balance) = match self.balance(grandchild) {
                            -1 => (1, 0),
                            1 => (0, -1),
                            _ => (0, 0),
                        };
                        self.set_balance(node, node_balance);
                        self.set_balance(child, child_balance);
                        self.set_balance(grandchild, 0);
                        upward
                    }
                }
            }
            2 => {
                let child = self
                    .right(node)
                    .expect("`fix_remove()` - right-heavy node without a right child");
                match self.balance(child) {
                    0 => {
                        log::trace!("remove fix-up: single rotation, height kept");
                        self.rotate_left(child, node);
                        self.set_balance(node, 1);
                        self.set_balance(child, -1);
                        None
                    }
                    1 => {
                        log::trace!("remove fix-up: single rotation");
                        self.rotate_left(child, node);
                        self.set_balance(node, 0);
                        self.set_balance(child, 0);
                        upward
                    }
                    _ => {
                        log::trace!("remove fix-up: double rotation");
                        let grandchild = self
                            .left(child)
                            .expect("`fix_remove()` - left-heavy child without a left child");
                        self.rotate_right(grandchild, child);
                        self.rotate_left(grandchild, node);
                        let (node_balance, child_balance) = match self.balance(grandchild) {
                            -1 => (0, 1),
                            1 => (-1, 0),
                            _ => (0, 0),
                        };
                        self.set_balance(node, node_balance);
                        self.set_balance(child, child_balance);
                        self.set_balance(grandchild, 0);
                        upward
                    }
                }
            }
            balance => unreachable!("`fix_remove()` - balance {balance} out of range"),
        }
    }
}
