use crate::arena::Handle;
use crate::raw::RawTree;

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Unbalanced {}
    impl Sealed for crate::avl::Avl {}
}

/// Selects the algorithm a [`Tree`](crate::Tree) runs after the plain
/// structural insert and removal steps.
///
/// Sealed; the implementations are [`Unbalanced`] and [`Avl`](crate::Avl).
pub trait Balance: sealed::Sealed {
    /// Whether nodes carry a maintained balance factor.
    #[doc(hidden)]
    const TRACKS_BALANCE: bool;

    /// Called once a new leaf `node` has been attached.
    #[doc(hidden)]
    fn inserted<K, V>(tree: &mut RawTree<K, V>, node: Handle);

    /// Exchanges the tree positions of `n1` and `n2` ahead of a removal.
    #[doc(hidden)]
    fn swap<K, V>(tree: &mut RawTree<K, V>, n1: Handle, n2: Handle) {
        tree.node_swap(n1, n2);
    }

    /// Called after a node was spliced out below `parent`, whose balance
    /// factor changes by `diff`.
    #[doc(hidden)]
    fn unlinked<K, V>(tree: &mut RawTree<K, V>, parent: Handle, diff: i8);
}

/// Plain binary search tree: no restructuring after insert or remove,
/// height is whatever the insertion order produces.
#[derive(Debug)]
pub enum Unbalanced {}

impl Balance for Unbalanced {
    const TRACKS_BALANCE: bool = false;

    fn inserted<K, V>(_tree: &mut RawTree<K, V>, _node: Handle) {}

    fn unlinked<K, V>(_tree: &mut RawTree<K, V>, _parent: Handle, _diff: i8) {}
}
