//! Leaf-depth check for plain binary trees.

/// An owned binary tree node, independent of the search trees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinaryNode<T> {
    pub value: T,
    pub left: Option<Box<BinaryNode<T>>>,
    pub right: Option<Box<BinaryNode<T>>>,
}

impl<T> BinaryNode<T> {
    pub fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn new(value: T, left: Option<BinaryNode<T>>, right: Option<BinaryNode<T>>) -> Self {
        Self {
            value,
            left: left.map(Box::new),
            right: right.map(Box::new),
        }
    }
}

/// Returns true if, at every inner node, the left and right subtrees are
/// equally deep.
///
/// The one tolerated mismatch is a node whose only child is a leaf: depth 1
/// on one side against an empty side. Longer single-child chains fail. An
/// empty tree and a lone node trivially qualify.
///
/// ```
/// use avlbst::{equal_paths, BinaryNode};
///
/// let lopsided = BinaryNode::new(1, Some(BinaryNode::leaf(2)), None);
/// assert!(equal_paths(Some(&lopsided)));
///
/// let middle = BinaryNode::new(2, Some(BinaryNode::leaf(3)), None);
/// let chain = BinaryNode::new(1, Some(middle), None);
/// assert!(!equal_paths(Some(&chain)));
///
/// let uneven = BinaryNode::new(
///     1,
///     Some(BinaryNode::new(2, Some(BinaryNode::leaf(4)), None)),
///     Some(BinaryNode::leaf(3)),
/// );
/// assert!(!equal_paths(Some(&uneven)));
/// ```
pub fn equal_paths<T>(root: Option<&BinaryNode<T>>) -> bool {
    depth(root).is_some()
}

/// Depth of the deepest leaf below and including `node`, `None` as soon as
/// some inner node has mismatched sides.
fn depth<T>(node: Option<&BinaryNode<T>>) -> Option<usize> {
    let Some(node) = node else {
        return Some(0);
    };
    let left = depth(node.left.as_deref())?;
    let right = depth(node.right.as_deref())?;
    match (left, right) {
        (left, right) if left == right => Some(left + 1),
        (1, 0) | (0, 1) => Some(2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_single_node() {
        assert!(equal_paths::<i32>(None));
        assert!(equal_paths(Some(&BinaryNode::leaf(1))));
    }

    #[test]
    fn single_child_counts_one_leaf() {
        let tree = BinaryNode::new(1, Some(BinaryNode::leaf(2)), None);
        assert!(equal_paths(Some(&tree)));

        let tree = BinaryNode::new(1, None, Some(BinaryNode::leaf(2)));
        assert!(equal_paths(Some(&tree)));
    }

    #[test]
    fn single_child_chain_is_unequal() {
        // 1
        //  \
        //   2
        //    \
        //     3
        let tree = BinaryNode::new(
            1,
            None,
            Some(BinaryNode::new(2, None, Some(BinaryNode::leaf(3)))),
        );
        assert!(!equal_paths(Some(&tree)));

        let tree = BinaryNode::new(
            1,
            Some(BinaryNode::new(2, Some(BinaryNode::leaf(3)), None)),
            None,
        );
        assert!(!equal_paths(Some(&tree)));
    }

    #[test]
    fn chain_below_a_full_node() {
        //       1
        //      / \
        //     2   3
        //    /   / \
        //   4   6   7
        //  /
        // 5
        let deep = BinaryNode::new(4, Some(BinaryNode::leaf(5)), None);
        let tree = BinaryNode::new(
            1,
            Some(BinaryNode::new(2, Some(deep), None)),
            Some(BinaryNode::new(3, Some(BinaryNode::leaf(6)), Some(BinaryNode::leaf(7)))),
        );
        assert!(!equal_paths(Some(&tree)));
    }

    #[test]
    fn leaves_at_different_depths() {
        //     1
        //    / \
        //   2   3
        //  / \
        // 4   5
        let tree = BinaryNode::new(
            1,
            Some(BinaryNode::new(2, Some(BinaryNode::leaf(4)), Some(BinaryNode::leaf(5)))),
            Some(BinaryNode::leaf(3)),
        );
        assert!(!equal_paths(Some(&tree)));
    }

    #[test]
    fn chains_of_equal_length() {
        //     1
        //    / \
        //   2   3
        //  /     \
        // 4       5
        let tree = BinaryNode::new(
            1,
            Some(BinaryNode::new(2, Some(BinaryNode::leaf(4)), None)),
            Some(BinaryNode::new(3, None, Some(BinaryNode::leaf(5)))),
        );
        assert!(equal_paths(Some(&tree)));
    }

    #[test]
    fn mismatch_deep_in_one_subtree() {
        //       1
        //      / \
        //     2   3
        //    / \   \
        //   4   5   6
        //  /
        // 7
        let tree = BinaryNode::new(
            1,
            Some(BinaryNode::new(
                2,
                Some(BinaryNode::new(4, Some(BinaryNode::leaf(7)), None)),
                Some(BinaryNode::leaf(5)),
            )),
            Some(BinaryNode::new(3, None, Some(BinaryNode::leaf(6)))),
        );
        assert!(!equal_paths(Some(&tree)));
    }
}
