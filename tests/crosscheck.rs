//! Drives both tree flavours and `BTreeMap` through the same operations
//! and compares everything observable through the public API.

use std::collections::BTreeMap;

use avlbst::{AvlTree, Balance, KeyError, Tree, UnbalancedTree};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Operation {
    Insert(u16, u32),
    Remove(u16),
    Get(u16),
    Clear,
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        6 => (0..512u16, any::<u32>()).prop_map(|(key, value)| Operation::Insert(key, value)),
        3 => (0..512u16).prop_map(Operation::Remove),
        2 => (0..512u16).prop_map(Operation::Get),
        1 => Just(Operation::Clear),
    ]
}

fn run<B: Balance>(operations: Vec<Operation>) -> Result<Tree<u16, u32, B>, TestCaseError> {
    let mut tree: Tree<u16, u32, B> = Tree::new();
    let mut model = BTreeMap::new();

    for operation in operations {
        match operation {
            Operation::Insert(key, value) => {
                prop_assert_eq!(tree.insert(key, value), model.insert(key, value));
            }
            Operation::Remove(key) => {
                prop_assert_eq!(tree.remove(&key), model.remove(&key));
            }
            Operation::Get(key) => {
                prop_assert_eq!(tree.get(&key), model.get(&key));
                prop_assert_eq!(tree.at(&key).ok(), model.get(&key));
                prop_assert_eq!(tree.contains_key(&key), model.contains_key(&key));
            }
            Operation::Clear => {
                tree.clear();
                model.clear();
            }
        }
        prop_assert_eq!(tree.len(), model.len());
        prop_assert_eq!(tree.is_empty(), model.is_empty());
        tree.check_consistency();
    }

    let entries: Vec<_> = tree.iter().map(|(key, value)| (*key, *value)).collect();
    let expected: Vec<_> = model.iter().map(|(key, value)| (*key, *value)).collect();
    assert_eq!(entries, expected);
    prop_assert!(tree.iter().rev().eq(model.iter().rev()));
    prop_assert_eq!(tree.first_key_value(), model.first_key_value());
    prop_assert_eq!(tree.last_key_value(), model.last_key_value());
    Ok(tree)
}

proptest! {
    #[test]
    fn avl_tree_matches_btree_map(operations in prop::collection::vec(operation(), 0..512)) {
        let tree = run::<avlbst::Avl>(operations)?;
        prop_assert!(tree.is_balanced());
        // 1.44 * log2(n + 2) bounds the height of any AVL tree.
        let bound = 1.4405 * ((tree.len() + 2) as f64).log2();
        prop_assert!(tree.height() as f64 <= bound);
    }

    #[test]
    fn unbalanced_tree_matches_btree_map(operations in prop::collection::vec(operation(), 0..512)) {
        let tree = run::<avlbst::Unbalanced>(operations)?;
        prop_assert!(tree.height() <= tree.len());
    }

    #[test]
    fn cursor_walks_in_key_order(keys in prop::collection::btree_set(any::<i64>(), 0..128)) {
        let tree: AvlTree<i64, ()> = keys.iter().map(|key| (*key, ())).collect();

        let mut cursor = tree.cursor_front();
        let mut walked = Vec::new();
        while let Some(key) = cursor.key() {
            walked.push(*key);
            cursor.move_next();
        }
        prop_assert_eq!(cursor, tree.cursor_end());
        prop_assert!(walked.iter().eq(keys.iter()));

        let mut cursor = tree.cursor_end();
        let mut walked = Vec::new();
        cursor.move_prev();
        while let Some(key) = cursor.key() {
            walked.push(*key);
            cursor.move_prev();
        }
        prop_assert!(walked.iter().eq(keys.iter().rev()));
    }

    #[test]
    fn both_flavours_agree(keys in prop::collection::vec(any::<u8>(), 0..256)) {
        let entries = || keys.iter().enumerate().map(|(i, key)| (*key, i));
        let avl: AvlTree<u8, usize> = entries().collect();
        let plain: UnbalancedTree<u8, usize> = entries().collect();
        prop_assert!(avl.iter().eq(plain.iter()));
        prop_assert_eq!(avl.len(), plain.len());
    }
}

#[test]
fn missing_key_reports_error() {
    let mut tree: AvlTree<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
    assert_eq!(tree.at("c"), Err(KeyError));
    assert_eq!(tree.at_mut("c"), Err(KeyError));
    assert_eq!(KeyError.to_string(), "key not found");
    assert_eq!(tree.len(), 2);
}
