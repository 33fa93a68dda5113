use avlbst::{AvlTree, KeyError, UnbalancedTree};

fn main() {
    let mut tree = AvlTree::new();
    tree.insert(0, "zero");
    tree.insert(1, "one");
    tree.insert(2, "two");
    tree.insert(2, "two");
    tree.insert(3, "three");
    tree.insert(4, "four");
    tree.insert(5, "five");
    assert_eq!(tree.get(&1), Some(&"one"));
    tree.remove(&1);
    assert!(tree.get(&1).is_none());
    assert_eq!(tree.at(&1), Err(KeyError));

    for (k, v) in &tree {
        println!("{k} => {v}");
    }

    let mut cursor = tree.find(&3).expect("3 was inserted above");
    while let Some((k, v)) = cursor.key_value() {
        println!("from 3 on: {k} => {v}");
        cursor.move_next();
    }

    let mut list = UnbalancedTree::new();
    for x in 0..5 {
        list.insert(x, ());
    }
    println!(
        "sorted input: avl height {}, unbalanced height {}, balanced: {}",
        tree.height(),
        list.height(),
        list.is_balanced()
    );
}
