use avlbst::{AvlTree, UnbalancedTree};

fn main() {
    let mut avl = AvlTree::new();
    let mut plain = UnbalancedTree::new();
    for key in 1..=6 {
        avl.insert(key, key.to_string());
        plain.insert(key, key.to_string());
    }

    println!("AVL tree, level by level:");
    print!("{}", avl.render());
    println!();
    println!("Unbalanced tree, level by level:");
    print!("{}", plain.render());
}
