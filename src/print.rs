use std::fmt::Display;

use crate::balance::Balance;
use crate::node::Link;
use crate::raw::RawTree;
use crate::tree::Tree;

const LEVELS: usize = 5;
const WIDTH: usize = 4 << (LEVELS - 1);

impl<K: Display, V, B: Balance> Tree<K, V, B> {
    /// Draws the top five levels of the tree as ASCII art, one line of keys
    /// per level with `/` and `\` marking the links in between. Deeper
    /// levels are summarised by a trailing `...` line.
    ///
    /// ```
    /// use avlbst::AvlTree;
    ///
    /// let tree: AvlTree<_, _> = [(1, ()), (2, ()), (3, ())].into_iter().collect();
    /// let picture = tree.render();
    /// let lines: Vec<&str> = picture.lines().collect();
    /// assert_eq!(lines[0].trim(), "2");
    /// assert_eq!(lines[2].split_whitespace().collect::<Vec<_>>(), ["1", "3"]);
    /// ```
    pub fn render(&self) -> String {
        render(self.as_raw())
    }
}

fn render<K: Display, V>(tree: &RawTree<K, V>) -> String {
    let mut out = String::new();
    let mut row: Vec<Link> = vec![tree.root()];

    for depth in 0..LEVELS {
        if row.iter().all(Option::is_none) {
            return out;
        }
        let slot = WIDTH >> depth;
        let mut keys = String::with_capacity(WIDTH);
        let mut links = String::with_capacity(WIDTH);

        for link in &row {
            let label: String = (*link)
                .map(|handle| tree.node(handle).key.to_string())
                .unwrap_or_default()
                .chars()
                .take(slot - 1)
                .collect();
            keys.push_str(&format!("{label:^slot$}"));

            let mut cell = vec![' '; slot];
            if let Some(handle) = *link {
                let node = tree.node(handle);
                if !node.is_leaf() && depth + 1 < LEVELS {
                    if node.left.is_some() {
                        cell[slot * 3 / 8] = '/';
                    }
                    if node.right.is_some() {
                        cell[slot * 5 / 8] = '\\';
                    }
                }
            }
            links.extend(cell);
        }

        out.push_str(keys.trim_end());
        out.push('\n');
        if !links.trim().is_empty() {
            out.push_str(links.trim_end());
            out.push('\n');
        }

        row = row
            .iter()
            .flat_map(|link| match link {
                Some(handle) => [tree.left(*handle), tree.right(*handle)],
                None => [None, None],
            })
            .collect();
    }

    if row.iter().any(Option::is_some) {
        out.push_str("...\n");
    }
    out
}
