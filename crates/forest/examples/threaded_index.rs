//! Stackless ascending and descending dumps through threaded trees.
//!
//! Run:  cargo run --example threaded_index -p forest

use forest::{LeftThreadedTree, RightThreadedTree, SearchTree};

const WORDS: [&str; 9] = [
    "maple", "birch", "oak", "alder", "willow", "cedar", "pine", "elm", "yew",
];

fn main() {
    let mut ascending = RightThreadedTree::new();
    let mut descending = LeftThreadedTree::new();
    for (i, word) in WORDS.iter().enumerate() {
        ascending.insert(*word, i).unwrap();
        descending.insert(*word, i).unwrap();
    }

    println!("{}", ascending.print());
    println!();

    let asc: Vec<_> = ascending.inorder_traverse().map(|(w, _)| *w).collect();
    let desc: Vec<_> = descending.reverse_inorder_traverse().map(|(w, _)| *w).collect();
    println!("ascending:  {}", asc.join(" "));
    println!("descending: {}", desc.join(" "));

    ascending.delete(&"maple");
    descending.delete(&"maple");
    ascending.assert_valid().unwrap();
    descending.assert_valid().unwrap();
    println!();
    println!("after deleting the root:");
    println!("{}", ascending.print());
}
