//! Insert/search/delete throughput for every tree kind.
//!
//! Run:  cargo run --example perf --release -p forest

use std::time::Instant;

use forest::metrics::MetricsRegistry;
use forest::{
    AvlTree, BinarySearchTree, DoubleThreadedTree, LeftThreadedTree, RedBlackTree,
    RightThreadedTree, SearchTree,
};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

const N: i64 = 20_000;

// ── harness ───────────────────────────────────────────────────────────────────

fn ops_per_sec(n: usize, start: Instant) -> u64 {
    (n as f64 / start.elapsed().as_secs_f64()) as u64
}

fn run<T: SearchTree<Key = i64, Data = i64>>(name: &str, mut tree: T, keys: &[i64]) {
    let start = Instant::now();
    for &k in keys {
        let _ = tree.insert(k, k);
    }
    let insert = ops_per_sec(keys.len(), start);

    let start = Instant::now();
    let hits = keys.iter().filter(|k| tree.contains(k)).count();
    let search = ops_per_sec(keys.len(), start);
    assert_eq!(hits, keys.len());

    let start = Instant::now();
    for k in keys {
        tree.delete(k);
    }
    let delete = ops_per_sec(keys.len(), start);

    println!("{name:<16} {insert:>12} {search:>12} {delete:>12}");
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() {
    let mut keys: Vec<i64> = (0..N).collect();
    keys.shuffle(&mut Xoshiro256StarStar::seed_from_u64(7));

    let mut registry = MetricsRegistry::new();
    println!("{:<16} {:>12} {:>12} {:>12}", "ops/s", "insert", "search", "delete");
    run("bst", BinarySearchTree::new(), &keys);
    run("avl", AvlTree::with_registry(&mut registry), &keys);
    run("red-black", RedBlackTree::with_registry(&mut registry), &keys);
    run("right-threaded", RightThreadedTree::new(), &keys);
    run("left-threaded", LeftThreadedTree::new(), &keys);
    run("double-threaded", DoubleThreadedTree::new(), &keys);

    println!();
    println!("{:#}", registry.snapshot());
}
