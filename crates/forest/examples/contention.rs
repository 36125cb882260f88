//! Five writer threads sharing one AVL tree behind a coarse lock.
//!
//! Run:  cargo run --example contention --release -p forest

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use forest::metrics::MetricsRegistry;
use forest::{AtomicTree, AvlTree};

const WRITERS: i64 = 5;
const PER_WRITER: i64 = 20_000;

fn main() {
    let mut registry = MetricsRegistry::new();
    let tree = Arc::new(AtomicTree::new(AvlTree::with_registry(&mut registry)));

    let start = Instant::now();
    let handles: Vec<_> = (0..WRITERS)
        .map(|w| {
            let tree = Arc::clone(&tree);
            thread::spawn(move || {
                for i in 0..PER_WRITER {
                    let _ = tree.insert(i * WRITERS + w, w);
                }
                for i in (0..PER_WRITER).filter(|i| i % 3 == 0) {
                    tree.delete(&(i * WRITERS + w));
                }
            })
        })
        .collect();
    for handle in handles {
        if handle.join().is_err() {
            eprintln!("writer panicked");
            std::process::exit(1);
        }
    }
    let elapsed = start.elapsed();

    if let Err(e) = tree.read(|t| t.assert_valid()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
    println!("{} keys in {:?}", tree.len(), elapsed);
    println!("{:#}", registry.snapshot());
}
