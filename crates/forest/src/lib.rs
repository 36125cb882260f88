//! Ordered key/value trees.
//!
//! Six tree kinds share the [`SearchTree`] surface:
//!
//! | Type | Balancing | Notes |
//! |------|-----------|-------|
//! | [`BinarySearchTree`] | none | reference implementation |
//! | [`AvlTree`] | height | cached heights, balance factor in `-1..=1` |
//! | [`RedBlackTree`] | colour | absent children act as black leaves |
//! | [`RightThreadedTree`] | none | right threads, ascending walks |
//! | [`LeftThreadedTree`] | none | left threads, descending walks |
//! | [`DoubleThreadedTree`] | none | both |
//!
//! Nodes live in a per-tree [`Arena`] and link to each other through
//! `Option<u32>` handles, so parent back-links never own anything.
//!
//! The plain, AVL and red-black trees also implement [`BinaryTree`], which
//! gives them the generic [`traversal`] orders and the [`print`] dump.

pub mod arena;
pub mod atomic;
pub mod avl;
pub mod bst;
pub mod cli;
pub mod error;
mod instrument;
pub mod map;
pub mod print;
pub mod red_black;
pub mod threaded;
pub mod traversal;
pub mod types;
pub mod util;

pub use arena::Arena;
pub use atomic::AtomicTree;
pub use avl::AvlTree;
pub use bst::BinarySearchTree;
pub use error::TreeError;
pub use map::ForestMap;
pub use red_black::{Color, RedBlackTree};
pub use threaded::{DoubleThreadedTree, LeftThreadedTree, RightThreadedTree, ThreadedTree};
pub use traversal::Recursion;
pub use types::{BinaryTree, KvNode, Node, Pairs, SearchTree};

pub use forest_metrics as metrics;
