//! Unbalanced binary search tree.
//!
//! No rebalancing: the shape depends entirely on insertion order. Serves as
//! the reference the balanced engines are tested against.

mod types;

pub use types::BstNode;

use forest_metrics::MetricsRegistry;

use crate::arena::Arena;
use crate::error::TreeError;
use crate::instrument::Instruments;
use crate::types::{BinaryTree, Pairs, SearchTree};
use crate::util::{self, Probe};

#[derive(Clone, Debug)]
pub struct BinarySearchTree<K, V> {
    arena: Arena<BstNode<K, V>>,
    root: Option<u32>,
    instruments: Instruments,
}

impl<K, V> Default for BinarySearchTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> BinarySearchTree<K, V> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            instruments: Instruments::default(),
        }
    }

    /// Records the tree height under `bst.height` after every mutation.
    pub fn with_registry(registry: &mut MetricsRegistry) -> Self {
        Self {
            instruments: Instruments::heights(registry, "bst"),
            ..Self::new()
        }
    }
}

impl<K: Ord, V> BinarySearchTree<K, V> {
    /// Checks parent links and strict key order.
    pub fn assert_valid(&self) -> Result<(), String> {
        util::check_links(&self.arena, self.root)
    }
}

impl<K, V> BinaryTree for BinarySearchTree<K, V> {
    type Key = K;
    type Data = V;
    type Node = BstNode<K, V>;

    fn root(&self) -> Option<u32> {
        self.root
    }

    fn arena(&self) -> &Arena<BstNode<K, V>> {
        &self.arena
    }
}

impl<K: Ord, V> SearchTree for BinarySearchTree<K, V> {
    type Key = K;
    type Data = V;

    fn search(&self, key: &K) -> Option<u32> {
        util::find(&self.arena, self.root, key)
    }

    fn insert(&mut self, key: K, data: V) -> Result<(), TreeError<K>> {
        let (parent, left) = match util::probe(&self.arena, self.root, &key) {
            Probe::Found(_) => return Err(TreeError::DuplicateKey(key)),
            Probe::Vacant { parent, left } => (parent, left),
        };
        let n = self.arena.alloc(BstNode::new(key, data));
        util::attach(&mut self.arena, &mut self.root, parent, left, n);
        self.instruments.sample_height(|| self.tree_height());
        Ok(())
    }

    fn delete(&mut self, key: &K) {
        let Some(n) = self.search(key) else {
            return;
        };
        let unlinked = util::unlink(&mut self.arena, &mut self.root, n);
        self.arena.free(unlinked.node);
        self.instruments.sample_height(|| self.tree_height());
    }

    fn len(&self) -> usize {
        self.arena.len()
    }

    fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    fn key(&self, idx: u32) -> &K {
        &self.arena[idx].key
    }

    fn data(&self, idx: u32) -> &V {
        &self.arena[idx].data
    }

    fn data_mut(&mut self, idx: u32) -> &mut V {
        &mut self.arena[idx].data
    }

    fn minimum(&self) -> Option<u32> {
        self.first()
    }

    fn maximum(&self) -> Option<u32> {
        self.last()
    }

    fn ordered(&self) -> Pairs<'_, K, V> {
        self.inorder_traverse()
    }
}
