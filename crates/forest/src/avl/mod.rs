//! AVL tree.
//!
//! Every node caches its height. Inserts rotate at most once (single or
//! double rotation) at the first unbalanced ancestor; deletes walk all the
//! way to the root and may rotate on several levels.

mod types;
mod util;

pub use types::AvlNode;
pub use util::assert_avl_tree;

use forest_metrics::MetricsRegistry;

use crate::arena::Arena;
use crate::error::TreeError;
use crate::instrument::Instruments;
use crate::types::{BinaryTree, Pairs, SearchTree};
use crate::util::{self as tree_util, Probe};

#[derive(Clone, Debug)]
pub struct AvlTree<K, V> {
    arena: Arena<AvlNode<K, V>>,
    root: Option<u32>,
    instruments: Instruments,
}

impl<K, V> Default for AvlTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> AvlTree<K, V> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            instruments: Instruments::default(),
        }
    }

    /// Counts rotations under `avlt.rotate` and samples `avlt.height`.
    pub fn with_registry(registry: &mut MetricsRegistry) -> Self {
        Self {
            instruments: Instruments::rotations_and_heights(registry, "avlt"),
            ..Self::new()
        }
    }

    /// Left height minus right height.
    pub fn balance_factor(&self, idx: u32) -> i32 {
        util::bf(&self.arena, idx)
    }

    fn record(&self, rotations: u32) {
        self.instruments.rotated(rotations);
        self.instruments.sample_height(|| util::h(&self.arena, self.root));
    }
}

impl<K: Ord, V> AvlTree<K, V> {
    pub fn assert_valid(&self) -> Result<(), String> {
        tree_util::check_links(&self.arena, self.root)?;
        assert_avl_tree(&self.arena, self.root)
    }
}

impl<K, V> BinaryTree for AvlTree<K, V> {
    type Key = K;
    type Data = V;
    type Node = AvlNode<K, V>;

    fn root(&self) -> Option<u32> {
        self.root
    }

    fn arena(&self) -> &Arena<AvlNode<K, V>> {
        &self.arena
    }

    fn node_tag(&self, idx: u32) -> Option<String> {
        Some(format!("h={}", self.arena[idx].height))
    }

    /// Cached, so O(1).
    fn height(&self, idx: u32) -> i32 {
        self.arena[idx].height
    }

    fn tree_height(&self) -> i32 {
        util::h(&self.arena, self.root)
    }
}

impl<K: Ord, V> SearchTree for AvlTree<K, V> {
    type Key = K;
    type Data = V;

    fn search(&self, key: &K) -> Option<u32> {
        tree_util::find(&self.arena, self.root, key)
    }

    fn insert(&mut self, key: K, data: V) -> Result<(), TreeError<K>> {
        let (parent, left) = match tree_util::probe(&self.arena, self.root, &key) {
            Probe::Found(_) => return Err(TreeError::DuplicateKey(key)),
            Probe::Vacant { parent, left } => (parent, left),
        };
        let n = self.arena.alloc(AvlNode::new(key, data));
        tree_util::attach(&mut self.arena, &mut self.root, parent, left, n);

        let mut rotations = 0;
        if let Some(p) = parent {
            // A parent that just got its second child keeps its height, so
            // nothing above it can have changed.
            let full = self.arena[p].left.is_some() && self.arena[p].right.is_some();
            if !full {
                rotations = util::insert_fixup(&mut self.arena, &mut self.root, p);
            }
        }
        self.record(rotations);
        Ok(())
    }

    fn delete(&mut self, key: &K) {
        let Some(n) = self.search(key) else {
            return;
        };
        let unlinked = tree_util::unlink(&mut self.arena, &mut self.root, n);
        self.arena.free(unlinked.node);
        let rotations = util::delete_fixup(&mut self.arena, &mut self.root, unlinked.parent);
        self.record(rotations);
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
