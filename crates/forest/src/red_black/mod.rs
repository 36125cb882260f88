//! Red-black tree.
//!
//! Insertion and deletion follow the classic fixup case analysis. Absent
//! children stand in for the shared black sentinel leaf.

mod types;
mod util;

pub use types::{Color, RbNode};
pub use util::{assert_red_black_tree, black_height, color_of};

use forest_metrics::MetricsRegistry;

use crate::arena::Arena;
use crate::error::TreeError;
use crate::instrument::Instruments;
use crate::types::{BinaryTree, Pairs, SearchTree};
use crate::util::{self as tree_util, Probe};

#[derive(Clone, Debug)]
pub struct RedBlackTree<K, V> {
    arena: Arena<RbNode<K, V>>,
    root: Option<u32>,
    instruments: Instruments,
}

impl<K, V> Default for RedBlackTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RedBlackTree<K, V> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            instruments: Instruments::default(),
        }
    }

    /// Counts rotations under `rbt.rotate` and samples `rbt.height`.
    pub fn with_registry(registry: &mut MetricsRegistry) -> Self {
        Self {
            instruments: Instruments::rotations_and_heights(registry, "rbt"),
            ..Self::new()
        }
    }

    pub fn color(&self, idx: u32) -> Color {
        self.arena[idx].color
    }

    fn record(&self, rotations: u32) {
        self.instruments.rotated(rotations);
        self.instruments.sample_height(|| self.tree_height());
    }
}

impl<K: Ord, V> RedBlackTree<K, V> {
    pub fn assert_valid(&self) -> Result<(), String> {
        tree_util::check_links(&self.arena, self.root)?;
        assert_red_black_tree(&self.arena, self.root)
    }
}

impl<K, V> BinaryTree for RedBlackTree<K, V> {
    type Key = K;
    type Data = V;
    type Node = RbNode<K, V>;

    fn root(&self) -> Option<u32> {
        self.root
    }

    fn arena(&self) -> &Arena<RbNode<K, V>> {
        &self.arena
    }

    fn node_tag(&self, idx: u32) -> Option<String> {
        let color = match self.arena[idx].color {
            Color::Red => "red",
            Color::Black => "black",
        };
        Some(color.to_string())
    }
}

impl<K: Ord, V> SearchTree for RedBlackTree<K, V> {
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
        let n = self.arena.alloc(RbNode::new(key, data));
        tree_util::attach(&mut self.arena, &mut self.root, parent, left, n);
        let rotations = if parent.is_none() {
            self.arena[n].color = Color::Black;
            0
        } else {
            util::insert_fixup(&mut self.arena, &mut self.root, n)
        };
        self.record(rotations);
        Ok(())
    }

    fn delete(&mut self, key: &K) {
        let Some(n) = self.search(key) else {
            return;
        };
        let unlinked = tree_util::unlink(&mut self.arena, &mut self.root, n);
        let removed = self.arena.free(unlinked.node);
        let rotations = if removed.color == Color::Black {
            util::delete_fixup(&mut self.arena, &mut self.root, unlinked.child, unlinked.parent)
        } else {
            0
        };
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
