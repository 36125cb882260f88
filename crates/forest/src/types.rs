//! Node and tree trait definitions.
//!
//! Nodes are stored in an [`Arena`] and refer to each other through
//! `Option<u32>` handles. All tree-manipulation helpers take the arena and
//! work with handles.

use crate::arena::Arena;
use crate::error::TreeError;
use crate::traversal::{self, Recursion};
use crate::util;

/// Lazy, finite sequence of `(key, data)` pairs produced by a traversal.
pub type Pairs<'a, K, V> = Box<dyn Iterator<Item = (&'a K, &'a V)> + 'a>;

/// Structural links (`p`, `l`, `r`).
///
/// For threaded nodes `l`/`r` hold the raw pointer, which may be a thread;
/// callers check the node's thread flags before treating it as a child.
pub trait Node {
    fn p(&self) -> Option<u32>;
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Key/data payload carried by every node.
pub trait KvNode<K, V>: Node {
    fn key(&self) -> &K;
    fn data(&self) -> &V;
    fn data_mut(&mut self) -> &mut V;
    /// Exchanges key and data with `other`, leaving links untouched.
    fn swap_payload(&mut self, other: &mut Self);
}

/// Implements [`Node`] and [`KvNode`] for a struct with `parent`, `left`,
/// `right`, `key` and `data` fields.
macro_rules! impl_kv_node {
    ($node:ident) => {
        impl<K, V> $crate::types::Node for $node<K, V> {
            fn p(&self) -> Option<u32> {
                self.parent
            }

            fn l(&self) -> Option<u32> {
                self.left
            }

            fn r(&self) -> Option<u32> {
                self.right
            }

            fn set_p(&mut self, v: Option<u32>) {
                self.parent = v;
            }

            fn set_l(&mut self, v: Option<u32>) {
                self.left = v;
            }

            fn set_r(&mut self, v: Option<u32>) {
                self.right = v;
            }
        }

        impl<K, V> $crate::types::KvNode<K, V> for $node<K, V> {
            fn key(&self) -> &K {
                &self.key
            }

            fn data(&self) -> &V {
                &self.data
            }

            fn data_mut(&mut self) -> &mut V {
                &mut self.data
            }

            fn swap_payload(&mut self, other: &mut Self) {
                std::mem::swap(&mut self.key, &mut other.key);
                std::mem::swap(&mut self.data, &mut other.data);
            }
        }
    };
}

pub(crate) use impl_kv_node;

/// A tree whose `l`/`r` links are always real children.
///
/// Implemented by the plain, AVL and red-black trees. Threaded trees are
/// excluded because their links may be threads.
pub trait BinaryTree {
    type Key;
    type Data;
    type Node: KvNode<Self::Key, Self::Data>;

    fn root(&self) -> Option<u32>;
    fn arena(&self) -> &Arena<Self::Node>;

    fn node(&self, idx: u32) -> &Self::Node {
        &self.arena()[idx]
    }

    /// Extra text shown next to the node by [`print`](crate::print::print).
    fn node_tag(&self, _idx: u32) -> Option<String> {
        None
    }

    fn leftmost(&self, idx: u32) -> u32 {
        util::leftmost(self.arena(), idx)
    }

    fn rightmost(&self, idx: u32) -> u32 {
        util::rightmost(self.arena(), idx)
    }

    fn successor(&self, idx: u32) -> Option<u32> {
        util::successor(self.arena(), idx)
    }

    fn predecessor(&self, idx: u32) -> Option<u32> {
        util::predecessor(self.arena(), idx)
    }

    fn first(&self) -> Option<u32> {
        util::first(self.arena(), self.root())
    }

    fn last(&self) -> Option<u32> {
        util::last(self.arena(), self.root())
    }

    /// Height of the subtree at `idx`; a leaf has height 0.
    fn height(&self, idx: u32) -> i32 {
        util::height(self.arena(), Some(idx))
    }

    /// Height of the whole tree, `-1` when empty.
    fn tree_height(&self) -> i32 {
        util::height(self.arena(), self.root())
    }

    fn preorder_traverse(&self) -> Pairs<'_, Self::Key, Self::Data> {
        traversal::preorder(self, Recursion::Iterative)
    }

    fn inorder_traverse(&self) -> Pairs<'_, Self::Key, Self::Data> {
        traversal::inorder(self, Recursion::Iterative)
    }

    fn postorder_traverse(&self) -> Pairs<'_, Self::Key, Self::Data> {
        traversal::postorder(self, Recursion::Iterative)
    }

    fn reverse_inorder_traverse(&self) -> Pairs<'_, Self::Key, Self::Data> {
        traversal::reverse_inorder(self, Recursion::Iterative)
    }

    fn levelorder_traverse(&self) -> Pairs<'_, Self::Key, Self::Data> {
        traversal::levelorder(self)
    }
}

/// Uniform surface shared by every tree kind.
pub trait SearchTree {
    type Key: Ord;
    type Data;

    /// Handle of the node holding `key`.
    fn search(&self, key: &Self::Key) -> Option<u32>;

    /// Fails with [`TreeError::DuplicateKey`] if `key` is present; the tree
    /// is left unchanged in that case.
    fn insert(&mut self, key: Self::Key, data: Self::Data) -> Result<(), TreeError<Self::Key>>;

    /// Removes `key`. Absent keys are ignored.
    ///
    /// Removing a node with two children moves its in-order successor's
    /// payload into it, so handles obtained before a delete may now point at
    /// a different key.
    fn delete(&mut self, key: &Self::Key);

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn clear(&mut self);

    fn key(&self, idx: u32) -> &Self::Key;

    fn data(&self, idx: u32) -> &Self::Data;

    fn data_mut(&mut self, idx: u32) -> &mut Self::Data;

    /// Handle of the smallest key.
    fn minimum(&self) -> Option<u32>;

    /// Handle of the largest key.
    fn maximum(&self) -> Option<u32>;

    /// Ascending `(key, data)` pairs.
    fn ordered(&self) -> Pairs<'_, Self::Key, Self::Data>;

    fn get(&self, key: &Self::Key) -> Option<&Self::Data> {
        self.search(key).map(|idx| self.data(idx))
    }

    fn get_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Data> {
        let idx = self.search(key)?;
        Some(self.data_mut(idx))
    }

    fn contains(&self, key: &Self::Key) -> bool {
        self.search(key).is_some()
    }
}
