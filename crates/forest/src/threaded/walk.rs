//! Stackless walks that follow threads.

use super::{DoubleThreadedTree, LeftThreadedTree, RightThreadedTree, ThreadedTree};
use crate::types::Pairs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Step {
    Ascending,
    Descending,
    Preorder,
}

/// Iterator over a threaded tree holding only the next node to visit.
pub struct ThreadWalk<'a, K, V, const LEFT: bool, const RIGHT: bool> {
    tree: &'a ThreadedTree<K, V, LEFT, RIGHT>,
    next: Option<u32>,
    step: Step,
}

impl<'a, K, V, const LEFT: bool, const RIGHT: bool> ThreadWalk<'a, K, V, LEFT, RIGHT> {
    /// In-order, starting from the leftmost node.
    pub fn ascending(tree: &'a ThreadedTree<K, V, LEFT, RIGHT>) -> Self {
        Self {
            tree,
            next: tree.first(),
            step: Step::Ascending,
        }
    }

    /// Reverse in-order, starting from the rightmost node.
    pub fn descending(tree: &'a ThreadedTree<K, V, LEFT, RIGHT>) -> Self {
        Self {
            tree,
            next: tree.last(),
            step: Step::Descending,
        }
    }

    /// After the current node: its left child if real, otherwise the real
    /// right child of the first node on its right-thread chain (itself
    /// included).
    fn preorder_next(&self, idx: u32) -> Option<u32> {
        let node = self.tree.node(idx);
        if let Some(l) = node.real_left() {
            return Some(l);
        }
        let mut curr = idx;
        loop {
            let n = self.tree.node(curr);
            if let Some(r) = n.real_right() {
                return Some(r);
            }
            curr = n.right?;
        }
    }
}

impl<'a, K, V, const LEFT: bool> ThreadWalk<'a, K, V, LEFT, true> {
    /// Pre-order; needs right threads to climb back out of a left subtree.
    pub fn preorder(tree: &'a ThreadedTree<K, V, LEFT, true>) -> Self {
        Self {
            tree,
            next: tree.root(),
            step: Step::Preorder,
        }
    }
}

impl<'a, K, V, const LEFT: bool, const RIGHT: bool> Iterator for ThreadWalk<'a, K, V, LEFT, RIGHT> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.next?;
        self.next = match self.step {
            Step::Ascending => self.tree.successor(i),
            Step::Descending => self.tree.predecessor(i),
            Step::Preorder => self.preorder_next(i),
        };
        let node = self.tree.node(i);
        Some((&node.key, &node.data))
    }
}

impl<K, V> RightThreadedTree<K, V> {
    pub fn inorder_traverse(&self) -> Pairs<'_, K, V> {
        Box::new(ThreadWalk::ascending(self))
    }

    pub fn preorder_traverse(&self) -> Pairs<'_, K, V> {
        Box::new(ThreadWalk::preorder(self))
    }
}

impl<K, V> LeftThreadedTree<K, V> {
    pub fn reverse_inorder_traverse(&self) -> Pairs<'_, K, V> {
        Box::new(ThreadWalk::descending(self))
    }
}

impl<K, V> DoubleThreadedTree<K, V> {
    pub fn inorder_traverse(&self) -> Pairs<'_, K, V> {
        Box::new(ThreadWalk::ascending(self))
    }

    pub fn preorder_traverse(&self) -> Pairs<'_, K, V> {
        Box::new(ThreadWalk::preorder(self))
    }

    pub fn reverse_inorder_traverse(&self) -> Pairs<'_, K, V> {
        Box::new(ThreadWalk::descending(self))
    }
}
