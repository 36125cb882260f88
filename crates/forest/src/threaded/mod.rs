//! Threaded binary search trees.
//!
//! A link with no child behind it is reused as a thread to the in-order
//! neighbour on that side, so ordered walks need neither recursion nor a
//! stack. [`ThreadedTree`] is parameterised by which sides carry threads:
//!
//! - [`RightThreadedTree`]: right threads to successors, ascending walks.
//! - [`LeftThreadedTree`]: left threads to predecessors, descending walks.
//! - [`DoubleThreadedTree`]: both.
//!
//! On a side without threading a vacant link is simply `None`.

mod types;
mod walk;

pub use types::ThreadedNode;
pub use walk::ThreadWalk;

use std::cmp::Ordering;
use std::fmt::Debug;

use crate::arena::Arena;
use crate::error::TreeError;
use crate::print;
use crate::types::{KvNode, Pairs, SearchTree};
use crate::util;

#[derive(Clone, Debug)]
pub struct ThreadedTree<K, V, const LEFT: bool, const RIGHT: bool> {
    arena: Arena<ThreadedNode<K, V>>,
    root: Option<u32>,
}

pub type RightThreadedTree<K, V> = ThreadedTree<K, V, false, true>;
pub type LeftThreadedTree<K, V> = ThreadedTree<K, V, true, false>;
pub type DoubleThreadedTree<K, V> = ThreadedTree<K, V, true, true>;

impl<K, V, const LEFT: bool, const RIGHT: bool> Default for ThreadedTree<K, V, LEFT, RIGHT> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, const LEFT: bool, const RIGHT: bool> ThreadedTree<K, V, LEFT, RIGHT> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn root(&self) -> Option<u32> {
        self.root
    }

    pub fn node(&self, idx: u32) -> &ThreadedNode<K, V> {
        &self.arena[idx]
    }

    pub fn leftmost(&self, mut idx: u32) -> u32 {
        while let Some(l) = self.arena[idx].real_left() {
            idx = l;
        }
        idx
    }

    pub fn rightmost(&self, mut idx: u32) -> u32 {
        while let Some(r) = self.arena[idx].real_right() {
            idx = r;
        }
        idx
    }

    pub fn first(&self) -> Option<u32> {
        self.root.map(|r| self.leftmost(r))
    }

    pub fn last(&self) -> Option<u32> {
        self.root.map(|r| self.rightmost(r))
    }

    /// In-order successor; a single hop when right threads are kept.
    pub fn successor(&self, idx: u32) -> Option<u32> {
        let node = &self.arena[idx];
        if let Some(r) = node.real_right() {
            return Some(self.leftmost(r));
        }
        if RIGHT {
            return node.right;
        }
        let mut curr = idx;
        while let Some(p) = self.arena[curr].parent {
            if self.arena[p].real_left() == Some(curr) {
                return Some(p);
            }
            curr = p;
        }
        None
    }

    /// In-order predecessor; a single hop when left threads are kept.
    pub fn predecessor(&self, idx: u32) -> Option<u32> {
        let node = &self.arena[idx];
        if let Some(l) = node.real_left() {
            return Some(self.rightmost(l));
        }
        if LEFT {
            return node.left;
        }
        let mut curr = idx;
        while let Some(p) = self.arena[curr].parent {
            if self.arena[p].real_right() == Some(curr) {
                return Some(p);
            }
            curr = p;
        }
        None
    }

    /// Height of the subtree at `idx` over real children; a leaf is 0.
    pub fn height(&self, idx: u32) -> i32 {
        self.subtree_height(Some(idx))
    }

    /// `-1` when empty.
    pub fn tree_height(&self) -> i32 {
        self.subtree_height(self.root)
    }

    fn subtree_height(&self, node: Option<u32>) -> i32 {
        let children = |i: u32| (self.arena[i].real_left(), self.arena[i].real_right());
        util::levels(node, children) - 1
    }

    /// Replaces the real subtree at `u` with `v` in `u`'s parent.
    fn transplant(&mut self, u: u32, v: u32) {
        let p = self.arena[u].parent;
        match p {
            None => self.root = Some(v),
            Some(p) if self.arena[p].real_left() == Some(u) => self.arena[p].left = Some(v),
            Some(p) => self.arena[p].right = Some(v),
        }
        self.arena[v].parent = p;
    }

    /// Unlinks `z`, which has at most one real child, and re-aims the
    /// threads that pointed at it.
    fn splice(&mut self, z: u32) {
        let (left, right) = (self.arena[z].left, self.arena[z].right);
        match (self.arena[z].real_left(), self.arena[z].real_right()) {
            (None, None) => match self.arena[z].parent {
                None => self.root = None,
                Some(p) if self.arena[p].real_left() == Some(z) => {
                    // `z`'s predecessor becomes the parent's.
                    self.arena[p].left = left;
                    self.arena[p].left_thread = true;
                }
                Some(p) => {
                    self.arena[p].right = right;
                    self.arena[p].right_thread = true;
                }
            },
            (None, Some(c)) => {
                // The successor's left thread pointed at `z`.
                let s = self.leftmost(c);
                self.arena[s].left = left;
                self.transplant(z, c);
            }
            (Some(c), None) => {
                // The predecessor's right thread pointed at `z`.
                let pr = self.rightmost(c);
                self.arena[pr].right = right;
                self.transplant(z, c);
            }
            (Some(_), Some(_)) => unreachable!("splice of node {z} with two children"),
        }
    }

    /// Pretty-prints the real structure; threads show as `l→`/`r→` tags.
    pub fn print(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        let key_of = |i: Option<u32>| match i {
            Some(i) => format!("{:?}", self.arena[i].key),
            None => "∅".to_string(),
        };
        print::render(
            self.root,
            |i| (self.arena[i].real_left(), self.arena[i].real_right()),
            |i| {
                let n = &self.arena[i];
                let mut threads = Vec::new();
                if LEFT && n.left_thread {
                    threads.push(format!("l→{}", key_of(n.left)));
                }
                if RIGHT && n.right_thread {
                    threads.push(format!("r→{}", key_of(n.right)));
                }
                let tag = (!threads.is_empty()).then(|| threads.join(" "));
                print::label(&n.key, &n.data, tag)
            },
        )
    }
}

impl<K: Ord, V, const LEFT: bool, const RIGHT: bool> ThreadedTree<K, V, LEFT, RIGHT> {
    /// Checks real links and that every thread points at the true in-order
    /// neighbour (or is `None` at the extremes).
    pub fn assert_valid(&self) -> Result<(), String> {
        let mut order = Vec::with_capacity(self.arena.len());
        let mut stack = Vec::new();
        let mut curr = self.root;
        if let Some(r) = self.root {
            if self.arena[r].parent.is_some() {
                return Err("Root has parent".to_string());
            }
        }
        loop {
            while let Some(i) = curr {
                let n = &self.arena[i];
                for child in [n.real_left(), n.real_right()].into_iter().flatten() {
                    if self.arena[child].parent != Some(i) {
                        return Err(format!("Broken parent link under node {i}"));
                    }
                }
                if !n.left_thread && n.left.is_none() {
                    return Err(format!("Node {i} has an empty left child link"));
                }
                if !n.right_thread && n.right.is_none() {
                    return Err(format!("Node {i} has an empty right child link"));
                }
                stack.push(i);
                curr = n.real_left();
            }
            let Some(i) = stack.pop() else {
                break;
            };
            order.push(i);
            curr = self.arena[i].real_right();
        }

        if order.len() != self.arena.len() {
            return Err(format!(
                "{} nodes reachable, {} allocated",
                order.len(),
                self.arena.len()
            ));
        }
        for w in order.windows(2) {
            if self.arena[w[0]].key >= self.arena[w[1]].key {
                return Err("Node order violated".to_string());
            }
        }

        for (k, &i) in order.iter().enumerate() {
            let n = &self.arena[i];
            if n.left_thread {
                let expected = if LEFT {
                    k.checked_sub(1).map(|j| order[j])
                } else {
                    None
                };
                if n.left != expected {
                    return Err(format!(
                        "Left thread of node {i} is {:?}, expected {expected:?}",
                        n.left
                    ));
                }
            }
            if n.right_thread {
                let expected = if RIGHT { order.get(k + 1).copied() } else { None };
                if n.right != expected {
                    return Err(format!(
                        "Right thread of node {i} is {:?}, expected {expected:?}",
                        n.right
                    ));
                }
            }
        }
        Ok(())
    }
}

impl<K: Ord, V, const LEFT: bool, const RIGHT: bool> SearchTree for ThreadedTree<K, V, LEFT, RIGHT> {
    type Key = K;
    type Data = V;

    fn search(&self, key: &K) -> Option<u32> {
        let mut curr = self.root;
        while let Some(i) = curr {
            let n = &self.arena[i];
            curr = match key.cmp(&n.key) {
                Ordering::Less => n.real_left(),
                Ordering::Greater => n.real_right(),
                Ordering::Equal => return Some(i),
            };
        }
        None
    }

    fn insert(&mut self, key: K, data: V) -> Result<(), TreeError<K>> {
        let mut parent = None;
        let mut left = false;
        let mut curr = self.root;
        while let Some(i) = curr {
            let n = &self.arena[i];
            parent = Some(i);
            match key.cmp(&n.key) {
                Ordering::Less => {
                    left = true;
                    curr = n.real_left();
                }
                Ordering::Greater => {
                    left = false;
                    curr = n.real_right();
                }
                Ordering::Equal => return Err(TreeError::DuplicateKey(key)),
            }
        }

        let n = self.arena.alloc(ThreadedNode::new(key, data));
        let Some(p) = parent else {
            self.root = Some(n);
            return Ok(());
        };
        self.arena[n].parent = Some(p);
        if left {
            // The new node sits between the parent's old predecessor and the
            // parent itself.
            self.arena[n].left = self.arena[p].left;
            self.arena[n].right = RIGHT.then_some(p);
            self.arena[p].left = Some(n);
            self.arena[p].left_thread = false;
        } else {
            self.arena[n].right = self.arena[p].right;
            self.arena[n].left = LEFT.then_some(p);
            self.arena[p].right = Some(n);
            self.arena[p].right_thread = false;
        }
        Ok(())
    }

    fn delete(&mut self, key: &K) {
        let Some(mut z) = self.search(key) else {
            return;
        };
        if let (Some(_), Some(r)) = (self.arena[z].real_left(), self.arena[z].real_right()) {
            let s = self.leftmost(r);
            let (a, b) = self.arena.pair_mut(z, s);
            a.swap_payload(b);
            z = s;
        }
        self.splice(z);
        self.arena.free(z);
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
        Box::new(ThreadWalk::ascending(self))
    }
}
