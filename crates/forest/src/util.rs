//! Arena helpers shared by the plain, AVL and red-black trees.
//!
//! Everything here assumes `l`/`r` are real children (no threads).

use std::cmp::Ordering;

use crate::arena::Arena;
use crate::types::{KvNode, Node};

/// Outcome of descending the tree for a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Probe {
    Found(u32),
    /// `parent` is `None` when the tree is empty.
    Vacant { parent: Option<u32>, left: bool },
}

pub(crate) fn probe<K, V, N>(arena: &Arena<N>, root: Option<u32>, key: &K) -> Probe
where
    K: Ord,
    N: KvNode<K, V>,
{
    let mut parent = None;
    let mut left = false;
    let mut curr = root;
    while let Some(i) = curr {
        parent = Some(i);
        match key.cmp(arena[i].key()) {
            Ordering::Less => {
                left = true;
                curr = arena[i].l();
            }
            Ordering::Greater => {
                left = false;
                curr = arena[i].r();
            }
            Ordering::Equal => return Probe::Found(i),
        }
    }
    Probe::Vacant { parent, left }
}

pub fn find<K, V, N>(arena: &Arena<N>, root: Option<u32>, key: &K) -> Option<u32>
where
    K: Ord,
    N: KvNode<K, V>,
{
    match probe(arena, root, key) {
        Probe::Found(i) => Some(i),
        Probe::Vacant { .. } => None,
    }
}

/// Hangs the detached node `n` under `parent` (or makes it the root).
pub(crate) fn attach<N: Node>(
    arena: &mut Arena<N>,
    root: &mut Option<u32>,
    parent: Option<u32>,
    left: bool,
    n: u32,
) {
    arena[n].set_p(parent);
    match parent {
        None => *root = Some(n),
        Some(p) if left => arena[p].set_l(Some(n)),
        Some(p) => arena[p].set_r(Some(n)),
    }
}

/// Replaces the subtree rooted at `u` with the one rooted at `v` in `u`'s
/// parent. `u`'s own links are left as they were.
pub(crate) fn transplant<N: Node>(
    arena: &mut Arena<N>,
    root: &mut Option<u32>,
    u: u32,
    v: Option<u32>,
) {
    let p = arena[u].p();
    match p {
        None => *root = v,
        Some(p) if arena[p].l() == Some(u) => arena[p].set_l(v),
        Some(p) => arena[p].set_r(v),
    }
    if let Some(v) = v {
        arena[v].set_p(p);
    }
}

/// A node detached by [`unlink`]; its slot is still allocated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Unlinked {
    pub node: u32,
    /// The child that took the node's place.
    pub child: Option<u32>,
    /// Parent of the detached node, where fixups start.
    pub parent: Option<u32>,
}

/// Detaches the node holding `n`'s payload from the tree.
///
/// With two children, `n` takes its in-order successor's payload and the
/// successor's node (which has no left child) is detached instead.
pub(crate) fn unlink<K, V, N>(arena: &mut Arena<N>, root: &mut Option<u32>, n: u32) -> Unlinked
where
    N: KvNode<K, V>,
{
    let mut node = n;
    if let (Some(_), Some(r)) = (arena[n].l(), arena[n].r()) {
        node = leftmost(arena, r);
        let (a, b) = arena.pair_mut(n, node);
        a.swap_payload(b);
    }
    let child = arena[node].l().or(arena[node].r());
    let parent = arena[node].p();
    transplant(arena, root, node, child);
    Unlinked {
        node,
        child,
        parent,
    }
}

/// Lifts `x`'s right child `y` into `x`'s place and returns `y`.
pub(crate) fn rotate_left<N: Node>(arena: &mut Arena<N>, root: &mut Option<u32>, x: u32) -> u32 {
    let Some(y) = arena[x].r() else {
        panic!("left rotation of node {x} without a right child");
    };
    let yl = arena[y].l();
    arena[x].set_r(yl);
    if let Some(yl) = yl {
        arena[yl].set_p(Some(x));
    }
    transplant(arena, root, x, Some(y));
    arena[y].set_l(Some(x));
    arena[x].set_p(Some(y));
    y
}

/// Lifts `x`'s left child `y` into `x`'s place and returns `y`.
pub(crate) fn rotate_right<N: Node>(arena: &mut Arena<N>, root: &mut Option<u32>, x: u32) -> u32 {
    let Some(y) = arena[x].l() else {
        panic!("right rotation of node {x} without a left child");
    };
    let yr = arena[y].r();
    arena[x].set_l(yr);
    if let Some(yr) = yr {
        arena[yr].set_p(Some(x));
    }
    transplant(arena, root, x, Some(y));
    arena[y].set_r(Some(x));
    arena[x].set_p(Some(y));
    y
}

/// Node with the smallest key under `idx`.
pub fn leftmost<N: Node>(arena: &Arena<N>, mut idx: u32) -> u32 {
    while let Some(l) = arena[idx].l() {
        idx = l;
    }
    idx
}

/// Node with the largest key under `idx`.
pub fn rightmost<N: Node>(arena: &Arena<N>, mut idx: u32) -> u32 {
    while let Some(r) = arena[idx].r() {
        idx = r;
    }
    idx
}

pub fn first<N: Node>(arena: &Arena<N>, root: Option<u32>) -> Option<u32> {
    root.map(|r| leftmost(arena, r))
}

pub fn last<N: Node>(arena: &Arena<N>, root: Option<u32>) -> Option<u32> {
    root.map(|r| rightmost(arena, r))
}

/// In-order successor.
pub fn successor<N: Node>(arena: &Arena<N>, mut curr: u32) -> Option<u32> {
    if let Some(r) = arena[curr].r() {
        return Some(leftmost(arena, r));
    }
    let mut p = arena[curr].p();
    while let Some(pi) = p {
        if arena[pi].r() != Some(curr) {
            return Some(pi);
        }
        curr = pi;
        p = arena[pi].p();
    }
    None
}

/// In-order predecessor.
pub fn predecessor<N: Node>(arena: &Arena<N>, mut curr: u32) -> Option<u32> {
    if let Some(l) = arena[curr].l() {
        return Some(rightmost(arena, l));
    }
    let mut p = arena[curr].p();
    while let Some(pi) = p {
        if arena[pi].l() != Some(curr) {
            return Some(pi);
        }
        curr = pi;
        p = arena[pi].p();
    }
    None
}

/// Edges on the longest downward path; `-1` for an absent subtree.
///
/// Walks level by level, so degenerate chains do not grow the call stack.
pub fn height<N: Node>(arena: &Arena<N>, node: Option<u32>) -> i32 {
    levels(node, |i| (arena[i].l(), arena[i].r())) - 1
}

/// Number of levels under `root` given each node's `(left, right)` children.
pub(crate) fn levels<C>(root: Option<u32>, children: C) -> i32
where
    C: Fn(u32) -> (Option<u32>, Option<u32>),
{
    let mut count = 0;
    let mut level: Vec<u32> = root.into_iter().collect();
    let mut next = Vec::new();
    while !level.is_empty() {
        count += 1;
        for i in level.drain(..) {
            let (l, r) = children(i);
            next.extend(l);
            next.extend(r);
        }
        std::mem::swap(&mut level, &mut next);
    }
    count
}

/// Verifies parent back-links and strict key order under `root`.
pub fn check_links<K, V, N>(arena: &Arena<N>, root: Option<u32>) -> Result<(), String>
where
    K: Ord,
    N: KvNode<K, V>,
{
    let Some(root) = root else {
        return Ok(());
    };
    if arena[root].p().is_some() {
        return Err("Root has parent".to_string());
    }

    let mut stack = vec![root];
    while let Some(i) = stack.pop() {
        for child in [arena[i].l(), arena[i].r()].into_iter().flatten() {
            if arena[child].p() != Some(i) {
                return Err(format!("Broken parent link under node {i}"));
            }
            stack.push(child);
        }
    }

    let mut curr = first(arena, Some(root));
    let mut prev: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev {
            if arena[prev].key() >= arena[i].key() {
                return Err("Node order violated".to_string());
            }
        }
        prev = Some(i);
        curr = successor(arena, i);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bst::BstNode;

    // 2 -> (1, 3)
    fn small() -> (Arena<BstNode<i32, ()>>, Option<u32>) {
        let mut arena = Arena::new();
        let mut root = None;
        for key in [2, 1, 3] {
            let Probe::Vacant { parent, left } = probe(&arena, root, &key) else {
                unreachable!();
            };
            let n = arena.alloc(BstNode::new(key, ()));
            attach(&mut arena, &mut root, parent, left, n);
        }
        (arena, root)
    }

    fn keys(arena: &Arena<BstNode<i32, ()>>, root: Option<u32>) -> Vec<i32> {
        let mut out = Vec::new();
        let mut curr = first(arena, root);
        while let Some(i) = curr {
            out.push(arena[i].key);
            curr = successor(arena, i);
        }
        out
    }

    #[test]
    fn successor_and_predecessor_walk_in_order() {
        let (arena, root) = small();
        assert_eq!(keys(&arena, root), vec![1, 2, 3]);

        let three = last(&arena, root).unwrap();
        let two = predecessor(&arena, three).unwrap();
        let one = predecessor(&arena, two).unwrap();
        assert_eq!(arena[one].key, 1);
        assert_eq!(predecessor(&arena, one), None);
        assert_eq!(successor(&arena, three), None);
    }

    #[test]
    fn rotations_preserve_order_and_links() {
        let (mut arena, mut root) = small();
        let old_root = root.unwrap();

        let top = rotate_left(&mut arena, &mut root, old_root);
        assert_eq!(root, Some(top));
        assert_eq!(arena[top].key, 3);
        assert_eq!(keys(&arena, root), vec![1, 2, 3]);
        check_links(&arena, root).unwrap();

        let top = rotate_right(&mut arena, &mut root, top);
        assert_eq!(arena[top].key, 2);
        assert_eq!(height(&arena, root), 1);
        check_links(&arena, root).unwrap();
    }

    #[test]
    fn height_of_a_chain_counts_every_edge() {
        let mut arena = Arena::new();
        let mut root = None;
        let mut parent = None;
        for key in 0..50_000 {
            let n = arena.alloc(BstNode::new(key, ()));
            attach(&mut arena, &mut root, parent, false, n);
            parent = Some(n);
        }
        assert_eq!(height(&arena, root), 49_999);
    }

    #[test]
    fn height_of_absent_subtree_is_minus_one() {
        let arena: Arena<BstNode<i32, ()>> = Arena::new();
        assert_eq!(height(&arena, None), -1);
    }
}
