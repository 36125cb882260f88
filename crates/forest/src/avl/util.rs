use crate::arena::Arena;
use crate::types::Node;
use crate::util;

use super::types::AvlNode;

/// Cached height, `-1` for an absent subtree.
#[inline]
pub(crate) fn h<K, V>(arena: &Arena<AvlNode<K, V>>, node: Option<u32>) -> i32 {
    node.map_or(-1, |i| arena[i].height)
}

#[inline]
pub(crate) fn bf<K, V>(arena: &Arena<AvlNode<K, V>>, i: u32) -> i32 {
    h(arena, arena[i].left) - h(arena, arena[i].right)
}

pub(crate) fn update_height<K, V>(arena: &mut Arena<AvlNode<K, V>>, i: u32) {
    let height = 1 + h(arena, arena[i].left).max(h(arena, arena[i].right));
    arena[i].height = height;
}

fn l_rotate<K, V>(arena: &mut Arena<AvlNode<K, V>>, root: &mut Option<u32>, x: u32) -> u32 {
    let y = util::rotate_left(arena, root, x);
    update_height(arena, x);
    update_height(arena, y);
    y
}

fn r_rotate<K, V>(arena: &mut Arena<AvlNode<K, V>>, root: &mut Option<u32>, x: u32) -> u32 {
    let y = util::rotate_right(arena, root, x);
    update_height(arena, x);
    update_height(arena, y);
    y
}

/// Restores balance at `x` if its balance factor left `{-1, 0, 1}`.
///
/// Returns the subtree's new top and the number of single rotations done.
pub(crate) fn rebalance<K, V>(
    arena: &mut Arena<AvlNode<K, V>>,
    root: &mut Option<u32>,
    x: u32,
) -> (u32, u32) {
    let balance = bf(arena, x);
    if balance > 1 {
        let Some(l) = arena[x].left else {
            unreachable!("left-heavy node {x} without a left child");
        };
        if bf(arena, l) >= 0 {
            (r_rotate(arena, root, x), 1)
        } else {
            l_rotate(arena, root, l);
            (r_rotate(arena, root, x), 2)
        }
    } else if balance < -1 {
        let Some(r) = arena[x].right else {
            unreachable!("right-heavy node {x} without a right child");
        };
        if bf(arena, r) <= 0 {
            (l_rotate(arena, root, x), 1)
        } else {
            r_rotate(arena, root, r);
            (l_rotate(arena, root, x), 2)
        }
    } else {
        (x, 0)
    }
}

/// Walks up from `start` refreshing heights and rotates at the first
/// unbalanced ancestor. One rotation is always enough after an insert.
pub(crate) fn insert_fixup<K, V>(
    arena: &mut Arena<AvlNode<K, V>>,
    root: &mut Option<u32>,
    start: u32,
) -> u32 {
    let mut curr = Some(start);
    while let Some(i) = curr {
        update_height(arena, i);
        if bf(arena, i).abs() > 1 {
            return rebalance(arena, root, i).1;
        }
        curr = arena[i].p();
    }
    0
}

/// Walks up from `start` to the root, rotating at every unbalanced node.
pub(crate) fn delete_fixup<K, V>(
    arena: &mut Arena<AvlNode<K, V>>,
    root: &mut Option<u32>,
    start: Option<u32>,
) -> u32 {
    let mut rotations = 0;
    let mut curr = start;
    while let Some(i) = curr {
        update_height(arena, i);
        let (top, n) = rebalance(arena, root, i);
        rotations += n;
        curr = arena[top].p();
    }
    rotations
}

/// Checks the cached heights and the balance factor of every node.
pub fn assert_avl_tree<K, V>(arena: &Arena<AvlNode<K, V>>, root: Option<u32>) -> Result<(), String> {
    fn check<K, V>(arena: &Arena<AvlNode<K, V>>, node: Option<u32>) -> Result<i32, String> {
        let Some(i) = node else {
            return Ok(-1);
        };
        let lh = check(arena, arena[i].left)?;
        let rh = check(arena, arena[i].right)?;
        let height = 1 + lh.max(rh);
        if arena[i].height != height {
            return Err(format!(
                "Stale height at node {i}: cached {}, actual {height}",
                arena[i].height
            ));
        }
        if (lh - rh).abs() > 1 {
            return Err(format!("Node {i} is unbalanced: balance factor {}", lh - rh));
        }
        Ok(height)
    }

    check(arena, root).map(|_| ())
}
