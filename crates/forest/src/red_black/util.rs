//! Red-black fixups.
//!
//! An absent child (`None`) plays the role of the black sentinel leaf:
//! [`color_of`] reports it as black and it is never written to.

use crate::arena::Arena;
use crate::util::{rotate_left, rotate_right};

use super::types::{Color, RbNode};

type RbArena<K, V> = Arena<RbNode<K, V>>;

#[inline]
pub fn color_of<K, V>(arena: &RbArena<K, V>, node: Option<u32>) -> Color {
    node.map_or(Color::Black, |i| arena[i].color)
}

#[inline]
fn is_black<K, V>(arena: &RbArena<K, V>, node: Option<u32>) -> bool {
    color_of(arena, node) == Color::Black
}

#[inline]
fn set_color<K, V>(arena: &mut RbArena<K, V>, i: u32, color: Color) {
    arena[i].color = color;
}

fn parent_of<K, V>(arena: &RbArena<K, V>, i: u32) -> u32 {
    match arena[i].parent {
        Some(p) => p,
        None => unreachable!("red node {i} has no parent"),
    }
}

/// Restores the colour invariants after `z` was linked in red.
///
/// Returns the number of single rotations performed.
pub(crate) fn insert_fixup<K, V>(arena: &mut RbArena<K, V>, root: &mut Option<u32>, mut z: u32) -> u32 {
    let mut rotations = 0;
    while let Some(p) = arena[z].parent {
        if arena[p].color == Color::Black {
            break;
        }
        // A red parent is never the root.
        let g = parent_of(arena, p);
        if arena[g].left == Some(p) {
            let uncle = arena[g].right;
            if let Some(u) = uncle.filter(|&u| arena[u].color == Color::Red) {
                set_color(arena, p, Color::Black);
                set_color(arena, u, Color::Black);
                set_color(arena, g, Color::Red);
                z = g;
                continue;
            }
            if arena[p].right == Some(z) {
                z = p;
                rotate_left(arena, root, z);
                rotations += 1;
            }
            let p = parent_of(arena, z);
            let g = parent_of(arena, p);
            set_color(arena, p, Color::Black);
            set_color(arena, g, Color::Red);
            rotate_right(arena, root, g);
            rotations += 1;
        } else {
            let uncle = arena[g].left;
            if let Some(u) = uncle.filter(|&u| arena[u].color == Color::Red) {
                set_color(arena, p, Color::Black);
                set_color(arena, u, Color::Black);
                set_color(arena, g, Color::Red);
                z = g;
                continue;
            }
            if arena[p].left == Some(z) {
                z = p;
                rotate_right(arena, root, z);
                rotations += 1;
            }
            let p = parent_of(arena, z);
            let g = parent_of(arena, p);
            set_color(arena, p, Color::Black);
            set_color(arena, g, Color::Red);
            rotate_left(arena, root, g);
            rotations += 1;
        }
    }
    if let Some(r) = *root {
        set_color(arena, r, Color::Black);
    }
    rotations
}

fn sibling_of<K, V>(arena: &RbArena<K, V>, p: u32, left: bool) -> u32 {
    let s = if left { arena[p].right } else { arena[p].left };
    match s {
        Some(s) => s,
        None => unreachable!("double-black node under {p} has no sibling"),
    }
}

/// Absorbs the extra black left at `x` after a black node was spliced out.
///
/// `x` may be the sentinel, so its parent is passed separately. Returns the
/// number of single rotations performed.
pub(crate) fn delete_fixup<K, V>(
    arena: &mut RbArena<K, V>,
    root: &mut Option<u32>,
    mut x: Option<u32>,
    mut x_parent: Option<u32>,
) -> u32 {
    let mut rotations = 0;
    while x != *root && is_black(arena, x) {
        let Some(p) = x_parent else {
            break;
        };
        let left = arena[p].left == x;
        let mut w = sibling_of(arena, p, left);

        // Red sibling: rotate it above the parent so the sibling turns black.
        if arena[w].color == Color::Red {
            set_color(arena, w, Color::Black);
            set_color(arena, p, Color::Red);
            if left {
                rotate_left(arena, root, p);
            } else {
                rotate_right(arena, root, p);
            }
            rotations += 1;
            w = sibling_of(arena, p, left);
        }

        let (near, far) = if left {
            (arena[w].left, arena[w].right)
        } else {
            (arena[w].right, arena[w].left)
        };

        if is_black(arena, near) && is_black(arena, far) {
            set_color(arena, w, Color::Red);
            x = Some(p);
            x_parent = arena[p].parent;
            continue;
        }

        if is_black(arena, far) {
            if let Some(near) = near {
                set_color(arena, near, Color::Black);
            }
            set_color(arena, w, Color::Red);
            if left {
                rotate_right(arena, root, w);
            } else {
                rotate_left(arena, root, w);
            }
            rotations += 1;
            w = sibling_of(arena, p, left);
        }

        let parent_color = arena[p].color;
        set_color(arena, w, parent_color);
        set_color(arena, p, Color::Black);
        let far = if left { arena[w].right } else { arena[w].left };
        if let Some(far) = far {
            set_color(arena, far, Color::Black);
        }
        if left {
            rotate_left(arena, root, p);
        } else {
            rotate_right(arena, root, p);
        }
        rotations += 1;
        x = *root;
        x_parent = None;
    }
    if let Some(x) = x {
        set_color(arena, x, Color::Black);
    }
    rotations
}

/// Checks the root colour, red-red edges and black-height balance.
pub fn assert_red_black_tree<K, V>(arena: &RbArena<K, V>, root: Option<u32>) -> Result<(), String> {
    let Some(root) = root else {
        return Ok(());
    };
    if arena[root].color != Color::Black {
        return Err("Root is not black".to_string());
    }

    fn check<K, V>(arena: &RbArena<K, V>, node: Option<u32>) -> Result<usize, String> {
        let Some(node) = node else {
            return Ok(1);
        };
        let l = arena[node].left;
        let r = arena[node].right;

        if arena[node].color == Color::Red {
            if !is_black(arena, l) {
                return Err("Red node has red left child".to_string());
            }
            if !is_black(arena, r) {
                return Err("Red node has red right child".to_string());
            }
        }

        let lh = check(arena, l)?;
        let rh = check(arena, r)?;
        if lh != rh {
            return Err(format!("Black height mismatch under node {node}: {lh} vs {rh}"));
        }
        Ok(lh + usize::from(arena[node].color == Color::Black))
    }

    check(arena, Some(root)).map(|_| ())
}

/// Black-height of the tree, counting the sentinel leaves but not the root.
pub fn black_height<K, V>(arena: &RbArena<K, V>, root: Option<u32>) -> usize {
    let mut count = 0;
    let mut curr = root;
    while let Some(i) = curr {
        curr = arena[i].left;
        if is_black(arena, curr) {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::attach;

    #[test]
    fn sentinel_is_black() {
        let arena: RbArena<i32, ()> = Arena::new();
        assert_eq!(color_of(&arena, None), Color::Black);
    }

    #[test]
    fn red_root_is_rejected() {
        let mut arena = Arena::new();
        let mut root = None;
        let n = arena.alloc(RbNode::new(1, ()));
        attach(&mut arena, &mut root, None, true, n);
        assert_eq!(assert_red_black_tree(&arena, root), Err("Root is not black".to_string()));

        insert_fixup(&mut arena, &mut root, n);
        assert_eq!(assert_red_black_tree(&arena, root), Ok(()));
        assert_eq!(black_height(&arena, root), 1);
    }

    #[test]
    fn red_red_edge_is_rejected() {
        let mut arena = Arena::new();
        let mut root = None;
        let a = arena.alloc(RbNode::new(2, ()));
        attach(&mut arena, &mut root, None, true, a);
        set_color(&mut arena, a, Color::Black);
        let b = arena.alloc(RbNode::new(1, ()));
        attach(&mut arena, &mut root, Some(a), true, b);
        let c = arena.alloc(RbNode::new(0, ()));
        attach(&mut arena, &mut root, Some(b), true, c);

        assert!(assert_red_black_tree(&arena, root).is_err());
        assert_eq!(insert_fixup(&mut arena, &mut root, c), 1);
        assert_eq!(root, Some(b));
        assert_eq!(assert_red_black_tree(&arena, root), Ok(()));
    }
}
