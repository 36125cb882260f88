//! Slot storage for tree nodes.
//!
//! Every tree owns one [`Arena`]; links between nodes are `Option<u32>`
//! handles into it, so parent back-links never form ownership cycles.
//! Freed slots are chained into a free list and reused by later inserts.

use std::ops::{Index, IndexMut};

#[derive(Clone, Debug)]
enum Slot<N> {
    Occupied(N),
    Vacant { next_free: Option<u32> },
}

#[derive(Clone, Debug)]
pub struct Arena<N> {
    slots: Vec<Slot<N>>,
    free: Option<u32>,
    len: usize,
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Arena<N> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: None,
            len: 0,
        }
    }

    /// Stores `node` and returns its handle.
    pub fn alloc(&mut self, node: N) -> u32 {
        self.len += 1;
        match self.free {
            Some(idx) => {
                let slot = &mut self.slots[idx as usize];
                let Slot::Vacant { next_free } = *slot else {
                    unreachable!("free list points at occupied slot {idx}");
                };
                self.free = next_free;
                *slot = Slot::Occupied(node);
                idx
            }
            None => {
                self.slots.push(Slot::Occupied(node));
                (self.slots.len() - 1) as u32
            }
        }
    }

    /// Removes the node at `idx` and hands it back.
    pub fn free(&mut self, idx: u32) -> N {
        let slot = std::mem::replace(
            &mut self.slots[idx as usize],
            Slot::Vacant {
                next_free: self.free,
            },
        );
        match slot {
            Slot::Occupied(node) => {
                self.free = Some(idx);
                self.len -= 1;
                node
            }
            Slot::Vacant { .. } => panic!("double free of node {idx}"),
        }
    }

    pub fn get(&self, idx: u32) -> Option<&N> {
        match self.slots.get(idx as usize) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, idx: u32) -> Option<&mut N> {
        match self.slots.get_mut(idx as usize) {
            Some(Slot::Occupied(node)) => Some(node),
            _ => None,
        }
    }

    /// Mutable access to two distinct nodes at once.
    pub fn pair_mut(&mut self, a: u32, b: u32) -> (&mut N, &mut N) {
        assert_ne!(a, b, "pair_mut needs two distinct nodes");
        let (lo, hi, swapped) = if a < b { (a, b, false) } else { (b, a, true) };
        let (head, tail) = self.slots.split_at_mut(hi as usize);
        let (Slot::Occupied(x), Slot::Occupied(y)) = (&mut head[lo as usize], &mut tail[0]) else {
            panic!("dangling node handle in pair ({a}, {b})");
        };
        if swapped {
            (y, x)
        } else {
            (x, y)
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free = None;
        self.len = 0;
    }
}

impl<N> Index<u32> for Arena<N> {
    type Output = N;

    fn index(&self, idx: u32) -> &N {
        match self.slots.get(idx as usize) {
            Some(Slot::Occupied(node)) => node,
            _ => panic!("dangling node handle {idx}"),
        }
    }
}

impl<N> IndexMut<u32> for Arena<N> {
    fn index_mut(&mut self, idx: u32) -> &mut N {
        match self.slots.get_mut(idx as usize) {
            Some(Slot::Occupied(node)) => node,
            _ => panic!("dangling node handle {idx}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freed_slots_are_reused_last_in_first_out() {
        let mut arena = Arena::new();
        let a = arena.alloc("a");
        let b = arena.alloc("b");
        let c = arena.alloc("c");
        assert_eq!((a, b, c), (0, 1, 2));

        assert_eq!(arena.free(a), "a");
        assert_eq!(arena.free(c), "c");
        assert_eq!(arena.len(), 1);

        assert_eq!(arena.alloc("d"), c);
        assert_eq!(arena.alloc("e"), a);
        assert_eq!(arena.alloc("f"), 3);
        assert_eq!(arena[b], "b");
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn vacant_slots_are_invisible() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        arena.free(a);
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(7), None);
        assert!(arena.is_empty());
    }

    #[test]
    #[should_panic(expected = "dangling node handle")]
    fn indexing_a_freed_slot_panics() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        arena.free(a);
        let _value = arena[a];
    }

    #[test]
    fn pair_mut_keeps_argument_order() {
        let mut arena = Arena::new();
        let a = arena.alloc(1);
        let b = arena.alloc(2);
        let (x, y) = arena.pair_mut(b, a);
        std::mem::swap(x, y);
        assert_eq!((arena[a], arena[b]), (2, 1));
    }
}
