//! Depth-first and breadth-first walks over a [`BinaryTree`].
//!
//! Every depth-first order comes in two forms that yield identical
//! sequences: [`Recursion::Recursive`] collects the pairs by structural
//! recursion up front, [`Recursion::Iterative`] is a lazy iterator driving
//! its own stack.

use std::collections::VecDeque;

use crate::types::{BinaryTree, KvNode, Node, Pairs};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Recursion {
    Recursive,
    #[default]
    Iterative,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Order {
    Pre,
    In,
    Post,
    ReverseIn,
}

pub fn preorder<T>(tree: &T, recursion: Recursion) -> Pairs<'_, T::Key, T::Data>
where
    T: BinaryTree + ?Sized,
{
    match recursion {
        Recursion::Recursive => collect(tree, Order::Pre),
        Recursion::Iterative => Box::new(PreorderIter {
            tree,
            stack: tree.root().into_iter().collect(),
        }),
    }
}

pub fn inorder<T>(tree: &T, recursion: Recursion) -> Pairs<'_, T::Key, T::Data>
where
    T: BinaryTree + ?Sized,
{
    match recursion {
        Recursion::Recursive => collect(tree, Order::In),
        Recursion::Iterative => Box::new(InorderIter::new(tree, false)),
    }
}

pub fn postorder<T>(tree: &T, recursion: Recursion) -> Pairs<'_, T::Key, T::Data>
where
    T: BinaryTree + ?Sized,
{
    match recursion {
        Recursion::Recursive => collect(tree, Order::Post),
        Recursion::Iterative => Box::new(PostorderIter {
            tree,
            stack: Vec::new(),
            curr: tree.root(),
            emitted: None,
        }),
    }
}

/// Descending key order.
pub fn reverse_inorder<T>(tree: &T, recursion: Recursion) -> Pairs<'_, T::Key, T::Data>
where
    T: BinaryTree + ?Sized,
{
    match recursion {
        Recursion::Recursive => collect(tree, Order::ReverseIn),
        Recursion::Iterative => Box::new(InorderIter::new(tree, true)),
    }
}

/// Breadth-first, left to right within a level.
pub fn levelorder<T>(tree: &T) -> Pairs<'_, T::Key, T::Data>
where
    T: BinaryTree + ?Sized,
{
    Box::new(LevelorderIter {
        tree,
        queue: tree.root().into_iter().collect(),
    })
}

#[inline]
fn pair<T>(tree: &T, i: u32) -> (&T::Key, &T::Data)
where
    T: BinaryTree + ?Sized,
{
    let node = tree.node(i);
    (node.key(), node.data())
}

fn collect<T>(tree: &T, order: Order) -> Pairs<'_, T::Key, T::Data>
where
    T: BinaryTree + ?Sized,
{
    fn walk<'a, T>(
        tree: &'a T,
        node: Option<u32>,
        order: Order,
        out: &mut Vec<(&'a T::Key, &'a T::Data)>,
    ) where
        T: BinaryTree + ?Sized,
    {
        let Some(i) = node else {
            return;
        };
        let (l, r) = (tree.node(i).l(), tree.node(i).r());
        match order {
            Order::Pre => {
                out.push(pair(tree, i));
                walk(tree, l, order, out);
                walk(tree, r, order, out);
            }
            Order::In => {
                walk(tree, l, order, out);
                out.push(pair(tree, i));
                walk(tree, r, order, out);
            }
            Order::Post => {
                walk(tree, l, order, out);
                walk(tree, r, order, out);
                out.push(pair(tree, i));
            }
            Order::ReverseIn => {
                walk(tree, r, order, out);
                out.push(pair(tree, i));
                walk(tree, l, order, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(tree, tree.root(), order, &mut out);
    Box::new(out.into_iter())
}

struct PreorderIter<'a, T: ?Sized> {
    tree: &'a T,
    stack: Vec<u32>,
}

impl<'a, T> Iterator for PreorderIter<'a, T>
where
    T: BinaryTree + ?Sized,
{
    type Item = (&'a T::Key, &'a T::Data);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.stack.pop()?;
        let node = self.tree.node(i);
        self.stack.extend(node.r());
        self.stack.extend(node.l());
        Some(pair(self.tree, i))
    }
}

struct InorderIter<'a, T: ?Sized> {
    tree: &'a T,
    stack: Vec<u32>,
    curr: Option<u32>,
    reverse: bool,
}

impl<'a, T> InorderIter<'a, T>
where
    T: BinaryTree + ?Sized,
{
    fn new(tree: &'a T, reverse: bool) -> Self {
        Self {
            tree,
            stack: Vec::new(),
            curr: tree.root(),
            reverse,
        }
    }

    /// `(near, far)` children: `(l, r)` ascending, `(r, l)` descending.
    fn sides(&self, i: u32) -> (Option<u32>, Option<u32>) {
        let node = self.tree.node(i);
        if self.reverse {
            (node.r(), node.l())
        } else {
            (node.l(), node.r())
        }
    }
}

impl<'a, T> Iterator for InorderIter<'a, T>
where
    T: BinaryTree + ?Sized,
{
    type Item = (&'a T::Key, &'a T::Data);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(i) = self.curr {
            self.stack.push(i);
            self.curr = self.sides(i).0;
        }
        let i = self.stack.pop()?;
        self.curr = self.sides(i).1;
        Some(pair(self.tree, i))
    }
}

struct PostorderIter<'a, T: ?Sized> {
    tree: &'a T,
    stack: Vec<u32>,
    curr: Option<u32>,
    /// Last node yielded; when it is the right child of the stack top, the
    /// top's right subtree is finished.
    emitted: Option<u32>,
}

impl<'a, T> Iterator for PostorderIter<'a, T>
where
    T: BinaryTree + ?Sized,
{
    type Item = (&'a T::Key, &'a T::Data);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while let Some(i) = self.curr {
                self.stack.push(i);
                self.curr = self.tree.node(i).l();
            }
            let top = *self.stack.last()?;
            let r = self.tree.node(top).r();
            if r.is_some() && r != self.emitted {
                self.curr = r;
            } else {
                self.stack.pop();
                self.emitted = Some(top);
                return Some(pair(self.tree, top));
            }
        }
    }
}

struct LevelorderIter<'a, T: ?Sized> {
    tree: &'a T,
    queue: VecDeque<u32>,
}

impl<'a, T> Iterator for LevelorderIter<'a, T>
where
    T: BinaryTree + ?Sized,
{
    type Item = (&'a T::Key, &'a T::Data);

    fn next(&mut self) -> Option<Self::Item> {
        let i = self.queue.pop_front()?;
        let node = self.tree.node(i);
        self.queue.extend(node.l());
        self.queue.extend(node.r());
        Some(pair(self.tree, i))
    }
}
