//! Coarse-grained locking around a whole tree.
//!
//! One [`RwLock`] guards the tree. `insert` and `delete` hold the write lock
//! for the entire mutation, cascading rotations and fixups included; reads
//! share the read lock and therefore never see a half-rotated tree. This is
//! a single lock per tree, not fine-grained or lock-free concurrency.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::TreeError;
use crate::types::SearchTree;

#[derive(Debug, Default)]
pub struct AtomicTree<T> {
    tree: RwLock<T>,
}

impl<T> AtomicTree<T> {
    pub fn new(tree: T) -> Self {
        Self {
            tree: RwLock::new(tree),
        }
    }

    pub fn into_inner(self) -> T {
        self.tree.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `f` against the tree under the read lock.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.read_guard())
    }

    // Poisoned locks are recovered.
    fn read_guard(&self) -> RwLockReadGuard<'_, T> {
        self.tree.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, T> {
        self.tree.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: SearchTree> AtomicTree<T> {
    pub fn insert(&self, key: T::Key, data: T::Data) -> Result<(), TreeError<T::Key>> {
        self.write_guard().insert(key, data)
    }

    pub fn delete(&self, key: &T::Key) {
        self.write_guard().delete(key);
    }

    pub fn contains(&self, key: &T::Key) -> bool {
        self.read_guard().contains(key)
    }

    pub fn get(&self, key: &T::Key) -> Option<T::Data>
    where
        T::Data: Clone,
    {
        self.read_guard().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.read_guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_guard().is_empty()
    }

    /// Ascending copy of every pair, taken under one read lock.
    pub fn snapshot(&self) -> Vec<(T::Key, T::Data)>
    where
        T::Key: Clone,
        T::Data: Clone,
    {
        self.read_guard()
            .ordered()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}
