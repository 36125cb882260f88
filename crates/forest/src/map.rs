//! Ordered map over any [`SearchTree`].

use crate::error::TreeError;
use crate::types::{Pairs, SearchTree};

/// Map API on top of whichever tree kind `T` is.
#[derive(Clone, Debug, Default)]
pub struct ForestMap<T> {
    tree: T,
}

impl<T: SearchTree> ForestMap<T> {
    pub fn new(tree: T) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn into_tree(self) -> T {
        self.tree
    }

    /// Fails with [`TreeError::DuplicateKey`] when `key` is present.
    pub fn insert(&mut self, key: T::Key, data: T::Data) -> Result<(), TreeError<T::Key>> {
        self.tree.insert(key, data)
    }

    /// Inserts or overwrites; returns the replaced data.
    pub fn upsert(&mut self, key: T::Key, data: T::Data) -> Option<T::Data> {
        match self.tree.get_mut(&key) {
            Some(slot) => Some(std::mem::replace(slot, data)),
            None => {
                if self.tree.insert(key, data).is_err() {
                    unreachable!("key vanished between lookup and insert");
                }
                None
            }
        }
    }

    /// Overwrites an existing entry; returns the previous data.
    pub fn update(&mut self, key: T::Key, data: T::Data) -> Result<T::Data, TreeError<T::Key>> {
        match self.tree.get_mut(&key) {
            Some(slot) => Ok(std::mem::replace(slot, data)),
            None => Err(TreeError::KeyNotFound(key)),
        }
    }

    pub fn get(&self, key: &T::Key) -> Option<&T::Data> {
        self.tree.get(key)
    }

    pub fn get_mut(&mut self, key: &T::Key) -> Option<&mut T::Data> {
        self.tree.get_mut(key)
    }

    pub fn contains_key(&self, key: &T::Key) -> bool {
        self.tree.contains(key)
    }

    /// Returns whether `key` was present.
    pub fn remove(&mut self, key: &T::Key) -> bool {
        let present = self.tree.contains(key);
        self.tree.delete(key);
        present
    }

    pub fn min(&self) -> Result<(&T::Key, &T::Data), TreeError<T::Key>> {
        let idx = self.tree.minimum().ok_or(TreeError::EmptyTree)?;
        Ok((self.tree.key(idx), self.tree.data(idx)))
    }

    pub fn max(&self) -> Result<(&T::Key, &T::Data), TreeError<T::Key>> {
        let idx = self.tree.maximum().ok_or(TreeError::EmptyTree)?;
        Ok((self.tree.key(idx), self.tree.data(idx)))
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Ascending entries.
    pub fn iter(&self) -> Pairs<'_, T::Key, T::Data> {
        self.tree.ordered()
    }
}

impl<T: SearchTree> Extend<(T::Key, T::Data)> for ForestMap<T> {
    /// Later duplicates overwrite earlier entries.
    fn extend<I: IntoIterator<Item = (T::Key, T::Data)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.upsert(k, v);
        }
    }
}

impl<T: SearchTree + Default> FromIterator<(T::Key, T::Data)> for ForestMap<T> {
    fn from_iter<I: IntoIterator<Item = (T::Key, T::Data)>>(iter: I) -> Self {
        let mut map = Self::new(T::default());
        map.extend(iter);
        map
    }
}
