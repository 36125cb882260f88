use crate::types::impl_kv_node;

/// Node of a threaded tree.
///
/// When a thread flag is set the matching link is not a child: it points
/// at the in-order neighbour on that side, or is `None` when there is no
/// such neighbour or the tree does not thread that side.
#[derive(Clone, Debug)]
pub struct ThreadedNode<K, V> {
    pub parent: Option<u32>,
    pub left: Option<u32>,
    pub right: Option<u32>,
    pub key: K,
    pub data: V,
    pub left_thread: bool,
    pub right_thread: bool,
}

impl<K, V> ThreadedNode<K, V> {
    pub fn new(key: K, data: V) -> Self {
        Self {
            parent: None,
            left: None,
            right: None,
            key,
            data,
            left_thread: true,
            right_thread: true,
        }
    }

    /// Left child, ignoring a thread.
    #[inline]
    pub fn real_left(&self) -> Option<u32> {
        if self.left_thread {
            None
        } else {
            self.left
        }
    }

    /// Right child, ignoring a thread.
    #[inline]
    pub fn real_right(&self) -> Option<u32> {
        if self.right_thread {
            None
        } else {
            self.right
        }
    }
}

impl_kv_node!(ThreadedNode);
