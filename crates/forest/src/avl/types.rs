use crate::types::impl_kv_node;

#[derive(Clone, Debug)]
pub struct AvlNode<K, V> {
    pub parent: Option<u32>,
    pub left: Option<u32>,
    pub right: Option<u32>,
    pub key: K,
    pub data: V,
    /// Cached subtree height; a leaf is 0.
    pub height: i32,
}

impl<K, V> AvlNode<K, V> {
    pub fn new(key: K, data: V) -> Self {
        Self {
            parent: None,
            left: None,
            right: None,
            key,
            data,
            height: 0,
        }
    }
}

impl_kv_node!(AvlNode);
