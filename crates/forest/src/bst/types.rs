use crate::types::impl_kv_node;

#[derive(Clone, Debug)]
pub struct BstNode<K, V> {
    pub parent: Option<u32>,
    pub left: Option<u32>,
    pub right: Option<u32>,
    pub key: K,
    pub data: V,
}

impl<K, V> BstNode<K, V> {
    pub fn new(key: K, data: V) -> Self {
        Self {
            parent: None,
            left: None,
            right: None,
            key,
            data,
        }
    }
}

impl_kv_node!(BstNode);
