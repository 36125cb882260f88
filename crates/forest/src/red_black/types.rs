use crate::types::impl_kv_node;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

#[derive(Clone, Debug)]
pub struct RbNode<K, V> {
    pub parent: Option<u32>,
    pub left: Option<u32>,
    pub right: Option<u32>,
    pub key: K,
    pub data: V,
    pub color: Color,
}

impl<K, V> RbNode<K, V> {
    /// New nodes start red.
    pub fn new(key: K, data: V) -> Self {
        Self {
            parent: None,
            left: None,
            right: None,
            key,
            data,
            color: Color::Red,
        }
    }
}

impl_kv_node!(RbNode);
