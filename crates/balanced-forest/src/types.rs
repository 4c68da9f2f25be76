//! Node trait definitions.
//!
//! Nodes are plain structs stored in a [`Vec`]-backed arena. Each "pointer"
//! is an `Option<u32>` index into that arena, and every tree-manipulation
//! function takes the arena as a slice and works with indices.

use std::cmp::Ordering;

/// Child links (`l`, `r`) shared by every binary tree node.
pub trait Node {
    fn l(&self) -> Option<u32>;
    fn r(&self) -> Option<u32>;
    fn set_l(&mut self, v: Option<u32>);
    fn set_r(&mut self, v: Option<u32>);
}

/// Non-owning parent link (`p`) for trees that walk upward.
pub trait ParentNode: Node {
    fn p(&self) -> Option<u32>;
    fn set_p(&mut self, v: Option<u32>);
}

/// Comparator used by map/tree structures. Must be a strict total order.
pub type Comparator<K> = fn(&K, &K) -> Ordering;

/// Key/value node interface used by map-like structures.
///
/// The key is read-only once the node is in a tree; only the value may be
/// replaced.
pub trait KvNode<K, V>: Node {
    fn key(&self) -> &K;
    fn value(&self) -> &V;
    fn value_mut(&mut self) -> &mut V;
}

pub(crate) fn default_comparator<K: Ord>(a: &K, b: &K) -> Ordering {
    a.cmp(b)
}
