use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::InvariantError;
use crate::types::{default_comparator, Comparator, KvNode};
use crate::util::{find, first, last, InOrder};

use super::types::AvlNode;
use super::util;

/// AVL tree map.
///
/// Nodes live in an arena and are addressed by stable `u32` indices; the
/// index of an entry never changes once inserted.
///
/// Inserting a key that is already present replaces its value in place and
/// leaves the tree shape untouched.
pub struct AvlMap<K, V, C = Comparator<K>>
where
    C: Fn(&K, &K) -> Ordering,
{
    arena: Vec<AvlNode<K, V>>,
    root: Option<u32>,
    comparator: C,
}

impl<K, V> AvlMap<K, V, Comparator<K>>
where
    K: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<K>)
    }

    /// Map seeded with a single entry at the root.
    pub fn with_entry(key: K, value: V) -> Self {
        let mut map = Self::new();
        map.insert(key, value);
        map
    }
}

impl<K, V> Default for AvlMap<K, V, Comparator<K>>
where
    K: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C> AvlMap<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            arena: Vec::new(),
            root: None,
            comparator,
        }
    }

    /// Inserts `key`, returning the previous value if the key was present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(i) = self.find(&key) {
            return Some(std::mem::replace(self.arena[i as usize].value_mut(), value));
        }
        self.arena.push(AvlNode::new(key, value));
        let idx = u32::try_from(self.arena.len() - 1).expect("arena index overflow");
        self.root = Some(util::insert(
            &mut self.arena,
            self.root,
            idx,
            &self.comparator,
        ));
        None
    }

    /// Arena index of the node holding `key`.
    pub fn find(&self, key: &K) -> Option<u32> {
        find(&self.arena, self.root, key, |n| &n.k, &self.comparator)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.find(key).map(|i| &self.arena[i as usize].v)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let idx = self.find(key)?;
        Some(&mut self.arena[idx as usize].v)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    pub fn root_index(&self) -> Option<u32> {
        self.root
    }

    pub fn node(&self, idx: u32) -> &AvlNode<K, V> {
        &self.arena[idx as usize]
    }

    pub fn key(&self, idx: u32) -> &K {
        &self.arena[idx as usize].k
    }

    pub fn value(&self, idx: u32) -> &V {
        &self.arena[idx as usize].v
    }

    /// Cached height of the subtree at `idx`; 0 for `None`.
    pub fn height(&self, idx: Option<u32>) -> u32 {
        util::height(&self.arena, idx)
    }

    pub fn balance_factor(&self, idx: Option<u32>) -> i64 {
        util::balance_factor(&self.arena, idx)
    }

    pub fn first(&self) -> Option<u32> {
        first(&self.arena, self.root)
    }

    pub fn last(&self) -> Option<u32> {
        last(&self.arena, self.root)
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        InOrder::new(&self.arena, self.root).map(|i| {
            let n = &self.arena[i as usize];
            (&n.k, &n.v)
        })
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        util::assert_avl_tree(&self.arena, self.root, &self.comparator)
    }

    pub fn print(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        util::print(&self.arena, self.root, "")
    }
}
