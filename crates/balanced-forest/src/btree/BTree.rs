use std::cmp::Ordering;
use std::fmt::Debug;

use tracing::debug;

use crate::error::{ConfigError, InvariantError};
use crate::types::{default_comparator, Comparator};

use super::types::BTreeNode;
use super::util;
use super::Order;

/// B-tree map of minimum degree `t`.
///
/// Full nodes are split on the way down, so the leaf that receives a new
/// entry always has room for it. Inserting an existing key replaces its value
/// in place.
pub struct BTree<K, V, C = Comparator<K>>
where
    C: Fn(&K, &K) -> Ordering,
{
    root: Option<BTreeNode<K, V>>,
    order: Order,
    comparator: C,
    len: usize,
}

impl<K, V> BTree<K, V, Comparator<K>>
where
    K: Ord,
{
    /// # Panics
    ///
    /// Panics if `order < 2`. Use [`BTree::try_new`] for a checked variant.
    pub fn new(order: usize) -> Self {
        let order = Order::new(order).unwrap_or_else(|err| panic!("{err}"));
        Self::with_order(order)
    }

    pub fn try_new(order: usize) -> Result<Self, ConfigError> {
        Ok(Self::with_order(Order::new(order)?))
    }

    pub fn with_order(order: Order) -> Self {
        Self::with_comparator(order, default_comparator::<K>)
    }

    /// Tree seeded with a single entry in a leaf root.
    pub fn with_entry(order: Order, key: K, value: V) -> Self {
        let mut tree = Self::with_order(order);
        tree.insert(key, value);
        tree
    }
}

impl<K, V> Default for BTree<K, V, Comparator<K>>
where
    K: Ord,
{
    fn default() -> Self {
        Self::with_order(Order::default())
    }
}

impl<K, V, C> BTree<K, V, C>
where
    C: Fn(&K, &K) -> Ordering,
{
    pub fn with_comparator(order: Order, comparator: C) -> Self {
        Self {
            root: None,
            order,
            comparator,
            len: 0,
        }
    }

    /// Inserts `key`, returning the previous value if the key was present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let order = self.order;
        let root = self.root.get_or_insert_with(BTreeNode::new_leaf);
        if root.is_full(order) {
            debug!(order = order.get(), "btree root split");
            let old = std::mem::replace(root, BTreeNode::new_internal());
            root.children.push(old);
            util::split_child(root, 0, order);
        }

        let prev = util::insert_non_full(root, key, value, order, &self.comparator);
        if prev.is_none() {
            self.len += 1;
        }
        prev
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        util::get(self.root.as_ref()?, key, &self.comparator)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        util::get_mut(self.root.as_mut()?, key, &self.comparator)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    pub fn order(&self) -> Order {
        self.order
    }

    pub fn root(&self) -> Option<&BTreeNode<K, V>> {
        self.root.as_ref()
    }

    /// Number of levels; every leaf sits at this depth.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut curr = self.root.as_ref();
        while let Some(node) = curr {
            depth += 1;
            curr = node.children.first();
        }
        depth
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter {
            stack: Vec::new(),
            remaining: self.len,
        };
        if let Some(root) = &self.root {
            iter.descend(root);
        }
        iter
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        let actual = util::assert_btree(self.root.as_ref(), self.order, &self.comparator)?;
        if actual != self.len {
            return Err(InvariantError::Len {
                expected: self.len,
                actual,
            });
        }
        Ok(())
    }

    pub fn print(&self) -> String
    where
        K: Debug,
        V: Debug,
    {
        util::print(self.root.as_ref(), "")
    }
}

/// In-order iterator over a [`BTree`].
pub struct Iter<'a, K, V> {
    stack: Vec<(&'a BTreeNode<K, V>, usize)>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn descend(&mut self, mut node: &'a BTreeNode<K, V>) {
        loop {
            self.stack.push((node, 0));
            match node.children.first() {
                Some(child) => node = child,
                None => break,
            }
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            let (node, i) = *top;
            if i < node.entries.len() {
                top.1 += 1;
                if let Some(child) = node.children.get(i + 1) {
                    self.descend(child);
                }
                self.remaining -= 1;
                let (k, v) = &node.entries[i];
                return Some((k, v));
            }
            self.stack.pop();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
