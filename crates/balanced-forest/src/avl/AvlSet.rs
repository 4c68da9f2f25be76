use std::cmp::Ordering;
use std::fmt::Debug;

use crate::error::InvariantError;
use crate::types::{default_comparator, Comparator};

use super::avl_map::AvlMap;
use super::types::AvlNode;

/// AVL tree set backed by [`AvlMap<T, ()>`].
///
/// Duplicate values are ignored.
pub struct AvlSet<T, C = Comparator<T>>
where
    C: Fn(&T, &T) -> Ordering,
{
    inner: AvlMap<T, (), C>,
}

impl<T> AvlSet<T, Comparator<T>>
where
    T: Ord,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<T>)
    }

    /// Set seeded with a single value at the root.
    pub fn with_value(value: T) -> Self {
        let mut set = Self::new();
        set.insert(value);
        set
    }
}

impl<T> Default for AvlSet<T, Comparator<T>>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> AvlSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            inner: AvlMap::with_comparator(comparator),
        }
    }

    /// Returns `false` if an equal value was already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.inner.insert(value, ()).is_none()
    }

    pub fn contains(&self, value: &T) -> bool {
        self.inner.contains_key(value)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn root_index(&self) -> Option<u32> {
        self.inner.root_index()
    }

    pub fn node(&self, idx: u32) -> &AvlNode<T, ()> {
        self.inner.node(idx)
    }

    pub fn height(&self, idx: Option<u32>) -> u32 {
        self.inner.height(idx)
    }

    pub fn balance_factor(&self, idx: Option<u32>) -> i64 {
        self.inner.balance_factor(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.inner.keys()
    }

    pub fn assert_valid(&self) -> Result<(), InvariantError> {
        self.inner.assert_valid()
    }

    pub fn print(&self) -> String
    where
        T: Debug,
    {
        self.inner.print()
    }
}
