//! B-tree order and configuration.
//!
//! The order `t` is validated once, when an [`Order`] is built, and then
//! stored as an immutable field of each tree. An order read from a
//! configuration document goes through the same check.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

use super::BTree;

/// Minimum degree `t` of a B-tree; always `>= 2`.
///
/// Every node holds at most `2t-1` entries and every non-root node at least
/// `t-1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct Order(usize);

impl Order {
    pub const MIN: usize = 2;

    pub fn new(t: usize) -> Result<Self, ConfigError> {
        if t < Self::MIN {
            return Err(ConfigError::OrderTooSmall { order: t });
        }
        Ok(Self(t))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn min_keys(self) -> usize {
        self.0 - 1
    }

    pub fn max_keys(self) -> usize {
        2 * self.0 - 1
    }

    pub fn max_children(self) -> usize {
        2 * self.0
    }
}

impl Default for Order {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<usize> for Order {
    type Error = ConfigError;

    fn try_from(t: usize) -> Result<Self, Self::Error> {
        Self::new(t)
    }
}

impl From<Order> for usize {
    fn from(order: Order) -> Self {
        order.0
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration surface for engines that embed a [`BTree`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BTreeConfig {
    pub order: Order,
}

impl BTreeConfig {
    pub fn build<K: Ord, V>(&self) -> BTree<K, V> {
        BTree::with_order(self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_bounds() {
        let order = Order::new(3).unwrap();
        assert_eq!(order.get(), 3);
        assert_eq!(order.min_keys(), 2);
        assert_eq!(order.max_keys(), 5);
        assert_eq!(order.max_children(), 6);
        assert_eq!(Order::default().get(), 2);
    }

    #[test]
    fn test_order_too_small() {
        assert_eq!(Order::new(1), Err(ConfigError::OrderTooSmall { order: 1 }));
        assert_eq!(Order::try_from(0), Err(ConfigError::OrderTooSmall { order: 0 }));
        assert_eq!(
            ConfigError::OrderTooSmall { order: 1 }.to_string(),
            "B-tree order 1 is below the minimum of 2"
        );
    }
}
