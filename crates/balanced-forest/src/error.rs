//! Error types.
//!
//! Insertion and search never fail. The only recoverable error is a bad
//! B-tree order; everything else is a structural report from `assert_valid`.

use thiserror::Error;

/// Rejected configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("B-tree order {order} is below the minimum of 2")]
    OrderTooSmall { order: usize },
}

/// A violated structural invariant, reported by `assert_valid`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("Root has parent")]
    RootHasParent,
    #[error("Broken parent link under node {node}")]
    BrokenParentLink { node: u32 },
    #[error("Height mismatch at node {node}: expected {expected}, got {actual}")]
    HeightMismatch {
        node: u32,
        expected: u32,
        actual: u32,
    },
    #[error("AVL balance violated at node {node}: balance factor {bf}")]
    Unbalanced { node: u32, bf: i64 },
    #[error("Root is not black")]
    RootNotBlack,
    #[error("Red node {node} has a red child")]
    RedRed { node: u32 },
    #[error("Black height mismatch at node {node}: left {left}, right {right}")]
    BlackHeightMismatch { node: u32, left: usize, right: usize },
    #[error("Node order violated")]
    OrderViolated,
    #[error("Node holds {count} keys, expected {min}..={max}")]
    KeyCount { count: usize, min: usize, max: usize },
    #[error("Node with {keys} keys has {children} children")]
    ChildCount { keys: usize, children: usize },
    #[error("Leaf at depth {actual}, expected {expected}")]
    LeafDepth { expected: usize, actual: usize },
    #[error("Leaf flag disagrees with children")]
    LeafFlag,
    #[error("Tree holds {actual} entries, expected {expected}")]
    Len { expected: usize, actual: usize },
}
