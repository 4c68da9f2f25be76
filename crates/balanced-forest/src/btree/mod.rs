//! Multi-way balanced search tree (B-tree) of configurable minimum degree.
//!
//! Nodes own their children directly. Insert splits any full node it is
//! about to enter, growing the tree only at the root, so all leaves stay at
//! the same depth.

#[path = "BTree.rs"]
pub mod b_tree;
pub mod order;
pub mod types;
pub mod util;

pub use b_tree::{BTree, Iter};
pub use order::{BTreeConfig, Order};
pub use types::BTreeNode;
pub use util::{assert_btree, insert_non_full, print, search, split_child};
