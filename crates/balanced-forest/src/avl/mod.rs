//! Height-balanced (AVL) binary search tree.
//!
//! Each node caches its subtree height. Insert descends recursively, and on
//! the way back up every ancestor recomputes its height and, when its balance
//! factor leaves `-1..=1`, is replaced by the root of a single or double
//! rotation.

#[path = "AvlMap.rs"]
pub mod avl_map;
#[path = "AvlSet.rs"]
pub mod avl_set;
pub mod types;
pub mod util;

pub use avl_map::AvlMap;
pub use avl_set::AvlSet;
pub use types::{AvlNode, AvlNodeLike};
pub use util::{
    assert_avl_tree, balance_factor, height, insert, print, rotate_left, rotate_right,
};
