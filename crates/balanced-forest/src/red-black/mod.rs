//! Two-color balanced (red-black) binary search tree.

#[path = "RbMap.rs"]
pub mod rb_map;
pub mod types;
pub mod util;

pub use rb_map::RbMap;
pub use types::{Color, RbNode, RbNodeLike};
pub use util::{assert_red_black_tree, fix_insert, insert, print, rotate_left, rotate_right};
