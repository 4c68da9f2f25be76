//! Self-balancing ordered containers for storage and indexing engines.
//!
//! Three independent balancing engines share one contract shape: construct
//! empty or from a seed entry, insert, search, and check the structural
//! invariant.
//!
//! - **AVL** ([`avl`]) keeps a cached height per node and restores
//!   `|height(left) - height(right)| <= 1` with single or double rotations.
//! - **Red-black** ([`red_black`]) colors nodes red/black and repairs
//!   violations upward through parent links after each insert.
//! - **B-tree** ([`btree`]) keeps `t-1..=2t-1` entries per node by splitting
//!   full nodes on the way down.
//!
//! Binary-tree nodes live in a `Vec<N>` arena owned by the tree. Child and
//! parent "pointers" are `Option<u32>` indices into that arena, so the
//! red-black parent link never owns anything.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`Node`], [`ParentNode`] and [`KvNode`] traits |
//! [`util`] | `first`, `last`, `next`, `prev`, `find`, in-order iterator |
//! [`avl`] | [`AvlMap`], [`AvlSet`], height-based insert and rotations |
//! [`red_black`] | [`RbMap`], insert fixup and rotations |
//! [`btree`] | [`BTree`], [`Order`], [`BTreeConfig`], proactive split |
//! [`print`] | tree-dump helper shared by the debug printers |
//! [`error`] | [`ConfigError`], [`InvariantError`] |
//!
//! # Example
//!
//! ```
//! use balanced_forest::{AvlMap, BTree, RbMap};
//!
//! let mut avl = AvlMap::new();
//! let mut rb = RbMap::new();
//! let mut bt = BTree::new(3);
//! for k in [10, 5, 15, 3, 8] {
//!     avl.insert(k, k * 10);
//!     rb.insert(k, k * 10);
//!     bt.insert(k, k * 10);
//! }
//! assert_eq!(avl.get(&8), Some(&80));
//! assert_eq!(rb.get(&3), Some(&30));
//! assert_eq!(bt.get(&15), Some(&150));
//! assert!(!bt.contains_key(&4));
//! ```

pub mod avl;
pub mod btree;
pub mod error;
pub mod print;
#[path = "red-black/mod.rs"]
pub mod red_black;
pub mod types;
pub mod util;

pub use avl::{AvlMap, AvlSet};
pub use btree::{BTree, BTreeConfig, Order};
pub use error::{ConfigError, InvariantError};
pub use red_black::{Color, RbMap};
pub use types::{KvNode, Node, ParentNode};
