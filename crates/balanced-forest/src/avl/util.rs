use std::cmp::Ordering;
use std::fmt::Debug;

use tracing::trace;

use crate::error::InvariantError;
use crate::print::{print_tree, PrintChild};
use crate::util::{get_l, get_r, InOrder};

use super::types::AvlNodeLike;

#[inline]
fn set_l<K, V, N>(arena: &mut [N], i: u32, v: Option<u32>)
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].set_l(v);
}

#[inline]
fn set_r<K, V, N>(arena: &mut [N], i: u32, v: Option<u32>)
where
    N: AvlNodeLike<K, V>,
{
    arena[i as usize].set_r(v);
}

/// Cached height of `node`; 0 for an empty slot.
#[inline]
pub fn height<K, V, N>(arena: &[N], node: Option<u32>) -> u32
where
    N: AvlNodeLike<K, V>,
{
    node.map_or(0, |i| arena[i as usize].height())
}

/// `height(left) - height(right)`; 0 for an empty slot.
pub fn balance_factor<K, V, N>(arena: &[N], node: Option<u32>) -> i64
where
    N: AvlNodeLike<K, V>,
{
    let Some(i) = node else {
        return 0;
    };
    let lh = height(arena, get_l(arena, i));
    let rh = height(arena, get_r(arena, i));
    i64::from(lh) - i64::from(rh)
}

fn update_height<K, V, N>(arena: &mut [N], i: u32)
where
    N: AvlNodeLike<K, V>,
{
    let lh = height(arena, get_l(arena, i));
    let rh = height(arena, get_r(arena, i));
    arena[i as usize].set_height(1 + lh.max(rh));
}

/// Lifts the left child of `n` into its place and returns it.
///
/// The caller reattaches the returned index to `n`'s former parent slot.
///
/// # Panics
///
/// Panics if `n` has no left child.
pub fn rotate_right<K, V, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let nl = get_l(arena, n).expect("rotate_right requires a left child");
    let nlr = get_r(arena, nl);
    trace!(node = n, pivot = nl, "avl rotate right");

    set_r(arena, nl, Some(n));
    set_l(arena, n, nlr);
    update_height(arena, n);
    update_height(arena, nl);
    nl
}

/// Lifts the right child of `n` into its place and returns it.
///
/// # Panics
///
/// Panics if `n` has no right child.
pub fn rotate_left<K, V, N>(arena: &mut [N], n: u32) -> u32
where
    N: AvlNodeLike<K, V>,
{
    let nr = get_r(arena, n).expect("rotate_left requires a right child");
    let nrl = get_l(arena, nr);
    trace!(node = n, pivot = nr, "avl rotate left");

    set_l(arena, nr, Some(n));
    set_r(arena, n, nrl);
    update_height(arena, n);
    update_height(arena, nr);
    nr
}

/// Inserts the detached node `n` into the subtree rooted at `node` and
/// returns the new subtree root.
///
/// A key equal to one already present leaves the subtree untouched; `n`
/// stays detached.
pub fn insert<K, V, N, C>(arena: &mut [N], node: Option<u32>, n: u32, comparator: &C) -> u32
where
    N: AvlNodeLike<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    let Some(curr) = node else {
        return n;
    };

    match comparator(arena[n as usize].key(), arena[curr as usize].key()) {
        Ordering::Less => {
            let l = get_l(arena, curr);
            let l = insert(arena, l, n, comparator);
            set_l(arena, curr, Some(l));
        }
        Ordering::Greater => {
            let r = get_r(arena, curr);
            let r = insert(arena, r, n, comparator);
            set_r(arena, curr, Some(r));
        }
        Ordering::Equal => return curr,
    }

    update_height(arena, curr);
    rebalance(arena, curr, n, comparator)
}

fn rebalance<K, V, N, C>(arena: &mut [N], node: u32, n: u32, comparator: &C) -> u32
where
    N: AvlNodeLike<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    let bf = balance_factor(arena, Some(node));
    if bf > 1 {
        let l = get_l(arena, node).expect("left-heavy node has a left child");
        if comparator(arena[n as usize].key(), arena[l as usize].key()) == Ordering::Less {
            return rotate_right(arena, node);
        }
        let l = rotate_left(arena, l);
        set_l(arena, node, Some(l));
        return rotate_right(arena, node);
    }
    if bf < -1 {
        let r = get_r(arena, node).expect("right-heavy node has a right child");
        if comparator(arena[n as usize].key(), arena[r as usize].key()) == Ordering::Greater {
            return rotate_left(arena, node);
        }
        let r = rotate_right(arena, r);
        set_r(arena, node, Some(r));
        return rotate_left(arena, node);
    }
    node
}

/// Checks cached heights, the balance bound and key order under `root`.
pub fn assert_avl_tree<K, V, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), InvariantError>
where
    N: AvlNodeLike<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    fn validate<K, V, N>(arena: &[N], node: Option<u32>) -> Result<u32, InvariantError>
    where
        N: AvlNodeLike<K, V>,
    {
        let Some(i) = node else {
            return Ok(0);
        };
        let lh = validate(arena, get_l(arena, i))?;
        let rh = validate(arena, get_r(arena, i))?;

        let expected = 1 + lh.max(rh);
        let actual = arena[i as usize].height();
        if actual != expected {
            return Err(InvariantError::HeightMismatch {
                node: i,
                expected,
                actual,
            });
        }
        let bf = i64::from(lh) - i64::from(rh);
        if !(-1..=1).contains(&bf) {
            return Err(InvariantError::Unbalanced { node: i, bf });
        }
        Ok(expected)
    }

    validate(arena, root)?;

    let mut prev: Option<u32> = None;
    for i in InOrder::new(arena, root) {
        if let Some(p) = prev {
            if comparator(arena[p as usize].key(), arena[i as usize].key()) != Ordering::Less {
                return Err(InvariantError::OrderViolated);
            }
        }
        prev = Some(i);
    }

    Ok(())
}

/// Debug printer for AVL trees.
pub fn print<K, V, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
    N: AvlNodeLike<K, V>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let header = format!(
                "Node[{i}] [h={}] {{ {:?} = {:?} }}",
                n.height(),
                n.key(),
                n.value()
            );
            if n.l().is_none() && n.r().is_none() {
                return header;
            }
            let left: &PrintChild = &|tab| print::<K, V, N>(arena, n.l(), tab);
            let right: &PrintChild = &|tab| print::<K, V, N>(arena, n.r(), tab);
            format!("{header}{}", print_tree(tab, &[Some(left), Some(right)]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::types::AvlNode;
    use super::*;

    fn insert_value(arena: &mut Vec<AvlNode<i32, ()>>, root: Option<u32>, k: i32) -> u32 {
        arena.push(AvlNode::new(k, ()));
        let idx = (arena.len() - 1) as u32;
        let root = insert(arena, root, idx, &i32::cmp);
        if let Err(err) = assert_avl_tree(arena, Some(root), &i32::cmp) {
            panic!("invalid AVL tree after insert({k}): {err}");
        }
        root
    }

    fn key(arena: &[AvlNode<i32, ()>], i: Option<u32>) -> Option<i32> {
        i.map(|i| arena[i as usize].k)
    }

    #[test]
    fn test_ascending_triggers_single_left_rotation() {
        let mut arena = Vec::new();
        let mut root = insert_value(&mut arena, None, 1);
        root = insert_value(&mut arena, Some(root), 2);
        root = insert_value(&mut arena, Some(root), 3);
        assert_eq!(key(&arena, Some(root)), Some(2));
        assert_eq!(key(&arena, arena[root as usize].l), Some(1));
        assert_eq!(key(&arena, arena[root as usize].r), Some(3));
        assert_eq!(height(&arena, Some(root)), 2);
    }

    #[test]
    fn test_descending_triggers_single_right_rotation() {
        let mut arena = Vec::new();
        let mut root = insert_value(&mut arena, None, 3);
        root = insert_value(&mut arena, Some(root), 2);
        root = insert_value(&mut arena, Some(root), 1);
        assert_eq!(key(&arena, Some(root)), Some(2));
        assert_eq!(key(&arena, arena[root as usize].l), Some(1));
        assert_eq!(key(&arena, arena[root as usize].r), Some(3));
    }

    #[test]
    fn test_left_right_double_rotation() {
        let mut arena = Vec::new();
        let mut root = insert_value(&mut arena, None, 30);
        root = insert_value(&mut arena, Some(root), 10);
        root = insert_value(&mut arena, Some(root), 20);
        assert_eq!(key(&arena, Some(root)), Some(20));
        assert_eq!(key(&arena, arena[root as usize].l), Some(10));
        assert_eq!(key(&arena, arena[root as usize].r), Some(30));
    }

    #[test]
    fn test_right_left_double_rotation() {
        let mut arena = Vec::new();
        let mut root = insert_value(&mut arena, None, 10);
        root = insert_value(&mut arena, Some(root), 30);
        root = insert_value(&mut arena, Some(root), 20);
        assert_eq!(key(&arena, Some(root)), Some(20));
        assert_eq!(key(&arena, arena[root as usize].l), Some(10));
        assert_eq!(key(&arena, arena[root as usize].r), Some(30));
    }

    #[test]
    fn test_duplicate_leaves_node_detached() {
        let mut arena = Vec::new();
        let root = insert_value(&mut arena, None, 5);
        arena.push(AvlNode::new(5, ()));
        let dup = (arena.len() - 1) as u32;
        let root2 = insert(&mut arena, Some(root), dup, &i32::cmp);
        assert_eq!(root2, root);
        assert_eq!(arena[root as usize].l, None);
        assert_eq!(arena[root as usize].r, None);
    }

    #[test]
    fn test_rotate_right_on_balanced_tree() {
        let mut arena = Vec::new();
        let mut root = None;
        for k in [10, 5, 15, 3, 8] {
            root = Some(insert_value(&mut arena, root, k));
        }
        let new_root = rotate_right(&mut arena, root.unwrap());
        assert_eq!(key(&arena, Some(new_root)), Some(5));
        let r = arena[new_root as usize].r;
        assert_eq!(key(&arena, arena[new_root as usize].l), Some(3));
        assert_eq!(key(&arena, r), Some(10));
        assert_eq!(key(&arena, arena[r.unwrap() as usize].l), Some(8));
        assert_eq!(key(&arena, arena[r.unwrap() as usize].r), Some(15));
        assert_eq!(height(&arena, r), 2);
        assert_eq!(height(&arena, Some(new_root)), 3);
    }

    #[test]
    fn test_assert_reports_stale_height() {
        let mut arena = Vec::new();
        let mut root = insert_value(&mut arena, None, 2);
        root = insert_value(&mut arena, Some(root), 1);
        arena[root as usize].height = 7;
        assert_eq!(
            assert_avl_tree(&arena, Some(root), &i32::cmp),
            Err(InvariantError::HeightMismatch {
                node: root,
                expected: 2,
                actual: 7
            })
        );
    }

    #[test]
    fn test_print_includes_heights() {
        let mut arena = Vec::new();
        let mut root = insert_value(&mut arena, None, 2);
        root = insert_value(&mut arena, Some(root), 1);
        let out = print(&arena, Some(root), "");
        assert!(out.starts_with("Node[0] [h=2] { 2 = () }"));
        assert!(out.contains("├─ Node[1] [h=1] { 1 = () }"));
        assert!(out.contains("└─ ∅"));
    }
}
