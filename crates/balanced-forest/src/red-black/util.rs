use std::cmp::Ordering;
use std::fmt::Debug;

use tracing::trace;

use crate::error::InvariantError;
use crate::print::{print_tree, PrintChild};
use crate::util::{get_l, get_p, get_r, InOrder};

use super::types::{Color, RbNodeLike};

#[inline]
fn set_p<K, V, N>(arena: &mut [N], i: u32, v: Option<u32>)
where
    N: RbNodeLike<K, V>,
{
    arena[i as usize].set_p(v);
}

#[inline]
fn set_l<K, V, N>(arena: &mut [N], i: u32, v: Option<u32>)
where
    N: RbNodeLike<K, V>,
{
    arena[i as usize].set_l(v);
}

#[inline]
fn set_r<K, V, N>(arena: &mut [N], i: u32, v: Option<u32>)
where
    N: RbNodeLike<K, V>,
{
    arena[i as usize].set_r(v);
}

#[inline]
fn set_color<K, V, N>(arena: &mut [N], i: u32, color: Color)
where
    N: RbNodeLike<K, V>,
{
    arena[i as usize].set_color(color);
}

/// Color of `node`; empty slots count as black.
#[inline]
fn color_of<K, V, N>(arena: &[N], node: Option<u32>) -> Color
where
    N: RbNodeLike<K, V>,
{
    node.map_or(Color::Black, |i| arena[i as usize].color())
}

/// Seats `new` where `old` hung under `p`, or as the root when `p` is empty.
/// Returns the tree root.
fn reseat<K, V, N>(arena: &mut [N], root: u32, p: Option<u32>, old: u32, new: u32) -> u32
where
    N: RbNodeLike<K, V>,
{
    set_p(arena, new, p);
    let Some(p) = p else {
        return new;
    };
    if get_l(arena, p) == Some(old) {
        set_l(arena, p, Some(new));
    } else {
        set_r(arena, p, Some(new));
    }
    root
}

/// Lifts the right child of `n` into its place. Returns the tree root.
///
/// # Panics
///
/// Panics if `n` has no right child.
pub fn rotate_left<K, V, N>(arena: &mut [N], root: u32, n: u32) -> u32
where
    N: RbNodeLike<K, V>,
{
    let nr = get_r(arena, n).expect("rotate_left requires a right child");
    let nrl = get_l(arena, nr);
    trace!(node = n, pivot = nr, "rb rotate left");

    set_r(arena, n, nrl);
    if let Some(nrl) = nrl {
        set_p(arena, nrl, Some(n));
    }
    let p = get_p(arena, n);
    let root = reseat(arena, root, p, n, nr);
    set_l(arena, nr, Some(n));
    set_p(arena, n, Some(nr));
    root
}

/// Lifts the left child of `n` into its place. Returns the tree root.
///
/// # Panics
///
/// Panics if `n` has no left child.
pub fn rotate_right<K, V, N>(arena: &mut [N], root: u32, n: u32) -> u32
where
    N: RbNodeLike<K, V>,
{
    let nl = get_l(arena, n).expect("rotate_right requires a left child");
    let nlr = get_r(arena, nl);
    trace!(node = n, pivot = nl, "rb rotate right");

    set_l(arena, n, nlr);
    if let Some(nlr) = nlr {
        set_p(arena, nlr, Some(n));
    }
    let p = get_p(arena, n);
    let root = reseat(arena, root, p, n, nl);
    set_r(arena, nl, Some(n));
    set_p(arena, n, Some(nl));
    root
}

/// Attaches the detached node `n` by plain BST descent, then repairs colors.
/// Returns the new root.
///
/// A key equal to one already present leaves the tree untouched; `n` stays
/// detached.
pub fn insert<K, V, N, C>(arena: &mut [N], root: Option<u32>, n: u32, comparator: &C) -> u32
where
    N: RbNodeLike<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    set_color(arena, n, Color::Red);
    let Some(root) = root else {
        set_color(arena, n, Color::Black);
        return n;
    };

    let mut curr = root;
    let cmp = loop {
        let cmp = comparator(arena[n as usize].key(), arena[curr as usize].key());
        let next = match cmp {
            Ordering::Less => get_l(arena, curr),
            Ordering::Greater => get_r(arena, curr),
            Ordering::Equal => return root,
        };
        match next {
            Some(next) => curr = next,
            None => break cmp,
        }
    };

    if cmp == Ordering::Less {
        set_l(arena, curr, Some(n));
    } else {
        set_r(arena, curr, Some(n));
    }
    set_p(arena, n, Some(curr));
    fix_insert(arena, root, n)
}

/// Walks up from the red node `n` while its parent is red, recoloring or
/// rotating, and finally paints the root black. Returns the new root.
pub fn fix_insert<K, V, N>(arena: &mut [N], mut root: u32, mut n: u32) -> u32
where
    N: RbNodeLike<K, V>,
{
    while n != root {
        let mut p = get_p(arena, n).expect("non-root node has a parent");
        if arena[p as usize].is_black() {
            break;
        }
        // A red parent without a parent is a red root; painting it black
        // below settles it.
        let Some(g) = get_p(arena, p) else {
            break;
        };

        if get_l(arena, g) == Some(p) {
            let u = get_r(arena, g);
            if let Some(u) = u.filter(|&u| color_of(arena, Some(u)) == Color::Red) {
                trace!(node = n, grandparent = g, "rb recolor");
                set_color(arena, p, Color::Black);
                set_color(arena, u, Color::Black);
                set_color(arena, g, Color::Red);
                n = g;
                continue;
            }
            if get_r(arena, p) == Some(n) {
                root = rotate_left(arena, root, p);
                n = p;
                p = get_p(arena, n).expect("rotated node has a parent");
            }
            set_color(arena, p, Color::Black);
            set_color(arena, g, Color::Red);
            root = rotate_right(arena, root, g);
        } else {
            let u = get_l(arena, g);
            if let Some(u) = u.filter(|&u| color_of(arena, Some(u)) == Color::Red) {
                trace!(node = n, grandparent = g, "rb recolor");
                set_color(arena, p, Color::Black);
                set_color(arena, u, Color::Black);
                set_color(arena, g, Color::Red);
                n = g;
                continue;
            }
            if get_l(arena, p) == Some(n) {
                root = rotate_right(arena, root, p);
                n = p;
                p = get_p(arena, n).expect("rotated node has a parent");
            }
            set_color(arena, p, Color::Black);
            set_color(arena, g, Color::Red);
            root = rotate_left(arena, root, g);
        }
    }

    set_color(arena, root, Color::Black);
    root
}

pub fn assert_red_black_tree<K, V, N, C>(
    arena: &[N],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), InvariantError>
where
    N: RbNodeLike<K, V>,
    C: Fn(&K, &K) -> Ordering,
{
    let Some(root) = root else {
        return Ok(());
    };

    if get_p(arena, root).is_some() {
        return Err(InvariantError::RootHasParent);
    }
    if !arena[root as usize].is_black() {
        return Err(InvariantError::RootNotBlack);
    }

    fn black_height<K, V, N>(arena: &[N], node: Option<u32>) -> Result<usize, InvariantError>
    where
        N: RbNodeLike<K, V>,
    {
        let Some(node) = node else {
            return Ok(0);
        };

        let l = get_l(arena, node);
        let r = get_r(arena, node);
        for child in [l, r].into_iter().flatten() {
            if get_p(arena, child) != Some(node) {
                return Err(InvariantError::BrokenParentLink { node });
            }
        }

        let black = arena[node as usize].is_black();
        if !black && (color_of(arena, l) == Color::Red || color_of(arena, r) == Color::Red) {
            return Err(InvariantError::RedRed { node });
        }

        let left = black_height(arena, l)?;
        let right = black_height(arena, r)?;
        if left != right {
            return Err(InvariantError::BlackHeightMismatch { node, left, right });
        }

        Ok(left + usize::from(black))
    }

    black_height(arena, Some(root))?;

    let mut prev: Option<u32> = None;
    for i in InOrder::new(arena, Some(root)) {
        if let Some(p) = prev {
            if comparator(arena[p as usize].key(), arena[i as usize].key()) != Ordering::Less {
                return Err(InvariantError::OrderViolated);
            }
        }
        prev = Some(i);
    }

    Ok(())
}

/// Debug printer for red-black trees.
pub fn print<K, V, N>(arena: &[N], node: Option<u32>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
    N: RbNodeLike<K, V>,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let color = if n.is_black() { "black" } else { "red" };
            let header = format!("Node[{i}] {color} {{ {:?} = {:?} }}", n.key(), n.value());
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
    use super::super::types::RbNode;
    use super::*;

    fn link(arena: &mut [RbNode<i32, &str>], parent: u32, left: Option<u32>, right: Option<u32>) {
        arena[parent as usize].l = left;
        arena[parent as usize].r = right;
        for child in [left, right].into_iter().flatten() {
            arena[child as usize].p = Some(parent);
        }
    }

    fn keys(arena: &[RbNode<i32, &str>], root: u32) -> Vec<i32> {
        InOrder::new(arena, Some(root))
            .map(|i| arena[i as usize].k)
            .collect()
    }

    #[test]
    fn test_rotate_left_then_right() {
        let mut arena = vec![
            RbNode::new(10, "A"),
            RbNode::new(5, "B"),
            RbNode::new(15, "C"),
            RbNode::new(3, "D"),
        ];
        link(&mut arena, 0, Some(1), Some(2));
        link(&mut arena, 1, Some(3), None);

        let root = rotate_left(&mut arena, 0, 0);
        assert_eq!(root, 2);
        assert_eq!(arena[2].p, None);
        assert_eq!(arena[2].l, Some(0));
        assert_eq!(arena[2].r, None);
        assert_eq!(arena[0].p, Some(2));
        assert_eq!(arena[0].l, Some(1));
        assert_eq!(arena[0].r, None);
        assert_eq!(arena[1].l, Some(3));

        let root = rotate_right(&mut arena, root, 0);
        assert_eq!(root, 2);
        assert_eq!(arena[2].l, Some(1));
        assert_eq!(arena[1].p, Some(2));
        assert_eq!(arena[1].r, Some(0));
        assert_eq!(arena[0].p, Some(1));
        assert_eq!(keys(&arena, root), vec![3, 5, 10, 15]);
    }

    #[test]
    fn test_fix_insert_red_uncle_recolors() {
        let mut arena = vec![
            RbNode::new(10, "A"),
            RbNode::new(5, "B"),
            RbNode::new(15, "C"),
            RbNode::new(3, "D"),
            RbNode::new(7, "E"),
        ];
        link(&mut arena, 0, Some(1), Some(2));
        link(&mut arena, 1, Some(3), Some(4));

        let root = fix_insert(&mut arena, 0, 4);
        assert_eq!(root, 0);
        assert_eq!(arena[0].color, Color::Black);
        assert_eq!(arena[1].color, Color::Black);
        assert_eq!(arena[2].color, Color::Black);
        assert_eq!(arena[3].color, Color::Red);
        assert_eq!(arena[4].color, Color::Red);
        assert_eq!(assert_red_black_tree(&arena, Some(root), &i32::cmp), Ok(()));
    }

    #[test]
    fn test_insert_zig_zag_rotates_twice() {
        let mut arena = vec![RbNode::new(30, "A"), RbNode::new(10, "B"), RbNode::new(20, "C")];
        let mut root = insert(&mut arena, None, 0, &i32::cmp);
        root = insert(&mut arena, Some(root), 1, &i32::cmp);
        root = insert(&mut arena, Some(root), 2, &i32::cmp);
        assert_eq!(root, 2);
        assert_eq!(arena[2].color, Color::Black);
        assert_eq!(arena[2].l, Some(1));
        assert_eq!(arena[2].r, Some(0));
        assert_eq!(arena[0].color, Color::Red);
        assert_eq!(arena[1].color, Color::Red);
        assert_eq!(assert_red_black_tree(&arena, Some(root), &i32::cmp), Ok(()));
    }

    #[test]
    fn test_insert_duplicate_is_detached() {
        let mut arena = vec![RbNode::new(1, "A"), RbNode::new(1, "B")];
        let root = insert(&mut arena, None, 0, &i32::cmp);
        let root = insert(&mut arena, Some(root), 1, &i32::cmp);
        assert_eq!(root, 0);
        assert_eq!(arena[0].l, None);
        assert_eq!(arena[0].r, None);
        assert_eq!(arena[1].p, None);
    }

    #[test]
    fn test_assert_detects_red_red() {
        let mut arena = vec![RbNode::new(2, "A"), RbNode::new(1, "B"), RbNode::new(0, "C")];
        link(&mut arena, 0, Some(1), None);
        link(&mut arena, 1, Some(2), None);
        arena[0].color = Color::Black;
        assert_eq!(
            assert_red_black_tree(&arena, Some(0), &i32::cmp),
            Err(InvariantError::RedRed { node: 1 })
        );
    }

    #[test]
    fn test_assert_detects_black_height_mismatch() {
        let mut arena = vec![RbNode::new(2, "A"), RbNode::new(1, "B")];
        link(&mut arena, 0, Some(1), None);
        arena[0].color = Color::Black;
        arena[1].color = Color::Black;
        assert_eq!(
            assert_red_black_tree(&arena, Some(0), &i32::cmp),
            Err(InvariantError::BlackHeightMismatch {
                node: 0,
                left: 1,
                right: 0
            })
        );
    }

    #[test]
    fn test_print_shows_colors() {
        let mut arena = vec![RbNode::new(2, "A"), RbNode::new(1, "B")];
        let root = insert(&mut arena, None, 0, &i32::cmp);
        let root = insert(&mut arena, Some(root), 1, &i32::cmp);
        let out = print(&arena, Some(root), "");
        assert!(out.starts_with("Node[0] black { 2 = \"A\" }"));
        assert!(out.contains("├─ Node[1] red { 1 = \"B\" }"));
    }
}
