use std::cmp::Ordering;
use std::fmt::Debug;

use tracing::trace;

use crate::error::InvariantError;
use crate::print::{print_tree, PrintChild};

use super::types::BTreeNode;
use super::Order;

/// Position of `key` among the entries of `node`: `Ok` on a match, `Err`
/// with the child index to descend into otherwise.
pub fn search<K, V, C>(node: &BTreeNode<K, V>, key: &K, comparator: &C) -> Result<usize, usize>
where
    C: Fn(&K, &K) -> Ordering,
{
    node.entries.binary_search_by(|(k, _)| comparator(k, key))
}

pub fn get<'a, K, V, C>(node: &'a BTreeNode<K, V>, key: &K, comparator: &C) -> Option<&'a V>
where
    C: Fn(&K, &K) -> Ordering,
{
    match search(node, key, comparator) {
        Ok(i) => Some(&node.entries[i].1),
        Err(_) if node.leaf => None,
        Err(i) => get(&node.children[i], key, comparator),
    }
}

pub fn get_mut<'a, K, V, C>(
    node: &'a mut BTreeNode<K, V>,
    key: &K,
    comparator: &C,
) -> Option<&'a mut V>
where
    C: Fn(&K, &K) -> Ordering,
{
    match search(node, key, comparator) {
        Ok(i) => Some(&mut node.entries[i].1),
        Err(_) if node.leaf => None,
        Err(i) => get_mut(&mut node.children[i], key, comparator),
    }
}

/// Splits the full child `parent.children[i]`.
///
/// The median entry (index `t-1`) moves up into `parent.entries[i]`; the
/// `t-1` entries above it, and for internal nodes the upper `t` children,
/// move to a new sibling at `parent.children[i + 1]`.
///
/// # Panics
///
/// Panics if the child is not full.
pub fn split_child<K, V>(parent: &mut BTreeNode<K, V>, i: usize, order: Order) {
    let t = order.get();
    let child = &mut parent.children[i];
    assert!(child.is_full(order), "split_child requires a full child");

    let right_entries = child.entries.split_off(t);
    let median = child.entries.pop().expect("full node has a median entry");
    let right_children = if child.leaf {
        Vec::new()
    } else {
        child.children.split_off(t)
    };
    let sibling = BTreeNode {
        entries: right_entries,
        children: right_children,
        leaf: child.leaf,
    };
    trace!(index = i, leaf = sibling.leaf, "btree split child");

    parent.entries.insert(i, median);
    parent.children.insert(i + 1, sibling);
}

/// Inserts into the subtree under `node`, which must not be full. Full
/// children are split before descending into them.
///
/// Returns the replaced value when `key` was already present.
pub fn insert_non_full<K, V, C>(
    node: &mut BTreeNode<K, V>,
    key: K,
    value: V,
    order: Order,
    comparator: &C,
) -> Option<V>
where
    C: Fn(&K, &K) -> Ordering,
{
    let mut i = match search(node, &key, comparator) {
        Ok(i) => return Some(std::mem::replace(&mut node.entries[i].1, value)),
        Err(i) => i,
    };

    if node.leaf {
        node.entries.insert(i, (key, value));
        return None;
    }

    if node.children[i].is_full(order) {
        split_child(node, i, order);
        match comparator(&key, &node.entries[i].0) {
            Ordering::Less => {}
            Ordering::Equal => return Some(std::mem::replace(&mut node.entries[i].1, value)),
            Ordering::Greater => i += 1,
        }
    }
    insert_non_full(&mut node.children[i], key, value, order, comparator)
}

/// Checks fan-out bounds, the leaf flag, equal leaf depth and key order.
/// Returns the number of entries under `root`.
pub fn assert_btree<K, V, C>(
    root: Option<&BTreeNode<K, V>>,
    order: Order,
    comparator: &C,
) -> Result<usize, InvariantError>
where
    C: Fn(&K, &K) -> Ordering,
{
    struct Ctx<'c, C> {
        order: Order,
        comparator: &'c C,
        leaf_depth: Option<usize>,
    }

    fn validate<'a, K, V, C>(
        ctx: &mut Ctx<'_, C>,
        node: &'a BTreeNode<K, V>,
        depth: usize,
        lower: Option<&'a K>,
        upper: Option<&'a K>,
    ) -> Result<usize, InvariantError>
    where
        C: Fn(&K, &K) -> Ordering,
    {
        let count = node.entries.len();
        let min = if depth == 0 { 1 } else { ctx.order.min_keys() };
        let max = ctx.order.max_keys();
        if !(min..=max).contains(&count) {
            return Err(InvariantError::KeyCount { count, min, max });
        }
        if node.leaf != node.children.is_empty() {
            return Err(InvariantError::LeafFlag);
        }

        let mut prev = lower;
        for (k, _) in &node.entries {
            if let Some(p) = prev {
                if (ctx.comparator)(p, k) != Ordering::Less {
                    return Err(InvariantError::OrderViolated);
                }
            }
            prev = Some(k);
        }
        if let (Some(p), Some(u)) = (prev, upper) {
            if (ctx.comparator)(p, u) != Ordering::Less {
                return Err(InvariantError::OrderViolated);
            }
        }

        if node.leaf {
            let expected = *ctx.leaf_depth.get_or_insert(depth);
            if expected != depth {
                return Err(InvariantError::LeafDepth {
                    expected,
                    actual: depth,
                });
            }
            return Ok(count);
        }

        if node.children.len() != count + 1 {
            return Err(InvariantError::ChildCount {
                keys: count,
                children: node.children.len(),
            });
        }

        let mut total = count;
        for (i, child) in node.children.iter().enumerate() {
            let lo = if i == 0 { lower } else { Some(&node.entries[i - 1].0) };
            let hi = node.entries.get(i).map(|(k, _)| k).or(upper);
            total += validate(ctx, child, depth + 1, lo, hi)?;
        }
        Ok(total)
    }

    let Some(root) = root else {
        return Ok(0);
    };
    let mut ctx = Ctx {
        order,
        comparator,
        leaf_depth: None,
    };
    validate(&mut ctx, root, 0, None, None)
}

/// Debug printer for B-trees.
pub fn print<K, V>(node: Option<&BTreeNode<K, V>>, tab: &str) -> String
where
    K: Debug,
    V: Debug,
{
    let Some(node) = node else {
        return "∅".to_string();
    };
    let entries: Vec<String> = node
        .entries
        .iter()
        .map(|(k, v)| format!("{k:?} = {v:?}"))
        .collect();
    let kind = if node.leaf { "Leaf" } else { "Node" };
    let header = format!("{kind} [{}]", entries.join(", "));

    let renders: Vec<Box<PrintChild<'_>>> = node
        .children
        .iter()
        .map(|c| Box::new(move |tab: &str| print(Some(c), tab)) as Box<PrintChild<'_>>)
        .collect();
    let children: Vec<Option<&PrintChild<'_>>> = renders.iter().map(|r| Some(&**r)).collect();
    format!("{header}{}", print_tree(tab, &children))
}
