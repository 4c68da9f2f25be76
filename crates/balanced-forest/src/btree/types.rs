use super::Order;

/// B-tree node.
///
/// Keys and values share one `(K, V)` slot, so splits and promotions always
/// move a value with its key. Internal nodes hold exactly `entries + 1`
/// children. Nodes are read-only outside the crate.
#[derive(Clone, Debug)]
pub struct BTreeNode<K, V> {
    pub(crate) entries: Vec<(K, V)>,
    pub(crate) children: Vec<BTreeNode<K, V>>,
    pub(crate) leaf: bool,
}

impl<K, V> BTreeNode<K, V> {
    pub(crate) fn new_leaf() -> Self {
        Self {
            entries: Vec::new(),
            children: Vec::new(),
            leaf: true,
        }
    }

    pub(crate) fn new_internal() -> Self {
        Self {
            entries: Vec::new(),
            children: Vec::new(),
            leaf: false,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// Number of entries in this node alone.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self, order: Order) -> bool {
        self.entries.len() == order.max_keys()
    }

    pub fn entries(&self) -> &[(K, V)] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn children(&self) -> &[BTreeNode<K, V>] {
        &self.children
    }
}
