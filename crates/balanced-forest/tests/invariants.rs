use std::collections::BTreeMap;

use balanced_forest::{AvlMap, BTree, Color, RbMap};
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

fn ops() -> impl Strategy<Value = Vec<(i16, u8)>> {
    prop::collection::vec((any::<i16>(), any::<u8>()), 0..200)
}

proptest! {
    #[test]
    fn avl_matches_btreemap(ops in ops()) {
        let mut map = AvlMap::new();
        let mut model = BTreeMap::new();
        for (k, v) in ops {
            prop_assert_eq!(map.insert(k, v), model.insert(k, v));
            prop_assert_eq!(map.assert_valid(), Ok(()));
            prop_assert_eq!(map.get(&k), Some(&v));
        }
        prop_assert_eq!(map.len(), model.len());
        let got: Vec<(i16, u8)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let want: Vec<(i16, u8)> = model.into_iter().collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn red_black_matches_btreemap(ops in ops()) {
        let mut map = RbMap::new();
        let mut model = BTreeMap::new();
        for (k, v) in ops {
            prop_assert_eq!(map.insert(k, v), model.insert(k, v));
            prop_assert_eq!(map.assert_valid(), Ok(()));
            let root = map.root_index().unwrap();
            prop_assert_eq!(map.color(root), Color::Black);
            prop_assert_eq!(map.node(root).p, None);
            prop_assert_eq!(map.get(&k), Some(&v));
        }
        let got: Vec<(i16, u8)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let want: Vec<(i16, u8)> = model.into_iter().collect();
        prop_assert_eq!(got, want);
    }

    #[test]
    fn btree_matches_btreemap(t in 2usize..8, ops in ops()) {
        let mut tree = BTree::new(t);
        let mut model = BTreeMap::new();
        for (k, v) in ops {
            prop_assert_eq!(tree.insert(k, v), model.insert(k, v));
            prop_assert_eq!(tree.assert_valid(), Ok(()));
            prop_assert_eq!(tree.get(&k), Some(&v));
        }
        for (k, v) in &model {
            prop_assert_eq!(tree.get(k), Some(v));
        }
        let got: Vec<(i16, u8)> = tree.iter().map(|(k, v)| (*k, *v)).collect();
        let want: Vec<(i16, u8)> = model.into_iter().collect();
        prop_assert_eq!(got, want);
    }
}

#[test]
fn seeded_random_inserts_keep_btree_valid_for_each_order() {
    for t in 2..=6 {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(t as u64);
        let mut tree = BTree::new(t);
        for step in 0..400 {
            let k: u32 = rng.gen_range(0..300);
            tree.insert(k, step);
            tree.assert_valid().unwrap();
            assert_eq!(tree.get(&k), Some(&step));
        }
    }
}

#[test]
fn seeded_random_inserts_keep_all_trees_valid() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(0x5eed);
    let mut avl = AvlMap::new();
    let mut rb = RbMap::new();
    let mut bt = BTree::new(3);
    for step in 0..2000 {
        let k: u32 = rng.gen_range(0..1000);
        avl.insert(k, step);
        rb.insert(k, step);
        bt.insert(k, step);
        avl.assert_valid().unwrap();
        rb.assert_valid().unwrap();
        bt.assert_valid().unwrap();
        assert_eq!(rb.root_index().map(|i| rb.color(i)), Some(Color::Black));
    }

    let a: Vec<_> = avl.iter().collect();
    let r: Vec<_> = rb.iter().collect();
    let b: Vec<_> = bt.iter().collect();
    assert_eq!(a, r);
    assert_eq!(a, b);
}
