use avl_forest::AvlTree;

#[derive(Clone, Debug, PartialEq)]
struct Kv {
    k: String,
    v: i32,
}

fn kv(k: &str, v: i32) -> Kv {
    Kv {
        k: k.to_string(),
        v,
    }
}

fn kv_order(a: &Kv, b: &Kv) -> i32 {
    match a.k.cmp(&b.k) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

#[test]
fn avl_tree_smoke_matrix() {
    let mut tree = AvlTree::<f64>::new();
    tree.set(1.0);
    tree.set(3.0);
    tree.set(4.0);
    tree.set(3.0);
    tree.set(4.1);
    tree.set(44.0);

    assert_eq!(tree.len(), 5);
    assert!(tree.get_by(|p| if *p == 44.0 { 0 } else if 44.0 < *p { -1 } else { 1 }).is_some());

    let mut keys = Vec::new();
    tree.for_each(|_i, p| keys.push(*p));
    assert_eq!(keys, vec![1.0, 3.0, 4.0, 4.1, 44.0]);
    tree.assert_valid().unwrap();
}

#[test]
fn avl_tree_ladder_insert_matrix() {
    let mut tree = AvlTree::<i32>::new();
    for i in 0..300 {
        assert_eq!(tree.set(i), None);
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.len(), 300);

    let mut tree = AvlTree::<i32>::new();
    for i in (0..300).rev() {
        assert_eq!(tree.set(i), None);
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.len(), 300);

    let mut keys = Vec::new();
    tree.for_each(|_i, p| keys.push(*p));
    assert_eq!(keys, (0..300).collect::<Vec<_>>());
}

#[test]
fn avl_tree_shuffled_insert_matrix() {
    // Deterministic pseudo-shuffle: k -> (k * 377) mod 1000 is a bijection.
    let mut tree = AvlTree::<i32>::new();
    for k in 0..1000 {
        tree.set((k * 377) % 1000);
        tree.assert_valid().unwrap();
    }
    assert_eq!(tree.len(), 1000);

    let mut keys = Vec::new();
    tree.for_each(|_i, p| keys.push(*p));
    assert_eq!(keys, (0..1000).collect::<Vec<_>>());
}

#[test]
fn avl_tree_replace_keeps_invariants_matrix() {
    let mut tree = AvlTree::with_comparator(kv_order);
    for i in 0..50 {
        tree.set(kv(&format!("key{i:02}"), i));
    }
    assert_eq!(tree.len(), 50);

    for i in 0..50 {
        let old = tree.set(kv(&format!("key{i:02}"), i + 1000));
        assert_eq!(old, Some(kv(&format!("key{i:02}"), i)));
        assert_eq!(tree.len(), 50);
        tree.assert_valid().unwrap();
    }

    let found = tree.get_by(|p| kv_order(&kv("key07", 0), p)).unwrap();
    assert_eq!(found.v, 1007);
}

#[test]
fn avl_tree_descending_traversal_matrix() {
    let mut tree = AvlTree::<i32>::new();
    for i in 0..20 {
        tree.set(i);
    }

    let mut desc = Vec::new();
    let mut max_depth = 0;
    tree.for_each_desc(|_i, depth, p| {
        desc.push(*p);
        max_depth = max_depth.max(depth);
    });
    assert_eq!(desc, (0..20).rev().collect::<Vec<_>>());
    assert!(max_depth >= 3);
}

#[test]
fn avl_tree_copy_fidelity_matrix() {
    let mut tree = AvlTree::with_comparator(kv_order);
    for i in 0..100 {
        tree.set(kv(&format!("k{i:03}"), i));
    }

    let copy = tree.clone();
    copy.assert_valid().unwrap();
    assert_eq!(copy.len(), 100);
    for i in 0..100 {
        let probe = kv(&format!("k{i:03}"), 0);
        assert_eq!(
            copy.get_by(|p| kv_order(&probe, p)).map(|p| p.v),
            tree.get_by(|p| kv_order(&probe, p)).map(|p| p.v),
        );
    }

    // Independent storage: tearing down the source leaves the copy intact.
    tree.clear();
    assert!(tree.is_empty());
    copy.assert_valid().unwrap();
    assert_eq!(
        copy.get_by(|p| kv_order(&kv("k042", 0), p)).map(|p| p.v),
        Some(42)
    );
}

#[test]
fn avl_tree_copy_failure_is_atomic_matrix() {
    let mut tree = AvlTree::with_comparator(kv_order);
    tree.set(kv("a", 1));
    tree.set(kv("b", 2));
    tree.set(kv("c", 3));

    let mut calls = 0;
    let result = tree.try_map_clone(|payload| {
        calls += 1;
        if calls == 2 {
            None
        } else {
            Some(payload.clone())
        }
    });
    assert!(result.is_none());
    assert_eq!(calls, 2);

    // Source unaffected.
    tree.assert_valid().unwrap();
    assert_eq!(tree.len(), 3);
}

#[test]
fn avl_tree_probe_count_matrix() {
    let mut tree = AvlTree::<i32>::new();
    for i in 0..1000 {
        tree.set(i);
    }

    // AVL height for 1000 nodes is at most 1.44 * log2(1002) ~ 14.4.
    for key in [0, 1, 499, 500, 998, 999] {
        let (found, probes) =
            tree.find_by_counting(|p| if key == *p { 0 } else if key < *p { -1 } else { 1 });
        assert!(found.is_some());
        assert!(probes <= 15, "probes = {probes}");
    }

    let (missing, probes) = tree.find_by_counting(|p| if 5000 == *p {
        0
    } else if 5000 < *p {
        -1
    } else {
        1
    });
    assert!(missing.is_none());
    assert!(probes <= 15);
}

#[test]
fn avl_tree_clear_is_idempotent_matrix() {
    let mut tree = AvlTree::<i32>::new();
    tree.clear();
    assert!(tree.is_empty());

    tree.set(1);
    tree.set(2);
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    tree.clear();
    assert!(tree.is_empty());
    tree.assert_valid().unwrap();

    tree.set(3);
    assert_eq!(tree.len(), 1);
    tree.assert_valid().unwrap();
}
