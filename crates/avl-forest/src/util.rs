//! In-order walkers, the right-to-left traversal, and tree diagnostics.

use std::fmt::Debug;

use crate::types::AvlNode;

#[inline]
fn get_p<T>(arena: &[AvlNode<T>], idx: u32) -> Option<u32> {
    arena[idx as usize].p
}
#[inline]
fn get_l<T>(arena: &[AvlNode<T>], idx: u32) -> Option<u32> {
    arena[idx as usize].l
}
#[inline]
fn get_r<T>(arena: &[AvlNode<T>], idx: u32) -> Option<u32> {
    arena[idx as usize].r
}

/// Leftmost node of the subtree rooted at `root`.
pub fn first<T>(arena: &[AvlNode<T>], root: Option<u32>) -> Option<u32> {
    let mut curr = root;
    while let Some(idx) = curr {
        match get_l(arena, idx) {
            Some(l) => curr = Some(l),
            None => return Some(idx),
        }
    }
    curr
}

/// In-order successor of `node`.
pub fn next<T>(arena: &[AvlNode<T>], node: u32) -> Option<u32> {
    if let Some(r) = get_r(arena, node) {
        let mut curr = r;
        while let Some(l) = get_l(arena, curr) {
            curr = l;
        }
        return Some(curr);
    }
    let mut curr = node;
    let mut p = get_p(arena, node);
    while let Some(pi) = p {
        if get_r(arena, pi) == Some(curr) {
            curr = pi;
            p = get_p(arena, pi);
        } else {
            return Some(pi);
        }
    }
    None
}

/// Visit every node right subtree first, then the node, then the left
/// subtree, passing the node index and its depth.  Iteration order is
/// descending payload order; absent children are skipped as no-ops.
pub fn traverse_from_right<T, F>(arena: &[AvlNode<T>], node: Option<u32>, depth: usize, visit: &mut F)
where
    F: FnMut(u32, usize),
{
    let Some(i) = node else {
        return;
    };
    traverse_from_right(arena, get_r(arena, i), depth + 1, visit);
    visit(i, depth);
    traverse_from_right(arena, get_l(arena, i), depth + 1, visit);
}

fn tree_height<T>(arena: &[AvlNode<T>], node: u32) -> usize {
    let l = get_l(arena, node)
        .map(|i| tree_height(arena, i))
        .unwrap_or(0);
    let r = get_r(arena, node)
        .map(|i| tree_height(arena, i))
        .unwrap_or(0);
    1 + l.max(r)
}

/// Verify parent links, exact balance factors, the AVL height bound, and
/// strict ascending comparator order over the whole tree.
pub fn assert_avl_tree<T, C>(
    arena: &[AvlNode<T>],
    root: Option<u32>,
    comparator: &C,
) -> Result<(), String>
where
    C: Fn(&T, &T) -> i32,
{
    let Some(root) = root else {
        return Ok(());
    };

    if arena[root as usize].p.is_some() {
        return Err("Root has parent".to_string());
    }

    fn validate_links_and_bf<T>(arena: &[AvlNode<T>], node: u32) -> Result<(), String> {
        let l = arena[node as usize].l;
        let r = arena[node as usize].r;

        if let Some(l) = l {
            if arena[l as usize].p != Some(node) {
                return Err("Broken parent link on left child".to_string());
            }
            validate_links_and_bf(arena, l)?;
        }
        if let Some(r) = r {
            if arena[r as usize].p != Some(node) {
                return Err("Broken parent link on right child".to_string());
            }
            validate_links_and_bf(arena, r)?;
        }

        let lh = l.map(|i| tree_height(arena, i)).unwrap_or(0) as i32;
        let rh = r.map(|i| tree_height(arena, i)).unwrap_or(0) as i32;
        let expected_bf = rh - lh;
        let actual_bf = arena[node as usize].bf;
        if actual_bf != expected_bf {
            return Err(format!(
                "Balance factor mismatch: expected {expected_bf}, got {actual_bf}"
            ));
        }
        if !(-1..=1).contains(&actual_bf) {
            return Err("AVL balance violated".to_string());
        }

        Ok(())
    }

    validate_links_and_bf(arena, root)?;

    let mut curr = first(arena, Some(root));
    let mut prev_node: Option<u32> = None;
    while let Some(i) = curr {
        if let Some(prev) = prev_node {
            let cmp = comparator(&arena[prev as usize].payload, &arena[i as usize].payload);
            if cmp >= 0 {
                return Err("Node order violated".to_string());
            }
        }
        prev_node = Some(i);
        curr = next(arena, i);
    }

    Ok(())
}

/// Debug printer.
pub fn print<T>(arena: &[AvlNode<T>], node: Option<u32>, tab: &str) -> String
where
    T: Debug,
{
    match node {
        None => "∅".to_string(),
        Some(i) => {
            let n = &arena[i as usize];
            let left = print(arena, n.l, &format!("{tab}  "));
            let right = print(arena, n.r, &format!("{tab}  "));
            format!(
                "Node[{i}] [bf={}] {{ {:?} }}\n{tab}L={left}\n{tab}R={right}",
                n.bf, n.payload
            )
        }
    }
}
