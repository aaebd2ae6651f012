//! Insertion, rebalancing rotations, and lookup over the node arena.
//!
//! Balance factors follow `height(right) - height(left)`; an insert adjusts
//! ancestors until the height increase is absorbed or a single rotation
//! event (one single or one double rotation) restores the invariant.

use crate::types::AvlNode;

#[inline]
fn set_p<T>(arena: &mut [AvlNode<T>], i: u32, v: Option<u32>) {
    arena[i as usize].p = v;
}

#[inline]
fn set_l<T>(arena: &mut [AvlNode<T>], i: u32, v: Option<u32>) {
    arena[i as usize].l = v;
}

#[inline]
fn set_r<T>(arena: &mut [AvlNode<T>], i: u32, v: Option<u32>) {
    arena[i as usize].r = v;
}

#[inline]
fn bf<T>(arena: &[AvlNode<T>], i: u32) -> i32 {
    arena[i as usize].bf
}

#[inline]
fn set_bf<T>(arena: &mut [AvlNode<T>], i: u32, v: i32) {
    arena[i as usize].bf = v;
}

fn rebalance_after_insert<T>(arena: &mut [AvlNode<T>], root: u32, node: u32, child: u32) -> u32 {
    let Some(p) = arena[node as usize].p else {
        return root;
    };

    let is_left = arena[p as usize].l == Some(node);
    let mut pbf = bf(arena, p);
    if is_left {
        pbf -= 1;
    } else {
        pbf += 1;
    }
    set_bf(arena, p, pbf);

    match pbf {
        0 => root,
        1 | -1 => rebalance_after_insert(arena, root, p, node),
        _ => {
            let is_child_left = arena[node as usize].l == Some(child);
            if is_left {
                if is_child_left {
                    ll_rotate(arena, p, node);
                    if arena[node as usize].p.is_some() {
                        root
                    } else {
                        node
                    }
                } else {
                    lr_rotate(arena, p, node, child);
                    if arena[child as usize].p.is_some() {
                        root
                    } else {
                        child
                    }
                }
            } else if is_child_left {
                rl_rotate(arena, p, node, child);
                if arena[child as usize].p.is_some() {
                    root
                } else {
                    child
                }
            } else {
                rr_rotate(arena, p, node);
                if arena[node as usize].p.is_some() {
                    root
                } else {
                    node
                }
            }
        }
    }
}

fn ll_rotate<T>(arena: &mut [AvlNode<T>], n: u32, nl: u32) {
    let p = arena[n as usize].p;
    let nlr = arena[nl as usize].r;

    set_p(arena, nl, p);
    set_r(arena, nl, Some(n));
    set_p(arena, n, Some(nl));
    set_l(arena, n, nlr);
    if let Some(nlr) = nlr {
        set_p(arena, nlr, Some(n));
    }
    if let Some(p) = p {
        if arena[p as usize].l == Some(n) {
            set_l(arena, p, Some(nl));
        } else {
            set_r(arena, p, Some(nl));
        }
    }

    let mut nbf = bf(arena, n);
    let mut nlbf = bf(arena, nl);
    nbf += 1 - if nlbf < 0 { nlbf } else { 0 };
    nlbf += 1 + if nbf > 0 { nbf } else { 0 };
    set_bf(arena, n, nbf);
    set_bf(arena, nl, nlbf);
}

fn rr_rotate<T>(arena: &mut [AvlNode<T>], n: u32, nr: u32) {
    let p = arena[n as usize].p;
    let nrl = arena[nr as usize].l;

    set_p(arena, nr, p);
    set_l(arena, nr, Some(n));
    set_p(arena, n, Some(nr));
    set_r(arena, n, nrl);
    if let Some(nrl) = nrl {
        set_p(arena, nrl, Some(n));
    }
    if let Some(p) = p {
        if arena[p as usize].l == Some(n) {
            set_l(arena, p, Some(nr));
        } else {
            set_r(arena, p, Some(nr));
        }
    }

    let mut nbf = bf(arena, n);
    let mut nrbf = bf(arena, nr);
    nbf += -1 - if nrbf > 0 { nrbf } else { 0 };
    nrbf += -1 + if nbf < 0 { nbf } else { 0 };
    set_bf(arena, n, nbf);
    set_bf(arena, nr, nrbf);
}

fn lr_rotate<T>(arena: &mut [AvlNode<T>], n: u32, nl: u32, nlr: u32) {
    rr_rotate(arena, nl, nlr);
    ll_rotate(arena, n, nlr);
}

fn rl_rotate<T>(arena: &mut [AvlNode<T>], n: u32, nr: u32, nrl: u32) {
    ll_rotate(arena, nr, nrl);
    rr_rotate(arena, n, nrl);
}

/// Attach `n` as the right child of leaf slot `p` and rebalance.
///
/// Returns the new tree root.
pub fn insert_right<T>(arena: &mut [AvlNode<T>], root: u32, n: u32, p: u32) -> u32 {
    set_r(arena, p, Some(n));
    set_p(arena, n, Some(p));
    let pbf = bf(arena, p) + 1;
    set_bf(arena, p, pbf);
    if arena[p as usize].l.is_some() {
        root
    } else {
        rebalance_after_insert(arena, root, p, n)
    }
}

/// Attach `n` as the left child of leaf slot `p` and rebalance.
///
/// Returns the new tree root.
pub fn insert_left<T>(arena: &mut [AvlNode<T>], root: u32, n: u32, p: u32) -> u32 {
    set_l(arena, p, Some(n));
    set_p(arena, n, Some(p));
    let pbf = bf(arena, p) - 1;
    set_bf(arena, p, pbf);
    if arena[p as usize].r.is_some() {
        root
    } else {
        rebalance_after_insert(arena, root, p, n)
    }
}

/// Binary search by a probe function.
///
/// `probe(payload)` returns the ordering of the search key relative to
/// `payload`: negative to descend left, positive to descend right, zero on
/// a match.
pub fn find_by<T, F>(arena: &[AvlNode<T>], root: Option<u32>, probe: F) -> Option<u32>
where
    F: Fn(&T) -> i32,
{
    let mut curr = root;
    while let Some(i) = curr {
        let cmp = probe(&arena[i as usize].payload);
        if cmp == 0 {
            return Some(i);
        }
        curr = if cmp < 0 {
            arena[i as usize].l
        } else {
            arena[i as usize].r
        };
    }
    None
}

/// [`find_by`] plus the number of nodes visited, for observability.
pub fn find_by_counting<T, F>(
    arena: &[AvlNode<T>],
    root: Option<u32>,
    probe: F,
) -> (Option<u32>, usize)
where
    F: Fn(&T) -> i32,
{
    let mut probes = 0usize;
    let mut curr = root;
    while let Some(i) = curr {
        probes += 1;
        let cmp = probe(&arena[i as usize].payload);
        if cmp == 0 {
            return (Some(i), probes);
        }
        curr = if cmp < 0 {
            arena[i as usize].l
        } else {
            arena[i as usize].r
        };
    }
    (None, probes)
}
