//! `AvlTree` — the map wrapper owning the arena, root, and comparator.

use std::fmt::Debug;
use std::mem;

use crate::insert::{find_by, find_by_counting, insert_left, insert_right};
use crate::types::AvlNode;
use crate::util::{assert_avl_tree, first, next, print, traverse_from_right};

fn default_comparator<T: PartialOrd>(a: &T, b: &T) -> i32 {
    if a == b {
        0
    } else if a < b {
        -1
    } else {
        1
    }
}

/// Ordered map over opaque payloads.
///
/// The ordering function is supplied once at construction and applies to the
/// container as a whole.  Payloads own their storage; dropping or clearing
/// the tree drops every payload.  There is no removal operation — inserting
/// an equal payload replaces the existing one in place.
pub struct AvlTree<T, C = fn(&T, &T) -> i32>
where
    C: Fn(&T, &T) -> i32,
{
    root: Option<u32>,
    arena: Vec<AvlNode<T>>,
    comparator: C,
    length: usize,
}

impl<T> AvlTree<T, fn(&T, &T) -> i32>
where
    T: PartialOrd,
{
    pub fn new() -> Self {
        Self::with_comparator(default_comparator::<T>)
    }
}

impl<T> Default for AvlTree<T, fn(&T, &T) -> i32>
where
    T: PartialOrd,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, C> AvlTree<T, C>
where
    C: Fn(&T, &T) -> i32,
{
    pub fn with_comparator(comparator: C) -> Self {
        Self {
            root: None,
            arena: Vec::new(),
            comparator,
            length: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn payload(&self, i: u32) -> &T {
        &self.arena[i as usize].payload
    }

    pub fn payload_mut(&mut self, i: u32) -> &mut T {
        &mut self.arena[i as usize].payload
    }

    /// Balance factor of node `i`, `height(right) - height(left)`.
    pub fn balance(&self, i: u32) -> i32 {
        self.arena[i as usize].bf
    }

    /// Insert `payload`, replacing any payload that compares equal.
    ///
    /// Returns the displaced payload on a replace (tree shape, node count and
    /// balance factors are unchanged), or `None` when a new node was added.
    pub fn set(&mut self, payload: T) -> Option<T> {
        let Some(root) = self.root else {
            let idx = self.push(payload);
            self.root = Some(idx);
            self.length = 1;
            return None;
        };

        let mut curr = root;
        loop {
            let cmp = (self.comparator)(&payload, &self.arena[curr as usize].payload);
            if cmp == 0 {
                let slot = &mut self.arena[curr as usize].payload;
                return Some(mem::replace(slot, payload));
            }
            let nxt = if cmp < 0 {
                self.arena[curr as usize].l
            } else {
                self.arena[curr as usize].r
            };
            match nxt {
                Some(nxt) => curr = nxt,
                None => {
                    let idx = self.push(payload);
                    self.root = Some(if cmp < 0 {
                        insert_left(&mut self.arena, root, idx, curr)
                    } else {
                        insert_right(&mut self.arena, root, idx, curr)
                    });
                    self.length += 1;
                    return None;
                }
            }
        }
    }

    fn push(&mut self, payload: T) -> u32 {
        let idx = self.arena.len() as u32;
        self.arena.push(AvlNode::new(payload));
        idx
    }

    /// Binary search by a probe function; see [`crate::insert::find_by`].
    pub fn find_by<F>(&self, probe: F) -> Option<u32>
    where
        F: Fn(&T) -> i32,
    {
        find_by(&self.arena, self.root, probe)
    }

    /// [`Self::find_by`] plus the number of nodes visited.
    pub fn find_by_counting<F>(&self, probe: F) -> (Option<u32>, usize)
    where
        F: Fn(&T) -> i32,
    {
        find_by_counting(&self.arena, self.root, probe)
    }

    pub fn get_by<F>(&self, probe: F) -> Option<&T>
    where
        F: Fn(&T) -> i32,
    {
        self.find_by(probe).map(|i| self.payload(i))
    }

    /// Lowest-ordered node, for ascending iteration with [`Self::next`].
    pub fn first(&self) -> Option<u32> {
        first(&self.arena, self.root)
    }

    pub fn next(&self, i: u32) -> Option<u32> {
        next(&self.arena, i)
    }

    /// Visit every payload in ascending comparator order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(u32, &T),
    {
        let mut curr = self.first();
        while let Some(i) = curr {
            f(i, self.payload(i));
            curr = self.next(i);
        }
    }

    /// Visit every payload in descending comparator order with its depth.
    pub fn for_each_desc<F>(&self, mut f: F)
    where
        F: FnMut(u32, usize, &T),
    {
        traverse_from_right(&self.arena, self.root, 0, &mut |i, depth| {
            f(i, depth, &self.arena[i as usize].payload);
        });
    }

    /// Deep copy through a fallible per-payload duplicator.
    ///
    /// Walks the source in descending order, duplicating every payload and
    /// inserting it into a fresh tree.  If `dup` fails for any payload the
    /// partially built tree is dropped and the whole call returns `None` —
    /// a partial copy is never observable.
    pub fn try_map_clone<F>(&self, mut dup: F) -> Option<Self>
    where
        F: FnMut(&T) -> Option<T>,
        C: Clone,
    {
        let mut dest = Self::with_comparator(self.comparator.clone());
        if self.copy_into(self.root, &mut dest, &mut dup) {
            Some(dest)
        } else {
            None
        }
    }

    fn copy_into<F>(&self, node: Option<u32>, dest: &mut Self, dup: &mut F) -> bool
    where
        F: FnMut(&T) -> Option<T>,
    {
        let Some(i) = node else {
            return true;
        };
        let (l, r) = {
            let n = &self.arena[i as usize];
            (n.l, n.r)
        };
        if !self.copy_into(r, dest, dup) {
            return false;
        }
        match dup(&self.arena[i as usize].payload) {
            Some(payload) => {
                dest.set(payload);
            }
            None => return false,
        }
        self.copy_into(l, dest, dup)
    }

    /// Drop every node and payload.  Idempotent.
    pub fn clear(&mut self) {
        self.root = None;
        self.arena.clear();
        self.length = 0;
    }

    /// Check parent links, balance factors, the AVL height bound, and strict
    /// ascending order; see [`crate::util::assert_avl_tree`].
    pub fn assert_valid(&self) -> Result<(), String> {
        assert_avl_tree(&self.arena, self.root, &self.comparator)
    }

    pub fn print(&self) -> String
    where
        T: Debug,
    {
        print(&self.arena, self.root, "")
    }
}

impl<T, C> Clone for AvlTree<T, C>
where
    T: Clone,
    C: Fn(&T, &T) -> i32 + Clone,
{
    fn clone(&self) -> Self {
        self.try_map_clone(|payload| Some(payload.clone()))
            .expect("infallible duplicator")
    }
}
