//! Arena-based AVL ordered map keyed by a caller-supplied ordering function.
//!
//! Instead of raw pointers, all tree links are `Option<u32>` indices into a
//! `Vec`-backed arena owned by [`AvlTree`].  Rotations relink a node's
//! ancestor in O(1) from the parent index plus a which-child test, so no
//! insertion ever re-searches from the root.
//!
//! The tree stores opaque payloads and orders them with one comparator
//! supplied at construction.  Inserting a payload that compares equal to an
//! existing one replaces it in place — same node count, same shape, new
//! payload.  There is no removal operation.
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`types`] | [`AvlNode`] — links, balance factor, payload |
//! [`insert`] | insertion, rotations, rebalancing, lookup |
//! [`util`] | `first`/`next` walkers, right-to-left traversal, invariant checker, printer |
//! [`tree`] | [`AvlTree`] wrapper — arena, root, comparator |

pub mod insert;
pub mod tree;
pub mod types;
pub mod util;

pub use insert::{find_by, find_by_counting, insert_left, insert_right};
pub use tree::AvlTree;
pub use types::{AvlNode, Comparator};
pub use util::{assert_avl_tree, first, next, print, traverse_from_right};
