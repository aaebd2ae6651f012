//! `Pool` — the flat, string-keyed typed value store.
//!
//! Lookup is modeled after the GIPOOL/GDPOOL/GCPOOL kernel-pool routines:
//! one generic kind-checked lookup plus four narrow typed accessors.

use std::fs;
use std::io;
use std::path::Path;

use avl_forest::AvlTree;

use crate::entry::{entry_order, key_order, PoolEntry, PoolKind, PoolValue};
use crate::error::PoolError;
use crate::flatten::flatten_value;
use crate::tokenizer::tokenize;

/// Root prefix used by the file entry points, matching the reference tool.
pub const DEFAULT_KEY_PREFIX: &str = "json";

type EntryOrder = fn(&PoolEntry, &PoolEntry) -> i32;

/// Flat namespace of typed entries under synthesized path keys, backed by
/// the AVL ordered map.  The key ordering is fixed at construction.
pub struct Pool {
    tree: AvlTree<PoolEntry, EntryOrder>,
}

impl Pool {
    pub fn new() -> Self {
        Self {
            tree: AvlTree::with_comparator(entry_order),
        }
    }

    /// Flatten one JSON document under `prefix`.
    pub fn from_json_str(text: &str, prefix: &str) -> Result<Self, PoolError> {
        let toks = tokenize(text)?;
        let mut pool = Pool::new();
        let mut key = String::from(prefix);
        flatten_value(&mut pool, text, &toks, &mut key);
        Ok(pool)
    }

    /// Read and flatten a JSON file under the [`DEFAULT_KEY_PREFIX`].
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, PoolError> {
        Self::from_json_file_with_prefix(path, DEFAULT_KEY_PREFIX)
    }

    pub fn from_json_file_with_prefix<P: AsRef<Path>>(
        path: P,
        prefix: &str,
    ) -> Result<Self, PoolError> {
        let bytes = fs::read(path)?;
        let text = std::str::from_utf8(&bytes).map_err(|_| PoolError::InvalidUtf8)?;
        Self::from_json_str(text, prefix)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Insert an entry, replacing any entry with an equal key.
    ///
    /// Returns the displaced entry on a replace.
    pub fn insert(&mut self, entry: PoolEntry) -> Option<PoolEntry> {
        self.tree.set(entry)
    }

    /// Generic lookup by key.
    pub fn get(&self, key: &str) -> Option<&PoolEntry> {
        self.tree.get_by(|e| key_order(key, e))
    }

    /// Kind-checked lookup: absent keys and kind mismatches are both an
    /// ordinary "not found" — callers must not conclude the key is absent.
    pub fn get_typed(&self, key: &str, kind: PoolKind) -> Option<&PoolEntry> {
        self.get(key).filter(|e| e.kind() == kind)
    }

    /// Confirm presence of a `null` entry under `key`.
    pub fn get_null(&self, key: &str) -> bool {
        self.get_typed(key, PoolKind::Null).is_some()
    }

    pub fn get_boolean(&self, key: &str) -> Option<bool> {
        match self.get_typed(key, PoolKind::Boolean)?.value() {
            PoolValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn get_number(&self, key: &str) -> Option<f64> {
        match self.get_typed(key, PoolKind::Number)?.value() {
            PoolValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn get_string(&self, key: &str) -> Option<&str> {
        match self.get_typed(key, PoolKind::String)?.value() {
            PoolValue::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Deep copy through a fallible per-entry duplicator.
    ///
    /// If `dup` fails for any entry, the partially built pool is discarded
    /// and the whole call returns `None` — a partial copy is never
    /// observable.
    pub fn copy_with<F>(&self, dup: F) -> Option<Self>
    where
        F: FnMut(&PoolEntry) -> Option<PoolEntry>,
    {
        self.tree.try_map_clone(dup).map(|tree| Self { tree })
    }

    /// Deep copy sharing no storage with `self`.
    pub fn try_copy(&self) -> Option<Self> {
        self.copy_with(|e| Some(e.clone()))
    }

    /// Drop every entry.  Idempotent.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Visit every entry in descending key order with its tree depth.
    pub fn for_each_desc<F>(&self, mut f: F)
    where
        F: FnMut(usize, &PoolEntry),
    {
        self.tree.for_each_desc(|_i, depth, e| f(depth, e));
    }

    /// Human-readable diagnostic dump: one line per entry in descending key
    /// order, indented by tree depth, with balance factor, key, and typed
    /// value.  Not a stable format.
    pub fn dump<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        let mut result = Ok(());
        self.tree.for_each_desc(|i, depth, e| {
            if result.is_ok() {
                result = writeln!(
                    out,
                    "{:indent$}[bf={};depth={depth}] {} {}",
                    "",
                    self.tree.balance(i),
                    e.key(),
                    e.value(),
                    indent = depth * 2,
                );
            }
        });
        result
    }

    /// Invariant check over the backing tree, for tests and diagnostics.
    pub fn assert_valid(&self) -> Result<(), String> {
        self.tree.assert_valid()
    }
}

impl Default for Pool {
    fn default() -> Self {
        Self::new()
    }
}
