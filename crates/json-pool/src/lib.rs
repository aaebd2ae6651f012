//! Flatten nested JSON documents into a flat, string-keyed typed value
//! store (a "kernel pool") backed by an AVL ordered map.
//!
//! Every scalar leaf of the document becomes one entry under a synthesized
//! path key: `.<memberName>` for object members, `[<index>]` for array
//! elements, plus a synthetic `<arrayPrefix>.length` entry per array.
//! Typed accessors reject kind mismatches, so a string entry can never be
//! read as a number.
//!
//! # Example
//!
//! ```
//! use json_pool::Pool;
//!
//! let pool = Pool::from_json_str(r#"{"a":[1,2],"b":"text"}"#, "json").unwrap();
//!
//! assert_eq!(pool.get_number("json.a.length"), Some(2.0));
//! assert_eq!(pool.get_number("json.a[0]"), Some(1.0));
//! assert_eq!(pool.get_number("json.a[1]"), Some(2.0));
//! assert_eq!(pool.get_string("json.b"), Some("text"));
//!
//! // Kind mismatches are a normal "not found", not an error.
//! assert_eq!(pool.get_number("json.b"), None);
//! ```
//!
//! # Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! [`entry`] | [`PoolEntry`], [`PoolValue`], [`PoolKind`] — the stored payloads |
//! [`tokenizer`] | JSON → flat stream of typed spans |
//! [`flatten`] | token stream → pool entries under synthesized keys |
//! [`pool`] | [`Pool`] — typed accessors, copy, dump, file entry points |
//! [`error`] | [`PoolError`] — the loading pipeline's failure taxonomy |

pub mod entry;
pub mod error;
pub mod flatten;
pub mod pool;
pub mod tokenizer;

pub use entry::{entry_order, key_order, PoolEntry, PoolKind, PoolValue};
pub use error::PoolError;
pub use flatten::flatten_value;
pub use pool::{Pool, DEFAULT_KEY_PREFIX};
pub use tokenizer::{tokenize, Token, TokenKind, TokenizeError};
