//! Flattening engine — walk a token stream, synthesize composite keys, and
//! insert one typed entry per scalar into the pool.
//!
//! Key syntax: `.<memberName>` for object members, `[<index>]` (zero-based)
//! for array elements, and a synthetic `<arrayPrefix>.length` entry holding
//! every array's element count.  The key prefix lives in one caller-owned
//! `String`; after recursing into a branch the prefix is truncated back to
//! the length saved before that branch, so sibling branches never observe a
//! deeper branch's suffix.

use std::fmt::Write;

use crate::entry::PoolEntry;
use crate::pool::Pool;
use crate::tokenizer::{Token, TokenKind};

/// Flatten the value starting at `toks[0]` and all its descendants.
///
/// Returns the number of tokens consumed.  Recursion depth equals the
/// document's nesting depth, which is the caller's responsibility to bound.
pub fn flatten_value(pool: &mut Pool, src: &str, toks: &[Token], prefix: &mut String) -> usize {
    let Some(tok) = toks.first() else {
        return 0;
    };

    match tok.kind {
        TokenKind::String | TokenKind::Primitive => {
            let is_string = tok.kind == TokenKind::String;
            pool.insert(PoolEntry::from_scalar(prefix, tok.text(src), is_string));
            1
        }
        TokenKind::Array => {
            let saved = prefix.len();

            // Synthetic `.length` entry, flattened from a one-token stream
            // over the element count's text.
            let len_text = tok.size.to_string();
            let synth = [Token {
                kind: TokenKind::Primitive,
                start: 0,
                end: len_text.len(),
                size: 0,
            }];
            prefix.push_str(".length");
            flatten_value(pool, &len_text, &synth, prefix);
            prefix.truncate(saved);

            let mut consumed = 1;
            for i in 0..tok.size {
                let _ = write!(prefix, "[{i}]");
                let n = flatten_value(pool, src, &toks[consumed..], prefix);
                prefix.truncate(saved);
                if n == 0 {
                    break;
                }
                consumed += n;
            }
            consumed
        }
        TokenKind::Object => {
            let saved = prefix.len();
            let mut consumed = 1;
            for _ in 0..tok.size {
                let Some(name) = toks.get(consumed) else {
                    break;
                };
                consumed += 1;
                prefix.push('.');
                prefix.push_str(name.text(src));
                let n = flatten_value(pool, src, &toks[consumed..], prefix);
                prefix.truncate(saved);
                if n == 0 {
                    break;
                }
                consumed += n;
            }
            consumed
        }
    }
}
