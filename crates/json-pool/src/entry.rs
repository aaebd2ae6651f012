//! Flat pool entries — the payloads stored in the ordered map.

use std::fmt;

/// Typed value of one flattened scalar.
///
/// The tag and the value are inseparable, so a value can never be read
/// under the wrong kind.
#[derive(Clone, Debug, PartialEq)]
pub enum PoolValue {
    /// A primitive that is neither `null`, `true`/`false`, nor a valid
    /// number.  Recorded, never silently dropped; typed lookups never
    /// match it.
    Unknown,
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

/// Fieldless discriminant of [`PoolValue`], used to request a kind in
/// typed lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolKind {
    Unknown,
    Null,
    Boolean,
    Number,
    String,
}

impl PoolValue {
    pub fn kind(&self) -> PoolKind {
        match self {
            PoolValue::Unknown => PoolKind::Unknown,
            PoolValue::Null => PoolKind::Null,
            PoolValue::Boolean(_) => PoolKind::Boolean,
            PoolValue::Number(_) => PoolKind::Number,
            PoolValue::String(_) => PoolKind::String,
        }
    }

    /// Classify the raw text of a primitive token.
    ///
    /// `null`, `true` and `false` are recognized by their first byte; any
    /// other primitive must parse as a 64-bit float in full, otherwise it
    /// is [`PoolValue::Unknown`].
    pub fn classify_primitive(raw: &str) -> PoolValue {
        match raw.bytes().next() {
            Some(b'n') => PoolValue::Null,
            Some(b't') => PoolValue::Boolean(true),
            Some(b'f') => PoolValue::Boolean(false),
            _ => match raw.parse::<f64>() {
                Ok(num) => PoolValue::Number(num),
                Err(_) => PoolValue::Unknown,
            },
        }
    }
}

impl fmt::Display for PoolValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolValue::Unknown => write!(f, "UNKNOWN"),
            PoolValue::Null => write!(f, "<null>"),
            PoolValue::Boolean(b) => write!(f, "BOOLEAN=<{}>", if *b { "TRUE" } else { "FALSE" }),
            PoolValue::Number(n) => write!(f, "NUMBER={n}"),
            PoolValue::String(s) => write!(f, "STRING=<{s}>"),
        }
    }
}

/// One entry of the kernel pool: the synthesized path key, the typed value,
/// and the raw source text of the token that produced it.
///
/// All three fields own their storage; cloning an entry shares nothing with
/// the source entry.
#[derive(Clone, Debug, PartialEq)]
pub struct PoolEntry {
    key: String,
    raw: String,
    value: PoolValue,
}

impl PoolEntry {
    pub fn new(key: String, raw: String, value: PoolValue) -> Self {
        Self { key, raw, value }
    }

    /// Build an entry from a scalar token: `is_string` selects the string
    /// kind, any other token text goes through primitive classification.
    pub fn from_scalar(key: &str, raw: &str, is_string: bool) -> Self {
        let value = if is_string {
            PoolValue::String(raw.to_string())
        } else {
            PoolValue::classify_primitive(raw)
        };
        Self {
            key: key.to_string(),
            raw: raw.to_string(),
            value,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> &PoolValue {
        &self.value
    }

    pub fn kind(&self) -> PoolKind {
        self.value.kind()
    }
}

/// Comparator over entries: byte-wise order of the key strings.
pub fn entry_order(a: &PoolEntry, b: &PoolEntry) -> i32 {
    key_order(&a.key, b)
}

/// Ordering of a search key relative to an entry, for probe-style lookups.
pub fn key_order(key: &str, entry: &PoolEntry) -> i32 {
    match key.as_bytes().cmp(entry.key.as_bytes()) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_primitive() {
        assert_eq!(PoolValue::classify_primitive("null"), PoolValue::Null);
        assert_eq!(
            PoolValue::classify_primitive("true"),
            PoolValue::Boolean(true)
        );
        assert_eq!(
            PoolValue::classify_primitive("false"),
            PoolValue::Boolean(false)
        );
        assert_eq!(
            PoolValue::classify_primitive("1.5e3"),
            PoolValue::Number(1500.0)
        );
        assert_eq!(PoolValue::classify_primitive("-12"), PoolValue::Number(-12.0));
        assert_eq!(PoolValue::classify_primitive("12x3"), PoolValue::Unknown);
        assert_eq!(PoolValue::classify_primitive("-x"), PoolValue::Unknown);
    }

    #[test]
    fn test_first_byte_wins_for_literals() {
        // Malformed literals still classify by first byte, as the reference
        // tool does.
        assert_eq!(PoolValue::classify_primitive("tru"), PoolValue::Boolean(true));
        assert_eq!(PoolValue::classify_primitive("n0pe"), PoolValue::Null);
    }

    #[test]
    fn test_entry_kinds() {
        let e = PoolEntry::from_scalar("json.a", "42", false);
        assert_eq!(e.kind(), PoolKind::Number);
        assert_eq!(e.raw(), "42");

        let e = PoolEntry::from_scalar("json.b", "42", true);
        assert_eq!(e.kind(), PoolKind::String);
        assert_eq!(e.value(), &PoolValue::String("42".to_string()));
    }

    #[test]
    fn test_entry_order() {
        let a = PoolEntry::from_scalar("json.a", "1", false);
        let b = PoolEntry::from_scalar("json.b", "2", false);
        assert!(entry_order(&a, &b) < 0);
        assert!(entry_order(&b, &a) > 0);
        assert_eq!(entry_order(&a, &a.clone()), 0);
        assert!(key_order("json.a", &b) < 0);
        assert_eq!(key_order("json.b", &b), 0);
    }

    #[test]
    fn test_clone_is_independent() {
        let e = PoolEntry::from_scalar("json.s", "text", true);
        let c = e.clone();
        drop(e);
        assert_eq!(c.key(), "json.s");
        assert_eq!(c.value(), &PoolValue::String("text".to_string()));
    }
}
