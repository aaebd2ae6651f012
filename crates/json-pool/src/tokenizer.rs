//! JSON tokenizer producing a flat stream of typed spans.
//!
//! The output is the contract the flattening engine consumes: tokens in
//! document order, depth-first, a container's children immediately after
//! the container token (object children as alternating name/value pairs).
//! String spans exclude the quotes and are not unescaped; primitive spans
//! cover the literal.  No value decoding happens here.
//!
//! Primitives are validated by their first byte only and run to the next
//! delimiter — a malformed scalar such as `12x3` is a well-formed token and
//! classifies as `Unknown` downstream, never a tokenize error.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Primitive,
    String,
    Array,
    Object,
}

/// One typed span into the source text.
///
/// `size` is the element count for arrays, the pair count for objects,
/// 1 for object member names, and 0 for other scalars.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
    pub size: usize,
}

impl Token {
    /// The span text within `src`.
    pub fn text<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.end]
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// Only whitespace before end of input.
    #[error("empty JSON input")]
    Empty,
    /// A byte that cannot start or continue a JSON value at this position.
    #[error("invalid character at offset {0}")]
    InvalidCharacter(usize),
    /// Input ended inside an unterminated value.
    #[error("unexpected end of JSON input")]
    UnexpectedEnd,
}

/// Tokenize one JSON document.
///
/// Exactly one root value is accepted; trailing non-whitespace is an
/// [`TokenizeError::InvalidCharacter`].
pub fn tokenize(src: &str) -> Result<Vec<Token>, TokenizeError> {
    let mut t = Tokenizer {
        data: src.as_bytes(),
        x: 0,
        toks: Vec::new(),
    };
    t.skip_whitespace();
    if t.x >= t.data.len() {
        return Err(TokenizeError::Empty);
    }
    t.read_value()?;
    t.skip_whitespace();
    if t.x < t.data.len() {
        return Err(TokenizeError::InvalidCharacter(t.x));
    }
    Ok(t.toks)
}

struct Tokenizer<'a> {
    data: &'a [u8],
    x: usize,
    toks: Vec<Token>,
}

impl Tokenizer<'_> {
    fn skip_whitespace(&mut self) {
        while self.x < self.data.len() {
            match self.data[self.x] {
                b' ' | b'\t' | b'\n' | b'\r' => self.x += 1,
                _ => break,
            }
        }
    }

    fn read_value(&mut self) -> Result<(), TokenizeError> {
        self.skip_whitespace();
        if self.x >= self.data.len() {
            return Err(TokenizeError::UnexpectedEnd);
        }
        match self.data[self.x] {
            b'"' => self.read_string().map(|_| ()),
            b'{' => self.read_object(),
            b'[' => self.read_array(),
            b'-' | b'0'..=b'9' | b't' | b'f' | b'n' => self.read_primitive(),
            _ => Err(TokenizeError::InvalidCharacter(self.x)),
        }
    }

    /// Read a quoted string, returning its token index so object parsing
    /// can mark member names.
    fn read_string(&mut self) -> Result<usize, TokenizeError> {
        self.x += 1; // opening quote
        let start = self.x;
        while self.x < self.data.len() {
            match self.data[self.x] {
                b'"' => {
                    let idx = self.toks.len();
                    self.toks.push(Token {
                        kind: TokenKind::String,
                        start,
                        end: self.x,
                        size: 0,
                    });
                    self.x += 1;
                    return Ok(idx);
                }
                b'\\' => {
                    if self.x + 1 >= self.data.len() {
                        return Err(TokenizeError::UnexpectedEnd);
                    }
                    self.x += 2;
                }
                _ => self.x += 1,
            }
        }
        Err(TokenizeError::UnexpectedEnd)
    }

    fn read_primitive(&mut self) -> Result<(), TokenizeError> {
        let start = self.x;
        while self.x < self.data.len() {
            match self.data[self.x] {
                b' ' | b'\t' | b'\n' | b'\r' | b',' | b']' | b'}' | b':' => break,
                _ => self.x += 1,
            }
        }
        self.toks.push(Token {
            kind: TokenKind::Primitive,
            start,
            end: self.x,
            size: 0,
        });
        Ok(())
    }

    fn read_object(&mut self) -> Result<(), TokenizeError> {
        let start = self.x;
        let container = self.toks.len();
        self.toks.push(Token {
            kind: TokenKind::Object,
            start,
            end: 0,
            size: 0,
        });
        self.x += 1; // '{'

        let mut size = 0usize;
        loop {
            self.skip_whitespace();
            if self.x >= self.data.len() {
                return Err(TokenizeError::UnexpectedEnd);
            }
            if self.data[self.x] == b'}' {
                self.x += 1;
                self.toks[container].end = self.x;
                self.toks[container].size = size;
                return Ok(());
            }
            if size > 0 {
                if self.data[self.x] != b',' {
                    return Err(TokenizeError::InvalidCharacter(self.x));
                }
                self.x += 1;
                self.skip_whitespace();
                if self.x >= self.data.len() {
                    return Err(TokenizeError::UnexpectedEnd);
                }
            }
            if self.data[self.x] != b'"' {
                return Err(TokenizeError::InvalidCharacter(self.x));
            }
            let name = self.read_string()?;
            self.toks[name].size = 1;

            self.skip_whitespace();
            if self.x >= self.data.len() {
                return Err(TokenizeError::UnexpectedEnd);
            }
            if self.data[self.x] != b':' {
                return Err(TokenizeError::InvalidCharacter(self.x));
            }
            self.x += 1;

            self.read_value()?;
            size += 1;
        }
    }

    fn read_array(&mut self) -> Result<(), TokenizeError> {
        let start = self.x;
        let container = self.toks.len();
        self.toks.push(Token {
            kind: TokenKind::Array,
            start,
            end: 0,
            size: 0,
        });
        self.x += 1; // '['

        let mut size = 0usize;
        loop {
            self.skip_whitespace();
            if self.x >= self.data.len() {
                return Err(TokenizeError::UnexpectedEnd);
            }
            if self.data[self.x] == b']' {
                self.x += 1;
                self.toks[container].end = self.x;
                self.toks[container].size = size;
                return Ok(());
            }
            if size > 0 {
                if self.data[self.x] != b',' {
                    return Err(TokenizeError::InvalidCharacter(self.x));
                }
                self.x += 1;
            }
            self.read_value()?;
            size += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_tokens() {
        let toks = tokenize("42").unwrap();
        assert_eq!(toks.len(), 1);
        assert_eq!(toks[0].kind, TokenKind::Primitive);
        assert_eq!(toks[0].text("42"), "42");

        let src = r#""hello""#;
        let toks = tokenize(src).unwrap();
        assert_eq!(toks[0].kind, TokenKind::String);
        assert_eq!(toks[0].text(src), "hello");
    }

    #[test]
    fn test_container_stream_shape() {
        let src = r#"{"a":[1,2]}"#;
        let toks = tokenize(src).unwrap();
        assert_eq!(toks.len(), 5);

        assert_eq!(toks[0].kind, TokenKind::Object);
        assert_eq!(toks[0].size, 1);

        assert_eq!(toks[1].kind, TokenKind::String);
        assert_eq!(toks[1].text(src), "a");
        assert_eq!(toks[1].size, 1);

        assert_eq!(toks[2].kind, TokenKind::Array);
        assert_eq!(toks[2].size, 2);

        assert_eq!(toks[3].text(src), "1");
        assert_eq!(toks[4].text(src), "2");
    }

    #[test]
    fn test_string_span_excludes_quotes_keeps_escapes() {
        let src = r#"{"k":"a\"b"}"#;
        let toks = tokenize(src).unwrap();
        assert_eq!(toks[2].kind, TokenKind::String);
        assert_eq!(toks[2].text(src), r#"a\"b"#);
    }

    #[test]
    fn test_malformed_primitive_is_one_token() {
        let src = "[12x3,-x]";
        let toks = tokenize(src).unwrap();
        assert_eq!(toks[0].size, 2);
        assert_eq!(toks[1].text(src), "12x3");
        assert_eq!(toks[2].text(src), "-x");
    }

    #[test]
    fn test_errors() {
        assert_eq!(tokenize(""), Err(TokenizeError::Empty));
        assert_eq!(tokenize("  \n "), Err(TokenizeError::Empty));
        assert_eq!(tokenize("{"), Err(TokenizeError::UnexpectedEnd));
        assert_eq!(tokenize(r#"{"a":1"#), Err(TokenizeError::UnexpectedEnd));
        assert_eq!(tokenize(r#""abc"#), Err(TokenizeError::UnexpectedEnd));
        assert_eq!(tokenize("@"), Err(TokenizeError::InvalidCharacter(0)));
        assert_eq!(tokenize("1 2"), Err(TokenizeError::InvalidCharacter(2)));
        assert_eq!(tokenize(r#"{"a" 1}"#), Err(TokenizeError::InvalidCharacter(5)));
        assert_eq!(tokenize("[1 2]"), Err(TokenizeError::InvalidCharacter(3)));
        assert_eq!(tokenize("[1,]"), Err(TokenizeError::InvalidCharacter(3)));
    }

    #[test]
    fn test_nested_object_sizes() {
        let src = r#"{"a":{"b":1,"c":2},"d":[]}"#;
        let toks = tokenize(src).unwrap();
        assert_eq!(toks[0].size, 2);
        assert_eq!(toks[2].kind, TokenKind::Object);
        assert_eq!(toks[2].size, 2);
        let d_arr = toks.last().unwrap();
        assert_eq!(d_arr.kind, TokenKind::Array);
        assert_eq!(d_arr.size, 0);
    }

    #[test]
    fn test_agrees_with_serde_on_valid_documents() {
        let cases = [
            "null",
            "true",
            "-1.5e3",
            r#""text""#,
            "[]",
            "{}",
            r#"{"a":[1,{"b":null}],"c":"d"}"#,
            "[[[1],[2,3]],{}]",
        ];
        for src in cases {
            assert!(tokenize(src).is_ok(), "tokenize failed on {src}");
            assert!(
                serde_json::from_str::<serde_json::Value>(src).is_ok(),
                "oracle rejects {src}"
            );
        }
    }
}
