//! Splitting a start tag token into its name and attributes.

/// A cursor for byte-by-byte scanning of a single tag token.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The tag text being scanned.
    pub s: &'a str,
    /// Current index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self { s, i: 0 }
    }

    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    pub fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.i += 1;
        }
    }

    /// Consumes bytes while `pred` holds and returns them as a slice.
    pub fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> &'a str {
        let s = self.s;
        let start = self.i;
        while self.peek().is_some_and(&pred) {
            self.i += 1;
        }
        &s[start..self.i]
    }
}

/// The pieces of a start tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartTag<'a> {
    pub name: &'a str,
    /// Attribute names with their raw (still entity-encoded) values.
    pub attrs: Vec<(&'a str, &'a str)>,
    pub self_closing: bool,
}

fn is_name_byte(b: u8) -> bool {
    !b.is_ascii_whitespace() && !matches!(b, b'"' | b'\'' | b'<' | b'>' | b'/' | b'=')
}

/// Splits a lexed start tag (`<name a="1" b>`) into its parts.
///
/// The lexer already guarantees the overall shape, so this never fails;
/// attributes without a value get an empty one.
pub fn split_start_tag(token: &str) -> StartTag<'_> {
    let mut cur = Cursor::new(token);
    cur.bump(); // <
    let name = cur.take_while(|b| b.is_ascii_alphanumeric() || b == b'-');

    let mut attrs = Vec::new();
    let mut self_closing = false;
    loop {
        cur.skip_whitespace();
        match cur.peek() {
            None | Some(b'>') => break,
            Some(b'/') => {
                self_closing = true;
                cur.bump();
                continue;
            }
            _ => {}
        }

        let attr_name = cur.take_while(is_name_byte);
        if attr_name.is_empty() {
            // Shape guaranteed by the lexer; bail out rather than spin.
            cur.bump();
            continue;
        }
        cur.skip_whitespace();

        let mut value = "";
        if cur.peek() == Some(b'=') {
            cur.bump();
            cur.skip_whitespace();
            value = match cur.peek() {
                Some(q @ (b'"' | b'\'')) => {
                    cur.bump();
                    let v = cur.take_while(|b| b != q);
                    cur.bump(); // closing quote
                    v
                }
                _ => cur.take_while(|b| !b.is_ascii_whitespace() && b != b'>'),
            };
        }
        attrs.push((attr_name, value));
    }

    StartTag {
        name,
        attrs,
        self_closing,
    }
}

/// Extracts the element name from a lexed end tag (`</name >`).
pub fn end_tag_name(token: &str) -> &str {
    let mut cur = Cursor::new(token);
    cur.bump(); // <
    cur.bump(); // /
    cur.take_while(|b| b.is_ascii_alphanumeric() || b == b'-')
}
