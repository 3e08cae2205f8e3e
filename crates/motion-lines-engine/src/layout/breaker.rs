//! Greedy word wrap over a run of characters.
//!
//! A run is split into `(word, separator)` tokens. A token that fits behind the
//! current offset is appended as a whole, separator included, so a placed line
//! may end up longer than the budget by its trailing whitespace. A token that
//! does not fit starts a fresh line and, if it is longer than the budget
//! itself, is chopped into budget-sized pieces.
//!
//! Only the offset check before a token decides whether it fits. Feeding text
//! without any whitespace therefore degenerates to fixed-width chopping.

/// State threaded through every call of [`break_text`] during one numbering
/// pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineCursor {
    /// Characters on the current line since the last line start.
    pub offset: usize,
    /// The number the next line start will receive.
    pub line_number: u32,
    /// Set on a line start whose marker has not been written yet. The marker
    /// goes in front of the first text of that line.
    pub pending_marker: bool,
    /// Line-length budgets of the enclosing containers, innermost last.
    pub budgets: Vec<usize>,
}

impl LineCursor {
    pub fn new(first_line: u32, budget: usize) -> Self {
        Self {
            offset: 0,
            line_number: first_line,
            pending_marker: true,
            budgets: vec![budget],
        }
    }

    /// The budget of the innermost container.
    pub fn budget(&self) -> usize {
        self.budgets.last().copied().unwrap_or(1)
    }

    pub fn push_budget(&mut self, budget: usize) {
        self.budgets.push(budget);
    }

    pub fn pop_budget(&mut self) {
        if self.budgets.len() > 1 {
            self.budgets.pop();
        }
    }

    /// Ends the current line at a block boundary. The next text opens a new
    /// line; nothing is numbered until that text arrives.
    pub fn end_line(&mut self) {
        self.offset = 0;
        self.pending_marker = true;
    }

    /// Claims the pending line start for content that is not broken itself.
    /// Returns the number of the opened line, if one was pending.
    pub fn open_pending_line(&mut self) -> Option<u32> {
        if !self.pending_marker {
            return None;
        }
        self.pending_marker = false;
        Some(self.take_line_number())
    }

    fn take_line_number(&mut self) -> u32 {
        let number = self.line_number;
        self.line_number += 1;
        number
    }
}

/// A piece of the output of [`break_text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    /// Start of line `n` after a block boundary.
    LineStart(u32),
    /// Soft wrap opening line `n`.
    Break(u32),
}

/// Whitespace that may end a line. No-break spaces keep words together.
fn is_separator(c: char) -> bool {
    c.is_whitespace() && c != '\u{a0}'
}

/// Splits `text` into `(word, trailing separator)` pairs. A run starting with
/// whitespace yields an empty first word.
fn tokenize(text: &str) -> Vec<(&str, &str)> {
    let mut tokens = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        let word_end = rest.find(is_separator).unwrap_or(rest.len());
        let (word, after) = rest.split_at(word_end);
        let sep_end = after
            .find(|c: char| !is_separator(c))
            .unwrap_or(after.len());
        let (sep, next) = after.split_at(sep_end);
        tokens.push((word, sep));
        rest = next;
    }
    tokens
}

/// Splits after the first `n` characters.
fn split_chars(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}

struct Output {
    fragments: Vec<Fragment>,
}

impl Output {
    fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.fragments.last_mut() {
            Some(Fragment::Text(prev)) => prev.push_str(text),
            _ => self.fragments.push(Fragment::Text(text.to_string())),
        }
    }

    /// Writes the pending line start, if any, before the first text of a line.
    fn open_line(&mut self, cursor: &mut LineCursor) {
        if let Some(number) = cursor.open_pending_line() {
            self.fragments.push(Fragment::LineStart(number));
        }
    }

    fn wrap(&mut self, cursor: &mut LineCursor) {
        cursor.offset = 0;
        cursor.pending_marker = false;
        let number = cursor.take_line_number();
        self.fragments.push(Fragment::Break(number));
    }
}

/// Wraps `text` into lines of at most `max_len` characters, continuing from
/// the state in `cursor`.
pub fn break_text(text: &str, mut cursor: LineCursor, max_len: usize) -> (Vec<Fragment>, LineCursor) {
    let max_len = max_len.max(1);
    let mut out = Output {
        fragments: Vec::new(),
    };

    for (word, sep) in tokenize(text) {
        let word_len = word.chars().count();
        let sep_len = sep.chars().count();

        if word.is_empty() || cursor.offset + word_len <= max_len {
            out.open_line(&mut cursor);
            out.text(word);
            out.text(sep);
            cursor.offset += word_len + sep_len;
            continue;
        }

        if cursor.offset > 0 {
            out.wrap(&mut cursor);
        }
        out.open_line(&mut cursor);

        let (head, mut tail) = split_chars(word, max_len - cursor.offset);
        out.text(head);
        cursor.offset += head.chars().count();
        while !tail.is_empty() {
            out.wrap(&mut cursor);
            let (piece, rest) = split_chars(tail, max_len);
            out.text(piece);
            cursor.offset = piece.chars().count();
            tail = rest;
        }
        out.text(sep);
        cursor.offset += sep_len;
    }

    (out.fragments, cursor)
}
