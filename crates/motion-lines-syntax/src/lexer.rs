//! # Lexer - Tokenizing Motion Markup
//!
//! This module provides the first stage of parsing: breaking markup into
//! tokens using the [Logos] lexer generator.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## The Lossless Guarantee
//!
//! Every byte in the input appears in exactly one token. Bytes the lexer
//! cannot make sense of (a stray `<`, an unterminated tag, a comment) end up
//! in [`MarkupKind::Invalid`] tokens instead of being skipped, so the parser
//! can report exactly where the markup went wrong:
//!
//! ```
//! use motion_lines_syntax::lexer::lex;
//!
//! let input = "<p class=\"intro\">Hello &amp; welcome</p>";
//! let tokens = lex(input);
//!
//! // Concatenating all token texts gives back the original
//! let reconstructed: String = tokens.iter().map(|t| t.text).collect();
//! assert_eq!(input, reconstructed);
//! ```
//!
//! ## Token Design
//!
//! Tokens are deliberately coarse. A whole start tag including its
//! attributes is one token; attribute splitting happens later in
//! [`crate::parser::attrs`]. Text runs are everything up to the next `<`,
//! entity references included (decoding is the parser's job).
//!
//! ## Public API
//!
//! - [`lex`] - Tokenize input, returning `Vec<Token>`
//! - [`Token`] - A token with its kind, text slice and byte offset

use logos::Logos;

/// Token kinds produced by the Logos lexer.
///
/// This enum exists separately from [`MarkupKind`] because Logos needs to
/// derive on it, while the parser also wants a kind for unlexable input.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `<name attr="value" ...>` or `<name/>`
    #[regex(r#"<[a-zA-Z][a-zA-Z0-9-]*([ \t\r\n]+[^ \t\r\n"'<>/=]+([ \t\r\n]*=[ \t\r\n]*("[^"]*"|'[^']*'|[^ \t\r\n"'=<>`]+))?)*[ \t\r\n]*/?>"#)]
    StartTag,

    /// `</name>`
    #[regex(r"</[a-zA-Z][a-zA-Z0-9-]*[ \t\r\n]*>")]
    EndTag,

    /// Character data, entity references undecoded
    #[regex(r"[^<]+")]
    Text,
}

impl TokenKind {
    /// Convert to the parser-facing kind.
    pub fn to_markup_kind(self) -> MarkupKind {
        match self {
            TokenKind::StartTag => MarkupKind::StartTag,
            TokenKind::EndTag => MarkupKind::EndTag,
            TokenKind::Text => MarkupKind::Text,
        }
    }
}

/// The kind of a lexed token as seen by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkupKind {
    StartTag,
    EndTag,
    Text,
    /// Input the lexer could not match (stray `<`, comments, broken tags).
    Invalid,
}

/// A lexed token with its kind, text slice and starting byte offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: MarkupKind,
    pub text: &'a str,
    pub offset: usize,
}

/// Lex the input into a sequence of tokens.
///
/// Guarantees that all bytes from the input appear in the output tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(input);

    while let Some(result) = lexer.next() {
        let text = lexer.slice();
        let kind = match result {
            Ok(token_kind) => token_kind.to_markup_kind(),
            Err(()) => MarkupKind::Invalid,
        };
        tokens.push(Token {
            kind,
            text,
            offset: lexer.span().start,
        });
    }

    tokens
}
