//! # Parser - Event-Based Tree Construction
//!
//! Parsing happens in three stages:
//!
//! ```text
//! Markup → Lexer → Tokens → Parser → Events → Sink → Element (Root)
//!          (Logos)          (tags,          (nesting
//!                            entities)       checks)
//! ```
//!
//! The parser is strict: unknown elements, stray `<`, and unbalanced tags are
//! errors. Motion texts are produced by an editor restricted to the same
//! vocabulary, so anything else signals corrupt input that must not be
//! numbered or spliced.
//!
//! ## Public API
//!
//! ```
//! use motion_lines_syntax::{parse, Tag};
//!
//! let root = parse("<p>Hello <strong>world</strong></p>").unwrap();
//! assert_eq!(root.tag, Tag::Root);
//! assert_eq!(root.children[0].tag(), Some(Tag::P));
//! ```

pub mod attrs;
pub mod event;
pub mod sink;

use crate::error::ParseError;
use crate::lexer::{MarkupKind, Token, lex};
use crate::node::Element;
use crate::tag::Tag;
use event::Event;
use sink::Sink;

/// The parser state: a token stream turned into events.
pub struct Parser<'t, 'input> {
    tokens: &'t [Token<'input>],
    events: Vec<Event>,
}

impl<'t, 'input> Parser<'t, 'input> {
    pub fn new(tokens: &'t [Token<'input>]) -> Self {
        Self {
            tokens,
            events: Vec::with_capacity(tokens.len()),
        }
    }

    /// Parse the tokens and return the document root.
    pub fn parse(mut self) -> Result<Element, ParseError> {
        for token in self.tokens {
            let event = Self::event_for(token)?;
            self.events.push(event);
        }
        Sink::new(self.events).finish()
    }

    fn event_for(token: &Token<'_>) -> Result<Event, ParseError> {
        match token.kind {
            MarkupKind::Text => Ok(Event::Text(decode(token.text))),
            MarkupKind::StartTag => {
                let parts = attrs::split_start_tag(token.text);
                let tag = resolve(parts.name, token.offset)?;
                let attrs = parts
                    .attrs
                    .into_iter()
                    .map(|(name, value)| (name.to_ascii_lowercase(), decode(value)))
                    .collect();
                Ok(Event::Open {
                    tag,
                    attrs,
                    self_closing: parts.self_closing,
                    offset: token.offset,
                })
            }
            MarkupKind::EndTag => {
                let tag = resolve(attrs::end_tag_name(token.text), token.offset)?;
                Ok(Event::Close {
                    tag,
                    offset: token.offset,
                })
            }
            MarkupKind::Invalid => Err(ParseError::UnexpectedToken {
                offset: token.offset,
                snippet: token.text.chars().take(20).collect(),
            }),
        }
    }
}

fn resolve(name: &str, offset: usize) -> Result<Tag, ParseError> {
    Tag::from_name(name).ok_or_else(|| ParseError::UnsupportedTag {
        offset,
        name: name.to_ascii_lowercase(),
    })
}

fn decode(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

/// Parse markup into a [`Tag::Root`] element.
pub fn parse(input: &str) -> Result<Element, ParseError> {
    let tokens = lex(input);
    Parser::new(&tokens).parse()
}
