//! # motion-lines-syntax
//!
//! An owned rich text tree for the small markup vocabulary used in motion
//! texts (paragraphs, headings, lists, quotes, inline formatting), built with
//! [Logos].
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Why an Owned Tree?
//!
//! The line numbering engine rewrites documents by building new trees:
//! inserting markers, splitting at line boundaries, fusing the halves of a
//! replaced range. A plain `enum Node { Element, Text }` where every node has a
//! single owner keeps those transformations free of aliasing questions, and a
//! closed [`Tag`] enum lets every consumer match the vocabulary exhaustively.
//!
//! ## Architecture Overview
//!
//! ```text
//! Markup → Lexer → Tokens → Parser → Events → Sink → Element (Root)
//!          (Logos)                            (stack)
//! ```
//!
//! 1. **Lexer** ([`lexer`]): start tags, end tags and text runs. Every byte
//!    lands in exactly one token.
//! 2. **Parser** ([`parser`]): resolves tag names, splits attributes, decodes
//!    entities, and emits [`parser::event::Event`]s.
//! 3. **Sink** ([`parser::sink`]): assembles the tree and rejects
//!    unbalanced markup.
//! 4. **Serializer** ([`serialize`]): writes canonical markup back out.
//!
//! ## Quick Start
//!
//! ```
//! use motion_lines_syntax::{parse, Tag};
//!
//! let root = parse("<ul><li>One</li><li>Two</li></ul>").unwrap();
//! let list = root.children[0].as_element().unwrap();
//! assert_eq!(list.tag, Tag::Ul);
//! assert_eq!(list.children.len(), 2);
//!
//! // Canonical markup survives a round trip unchanged
//! assert_eq!(root.inner_html(), "<ul><li>One</li><li>Two</li></ul>");
//! ```

pub mod error;
pub mod lexer;
pub mod node;
pub mod parser;
pub mod serialize;
pub mod tag;

pub use error::ParseError;
pub use node::{Element, Node};
pub use parser::parse;
pub use serialize::{close_tag, escape_text, open_tag, to_html};
pub use tag::Tag;
