//! # Parser Events
//!
//! Events are the intermediate representation between parsing and tree
//! building. The parser turns tokens into a **flat sequence** of events and
//! the [`Sink`](super::sink::Sink) assembles the owned tree from them:
//!
//! ```text
//! <p>Hi <b>there</b></p>
//!
//! Open(p)
//!   Text("Hi ")
//!   Open(b)
//!     Text("there")
//!   Close(b)
//! Close(p)
//! ```
//!
//! Keeping the two stages apart means tag resolution and entity decoding
//! live in the parser, while nesting checks live in the sink.

use crate::tag::Tag;

/// An event emitted by the parser during tree construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A start tag. Void and self-closing elements are never followed by a
    /// matching `Close`.
    Open {
        tag: Tag,
        attrs: Vec<(String, String)>,
        self_closing: bool,
        offset: usize,
    },

    /// Entity-decoded character data.
    Text(String),

    /// An end tag.
    Close { tag: Tag, offset: usize },
}
