use thiserror::Error;

/// Reasons a piece of markup is rejected before any tree is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unexpected input at byte {offset}: {snippet:?}")]
    UnexpectedToken { offset: usize, snippet: String },

    #[error("Unsupported element <{name}> at byte {offset}")]
    UnsupportedTag { offset: usize, name: String },

    #[error("Expected </{expected}> but found </{found}> at byte {offset}")]
    UnbalancedTag {
        offset: usize,
        expected: String,
        found: String,
    },

    #[error("Closing tag </{name}> at byte {offset} has no matching opening tag")]
    StrayClosingTag { offset: usize, name: String },

    #[error("Element <{name}> opened at byte {offset} is never closed")]
    UnclosedTag { offset: usize, name: String },
}
