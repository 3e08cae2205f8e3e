//! The closed element vocabulary of motion texts.

use std::fmt;

/// Every element the engine understands.
///
/// Parsing rejects any other tag name, so downstream code can match
/// exhaustively instead of switching on strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// The document fragment itself. Serializes to nothing.
    Root,
    P,
    Div,
    /// `h1` to `h6`.
    Heading(u8),
    Ul,
    Ol,
    Li,
    Blockquote,
    Br,
    Span,
    A,
    Em,
    I,
    Strong,
    B,
    U,
    S,
    Strike,
    Del,
    Ins,
    Sub,
    Sup,
    /// Splice placeholder used while merging replaced line ranges.
    Template,
    /// Addressing anchor placed in front of a line while extracting ranges.
    /// Never serialized.
    LineAnchor,
}

impl Tag {
    /// Resolves a tag name from markup, ignoring ASCII case.
    ///
    /// Internal tags (`Root`, `LineAnchor`) cannot be produced from markup.
    pub fn from_name(name: &str) -> Option<Tag> {
        let tag = match name.to_ascii_lowercase().as_str() {
            "p" => Tag::P,
            "div" => Tag::Div,
            "h1" => Tag::Heading(1),
            "h2" => Tag::Heading(2),
            "h3" => Tag::Heading(3),
            "h4" => Tag::Heading(4),
            "h5" => Tag::Heading(5),
            "h6" => Tag::Heading(6),
            "ul" => Tag::Ul,
            "ol" => Tag::Ol,
            "li" => Tag::Li,
            "blockquote" => Tag::Blockquote,
            "br" => Tag::Br,
            "span" => Tag::Span,
            "a" => Tag::A,
            "em" => Tag::Em,
            "i" => Tag::I,
            "strong" => Tag::Strong,
            "b" => Tag::B,
            "u" => Tag::U,
            "s" => Tag::S,
            "strike" => Tag::Strike,
            "del" => Tag::Del,
            "ins" => Tag::Ins,
            "sub" => Tag::Sub,
            "sup" => Tag::Sup,
            "template" => Tag::Template,
            _ => return None,
        };
        Some(tag)
    }

    /// Lowercase element name as written in markup.
    pub fn name(self) -> &'static str {
        match self {
            Tag::Root => "#root",
            Tag::P => "p",
            Tag::Div => "div",
            Tag::Heading(1) => "h1",
            Tag::Heading(2) => "h2",
            Tag::Heading(3) => "h3",
            Tag::Heading(4) => "h4",
            Tag::Heading(5) => "h5",
            Tag::Heading(_) => "h6",
            Tag::Ul => "ul",
            Tag::Ol => "ol",
            Tag::Li => "li",
            Tag::Blockquote => "blockquote",
            Tag::Br => "br",
            Tag::Span => "span",
            Tag::A => "a",
            Tag::Em => "em",
            Tag::I => "i",
            Tag::Strong => "strong",
            Tag::B => "b",
            Tag::U => "u",
            Tag::S => "s",
            Tag::Strike => "strike",
            Tag::Del => "del",
            Tag::Ins => "ins",
            Tag::Sub => "sub",
            Tag::Sup => "sup",
            Tag::Template => "template",
            Tag::LineAnchor => "os-linebreak",
        }
    }

    /// Inline formatting elements. Text inside them continues the current line.
    /// Every other tag, `br` included, ends it.
    pub fn is_inline(self) -> bool {
        matches!(
            self,
            Tag::Span
                | Tag::A
                | Tag::Em
                | Tag::I
                | Tag::Strong
                | Tag::B
                | Tag::U
                | Tag::S
                | Tag::Strike
                | Tag::Del
                | Tag::Ins
                | Tag::Sub
                | Tag::Sup
        )
    }

    /// Elements without content or closing tag.
    pub fn is_void(self) -> bool {
        matches!(self, Tag::Br)
    }

    /// Tags that produce no markup of their own.
    pub fn is_transparent(self) -> bool {
        matches!(self, Tag::Root | Tag::LineAnchor)
    }

    pub fn heading_level(self) -> Option<u8> {
        match self {
            Tag::Heading(level) => Some(level),
            _ => None,
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
