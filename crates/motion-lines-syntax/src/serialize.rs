//! Canonical markup output.
//!
//! Tags are lowercase, attributes keep their order and are always double
//! quoted, text escapes `&`, `<`, `>` and writes no-break spaces as `&nbsp;`.
//! Markup already in this form survives `parse` + `to_html` byte for byte.

use crate::node::{Element, Node};

pub fn escape_text(text: &str) -> String {
    html_escape::encode_text(text).replace('\u{a0}', "&nbsp;")
}

pub fn escape_attr(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

/// The opening tag of `el`, empty for tags that produce no markup.
pub fn open_tag(el: &Element) -> String {
    if el.tag.is_transparent() {
        return String::new();
    }
    let mut out = String::with_capacity(16);
    out.push('<');
    out.push_str(el.tag.name());
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
    out.push('>');
    out
}

/// The closing tag of `el`, empty for void and transparent tags.
pub fn close_tag(el: &Element) -> String {
    if el.tag.is_transparent() || el.tag.is_void() {
        return String::new();
    }
    format!("</{}>", el.tag.name())
}

pub fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::Element(el) => write_element(out, el),
    }
}

pub fn write_element(out: &mut String, el: &Element) {
    if el.tag == crate::Tag::LineAnchor {
        return;
    }
    out.push_str(&open_tag(el));
    for child in &el.children {
        write_node(out, child);
    }
    out.push_str(&close_tag(el));
}

/// Serializes a sequence of sibling nodes.
pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

impl Element {
    /// Markup of this element including its own tags.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(&mut out, self);
        out
    }

    /// Markup of the children only.
    pub fn inner_html(&self) -> String {
        to_html(&self.children)
    }
}
