//! Serializing parts of a tree up to or from a traced descendant.
//!
//! ```text
//! <div><p>a ⚓ b</p> c</div>
//!
//! serialize_up_to(div, [p, ⚓])  →  <div><p>a
//! serialize_from(div, [p, ⚓])   →   b</p> c</div>
//! ```
//!
//! Neither half is balanced markup on its own. Callers add the missing
//! closing or opening tags themselves.

use motion_lines_syntax::{Element, Node, Tag, close_tag, escape_text, open_tag};

use crate::markers::{is_line_break_node, is_line_number_node, is_marker};

/// Markup of `node`, leaving out line markers if `strip` is set.
pub fn serialize_full(node: &Node, strip: bool) -> String {
    let mut out = String::new();
    write_full(&mut out, node, strip);
    out
}

fn write_full(out: &mut String, node: &Node, strip: bool) {
    match node {
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::Element(el) => {
            if strip && is_marker(node) {
                return;
            }
            out.push_str(&open_tag(el));
            for child in &el.children {
                write_full(out, child, strip);
            }
            out.push_str(&close_tag(el));
        }
    }
}

/// Never part of a partial serialization.
fn is_skipped(el: &Element) -> bool {
    el.tag == Tag::LineAnchor || is_line_number_node(el) || is_line_break_node(el)
}

/// Opening tag of `el` and everything before the descendant at `trace`. Open
/// elements on the way down are not closed.
pub fn serialize_up_to(el: &Element, trace: &[usize], strip: bool) -> String {
    if is_skipped(el) {
        return String::new();
    }
    let mut out = open_tag(el);
    let Some((&target, rest)) = trace.split_first() else {
        return out;
    };
    for (index, child) in el.children.iter().enumerate() {
        if index == target {
            if let Node::Element(inner) = child {
                out.push_str(&serialize_up_to(inner, rest, strip));
            }
            break;
        }
        write_full(&mut out, child, strip);
    }
    out
}

/// Everything after the descendant at `trace` and the closing tag of `el`.
/// Elements on the way down are not opened.
pub fn serialize_from(el: &Element, trace: &[usize], strip: bool) -> String {
    if is_skipped(el) {
        return String::new();
    }
    let mut out = String::new();
    if let Some((&target, rest)) = trace.split_first() {
        for (index, child) in el.children.iter().enumerate().skip(target) {
            if index == target {
                if let Node::Element(inner) = child {
                    out.push_str(&serialize_from(inner, rest, strip));
                }
            } else {
                write_full(&mut out, child, strip);
            }
        }
    }
    out.push_str(&close_tag(el));
    out
}
