//! Splicing an edited line range back into its document.
//!
//! The document is cut at both ends of the range and each side is parsed on
//! its own, balanced by the context snippets of the extraction bundle. A
//! `<template>` placeholder marks the exact cut inside each side:
//!
//! ```text
//! previous   <p>aaa <template></template></p>
//! inserted   <p class="os-split-before os-split-after">XXX </p>
//! following  <p class="os-split-before os-split-after"><template></template>ccc</p>
//! ```
//!
//! The three node lists are then zipped together at their seams: elements of
//! the same tag meeting at a seam are fused into one, recursively, until a
//! placeholder is reached.

use log::debug;
use motion_lines_syntax::{Element, Node, Tag, parse};

use crate::error::Result;
use crate::markers::{SPLIT_AFTER_CLASS, SPLIT_BEFORE_CLASS, is_marker};
use crate::range::extract::extract_range;

const PLACEHOLDER: &str = "<template></template>";

/// Replaces lines `[from, to)` of numbered `markup` with `replacement` and
/// returns canonical markup without any line markers.
pub fn replace_lines(markup: &str, replacement: &str, from: u32, to: u32) -> Result<String> {
    let bundle = extract_range(markup, from, to)?;

    let previous = parse(&format!(
        "{}{PLACEHOLDER}{}",
        bundle.previous_html, bundle.previous_html_end_snippet
    ))?;
    let following = parse(&format!(
        "{}{PLACEHOLDER}{}",
        bundle.following_html_start_snippet, bundle.following_html
    ))?;
    let mut inserted = parse(replacement)?;

    // Editors tend to drop trailing spaces, which would glue the last inserted
    // word to the first word after the range.
    if bundle.html.ends_with(' ') {
        insert_dangling_space(&mut inserted.children);
    }

    let merged = merge_node_arrays(previous.children, inserted.children);
    let merged = merge_node_arrays(merged, following.children);
    debug!("Replaced lines {from}..{to}");

    Ok(Element::root(clean_up(merged)).inner_html())
}

/// Joins two node lists, fusing the last node of `first` with the first node
/// of `second` where they match.
pub fn merge_node_arrays(first: Vec<Node>, second: Vec<Node>) -> Vec<Node> {
    if first.is_empty() {
        return second;
    }
    if second.is_empty() {
        return first;
    }

    let mut out = first;
    let mut rest = second.into_iter();
    let (Some(last), Some(head)) = (out.pop(), rest.next()) else {
        return out;
    };

    match (last, head) {
        (Node::Text(mut left), Node::Text(right)) => {
            left.push_str(&right);
            out.push(Node::Text(left));
        }
        (Node::Element(left), Node::Element(right)) if left.tag == right.tag => {
            let is_list = matches!(left.tag, Tag::Ul | Tag::Ol);
            let (left_children, right_children) = if is_list {
                (only_elements(left.children), only_elements(right.children))
            } else {
                (left.children, right.children)
            };
            let fused = Element {
                tag: left.tag,
                attrs: left.attrs,
                children: merge_node_arrays(left_children, right_children),
            };
            out.push(fused.into());
        }
        (left, right) => {
            if left.tag() != Some(Tag::Template) {
                out.push(left);
            }
            if right.tag() != Some(Tag::Template) {
                out.push(right);
            }
        }
    }

    out.extend(rest);
    out
}

fn only_elements(nodes: Vec<Node>) -> Vec<Node> {
    nodes
        .into_iter()
        .filter(|node| matches!(node, Node::Element(_)))
        .collect()
}

/// Makes sure the last text of `children` ends with a space. Trailing
/// whitespace between blocks is skipped.
fn insert_dangling_space(children: &mut [Node]) {
    let Some((last, before)) = children.split_last_mut() else {
        return;
    };
    match last {
        Node::Text(text) if text.ends_with(' ') => {}
        Node::Text(text) if text.trim().is_empty() && !before.is_empty() => {
            insert_dangling_space(before)
        }
        Node::Text(text) => text.push(' '),
        Node::Element(el) => insert_dangling_space(&mut el.children),
    }
}

/// Drops placeholders, markers and split classes left over from the merge.
fn clean_up(nodes: Vec<Node>) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node {
            node if is_marker(&node) => {}
            Node::Element(el) if el.tag == Tag::Template => {}
            Node::Element(mut el) => {
                el.remove_class(SPLIT_BEFORE_CLASS);
                el.remove_class(SPLIT_AFTER_CLASS);
                el.children = clean_up(std::mem::take(&mut el.children));
                out.push(el.into());
            }
            Node::Text(text) => match out.last_mut() {
                Some(Node::Text(prev)) => prev.push_str(&text),
                _ => out.push(Node::Text(text)),
            },
        }
    }
    out
}
