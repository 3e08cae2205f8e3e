//! Addressing lines inside a numbered tree.
//!
//! Nodes are addressed by [`NodePath`]: the child indices leading from the
//! root to the node. Paths stay valid as long as the tree they were taken from
//! is not restructured, which holds for the views built here (they only gain
//! attributes after the anchors are in place).
//!
//! A line-number marker sits wherever its first text ended up, possibly deep
//! inside inline formatting. For range operations each line gets a
//! [`Tag::LineAnchor`] instead, inserted in front of the outermost element that
//! the line starts:
//!
//! ```text
//! <ul><li>[1]One ⏎[2]two</li></ul>   →   ⚓1<ul><li>[1]One ⏎⚓2[2]two</li></ul>⚓3
//! ```
//!
//! One extra anchor after the last line lets ranges reach the end of the
//! document.

use log::trace;
use motion_lines_syntax::{Element, Node, Tag};

use crate::markers::{is_line_number_node, line_anchor, line_number_of};

pub type NodePath = Vec<usize>;

/// The nearest common ancestor of two nodes and the ways down to them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AncestorTrace {
    pub ancestor: NodePath,
    /// Path from the ancestor to the first node, ancestor excluded.
    pub trace_from: NodePath,
    /// Path from the ancestor to the second node, ancestor excluded.
    pub trace_to: NodePath,
}

/// Longest common prefix of two paths and the diverging suffixes.
pub fn common_ancestor(a: &[usize], b: &[usize]) -> AncestorTrace {
    let shared = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    AncestorTrace {
        ancestor: a[..shared].to_vec(),
        trace_from: a[shared..].to_vec(),
        trace_to: b[shared..].to_vec(),
    }
}

/// The element at `path` below `root`.
pub fn element_at<'a>(root: &'a Element, path: &[usize]) -> Option<&'a Element> {
    path.iter().try_fold(root, |el, &index| el.children.get(index)?.as_element())
}

pub fn element_at_mut<'a>(root: &'a mut Element, path: &[usize]) -> Option<&'a mut Element> {
    path.iter()
        .try_fold(root, |el, &index| el.children.get_mut(index)?.as_element_mut())
}

/// Depth-first search for the first element matching `pred`.
pub fn find_path(root: &Element, pred: &impl Fn(&Element) -> bool) -> Option<NodePath> {
    for (index, child) in root.children.iter().enumerate() {
        let Node::Element(el) = child else {
            continue;
        };
        if pred(el) {
            return Some(vec![index]);
        }
        if let Some(mut rest) = find_path(el, pred) {
            rest.insert(0, index);
            return Some(rest);
        }
    }
    None
}

/// Path of the line-number marker opening `line` in a numbered tree.
pub fn find_marker(root: &Element, line: u32) -> Option<NodePath> {
    find_path(root, &|el| is_line_number_node(el) && line_number_of(el) == Some(line))
}

/// A numbered tree with a line anchor in front of every line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineView {
    pub root: Element,
    /// Number of the anchor closing the last line.
    pub end_line: u32,
}

impl LineView {
    pub fn build(numbered: &Element) -> LineView {
        let mut last_line = 0;
        let (mut root, _) = anchor_element(numbered, true, &mut last_line);
        let end_line = last_line + 1;
        root.children.push(line_anchor(end_line).into());
        trace!("Built line view with {} anchored lines", end_line);
        LineView { root, end_line }
    }

    /// Path of the anchor of `line`.
    pub fn find_anchor(&self, line: u32) -> Option<NodePath> {
        find_path(&self.root, &|el| {
            el.tag == Tag::LineAnchor && line_number_of(el) == Some(line)
        })
    }

    pub fn element(&self, path: &[usize]) -> Option<&Element> {
        element_at(&self.root, path)
    }
}

/// Copies `el`, placing an anchor before every line-number marker. An anchor
/// whose element is the first non-empty child of `el` is handed back to the
/// caller instead, to be placed in front of `el` itself.
fn anchor_element(el: &Element, is_root: bool, last_line: &mut u32) -> (Element, Option<Element>) {
    let mut out = el.shallow_clone();
    let mut leading = None;

    for (index, child) in el.children.iter().enumerate() {
        let (node, anchor) = match child {
            Node::Element(marker) if is_line_number_node(marker) => {
                let anchor = line_number_of(marker).map(|line| {
                    *last_line = line;
                    line_anchor(line)
                });
                (child.clone(), anchor)
            }
            Node::Element(inner) => {
                let (copy, anchor) = anchor_element(inner, false, last_line);
                (copy.into(), anchor)
            }
            Node::Text(_) => (child.clone(), None),
        };

        if let Some(anchor) = anchor {
            if !is_root && el.is_first_nonempty_child(index) {
                leading = Some(anchor);
            } else {
                out.children.push(anchor.into());
            }
        }
        out.children.push(node);
    }

    (out, leading)
}
