//! # Line numbering
//!
//! Walks a tree depth first and feeds every text node through the
//! [line breaker](crate::layout::breaker), threading one [`LineCursor`] through
//! the whole document. The result is a new tree with line markers spliced in
//! place of the text nodes they split:
//!
//! ```text
//! <p>Lorem ipsum dolorsit amet</p>          (line length 5)
//!
//! <p>[1]Lorem ⏎[2]ipsum ⏎[3]dolor⏎[4]sit ⏎[5]amet</p>
//! ```
//!
//! Rules:
//! - Entering or leaving a non-inline element (blocks and `br`) ends the
//!   current line. The marker of the next line goes in front of the next text,
//!   inside whatever element holds that text, so empty blocks never get one.
//! - Every element derives a budget from its enclosing one (see
//!   [`IndentPolicy`]) for the duration of its content.
//! - Whitespace-only text between block siblings is layout noise. It is kept
//!   verbatim and never numbered.
//! - Inserted text of a diff (`<ins>` and `.insert` elements) is copied through
//!   as it is: it takes no room on the line and is never broken. An inserted
//!   inline element at the start of a line receives that line's marker.
//!   [`NumberingOptions::counting_inserted`] turns this off.
//! - Markers already present in the input are dropped first, so numbering
//!   numbered markup again gives the same result. Newlines directly after a
//!   `br` are dropped too.

use log::debug;
use motion_lines_syntax::{Element, Node, Tag, parse};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{ContainerKind, Fragment, IndentPolicy, LineCursor, break_text};
use crate::markers::{self, is_insertion, line_break, line_number_marker};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberingOptions {
    /// Characters per line at the top level of the document.
    pub line_length: usize,
    pub first_line: u32,
    pub indent: IndentPolicy,
    /// Write line-number markers. Without them only soft breaks are inserted.
    pub numbered: bool,
    /// Lay out inserted diff text like any other text.
    pub count_inserted: bool,
}

impl Default for NumberingOptions {
    fn default() -> Self {
        Self {
            line_length: 80,
            first_line: 1,
            indent: IndentPolicy::default(),
            numbered: true,
            count_inserted: false,
        }
    }
}

impl NumberingOptions {
    pub fn new(line_length: usize) -> Self {
        Self {
            line_length,
            ..Self::default()
        }
    }

    pub fn with_first_line(mut self, first_line: u32) -> Self {
        self.first_line = first_line;
        self
    }

    pub fn with_indent(mut self, indent: IndentPolicy) -> Self {
        self.indent = indent;
        self
    }

    /// Soft breaks only, no line numbers.
    pub fn breaks_only(mut self) -> Self {
        self.numbered = false;
        self
    }

    pub fn counting_inserted(mut self) -> Self {
        self.count_inserted = true;
        self
    }
}

/// Numbers `markup` with the default indentation policy.
pub fn insert_line_numbers(markup: &str, line_length: usize) -> Result<String> {
    insert_line_numbers_with(markup, &NumberingOptions::new(line_length))
}

pub fn insert_line_numbers_with(markup: &str, options: &NumberingOptions) -> Result<String> {
    let root = parse(markup)?;
    Ok(number_tree(&root, options).inner_html())
}

/// Wraps `markup` to `line_length` with soft breaks but no line numbers.
pub fn insert_line_breaks(markup: &str, line_length: usize) -> Result<String> {
    insert_line_numbers_with(markup, &NumberingOptions::new(line_length).breaks_only())
}

/// Removes all line markers, giving back canonical markup.
pub fn strip_line_numbers(markup: &str) -> Result<String> {
    let root = parse(markup)?;
    Ok(Element::root(markers::strip_markers(&root.children)).inner_html())
}

/// Builds the numbered view of `root`.
pub fn number_tree(root: &Element, options: &NumberingOptions) -> Element {
    let mut canonical = markers::strip_markers(&root.children);
    drop_newlines_after_br(&mut canonical);
    let walker = Walker { options };
    let cursor = LineCursor::new(options.first_line, options.line_length);
    let (children, cursor) = walker.walk_children(&canonical, cursor);
    debug!(
        "Numbered lines {}..{} at line length {}",
        options.first_line, cursor.line_number, options.line_length
    );
    root.shallow_clone().with_children(children)
}

struct Walker<'a> {
    options: &'a NumberingOptions,
}

impl Walker<'_> {
    fn walk_children(&self, children: &[Node], mut cursor: LineCursor) -> (Vec<Node>, LineCursor) {
        let mut out = Vec::with_capacity(children.len());
        for (index, child) in children.iter().enumerate() {
            match child {
                Node::Text(_) if separates_blocks(children, index) => out.push(child.clone()),
                Node::Text(text) => {
                    let budget = cursor.budget();
                    let (fragments, next) = break_text(text, cursor, budget);
                    cursor = next;
                    self.emit(&mut out, fragments);
                }
                Node::Element(el) => {
                    let (numbered, next) = self.walk_element(el, cursor);
                    cursor = next;
                    out.push(numbered.into());
                }
            }
        }
        (out, cursor)
    }

    fn walk_element(&self, el: &Element, mut cursor: LineCursor) -> (Element, LineCursor) {
        if self.skips(el) {
            let mut copy = el.clone();
            if self.options.numbered
                && el.tag.is_inline()
                && let Some(number) = cursor.open_pending_line()
            {
                copy.children.insert(0, line_number_marker(number).into());
            }
            return (copy, cursor);
        }

        let ends_line = !el.tag.is_inline();
        let budget = self
            .options
            .indent
            .budget_for(cursor.budget(), ContainerKind::of(el));

        if ends_line {
            cursor.end_line();
        }
        cursor.push_budget(budget);
        let (children, mut cursor) = self.walk_children(&el.children, cursor);
        cursor.pop_budget();
        if ends_line {
            cursor.end_line();
        }

        (el.shallow_clone().with_children(children), cursor)
    }

    /// Inserted diff text, left out of the layout.
    fn skips(&self, el: &Element) -> bool {
        !self.options.count_inserted && is_insertion(el)
    }

    fn emit(&self, out: &mut Vec<Node>, fragments: Vec<Fragment>) {
        for fragment in fragments {
            match fragment {
                Fragment::Text(text) => out.push(Node::Text(text)),
                Fragment::LineStart(number) => {
                    if self.options.numbered {
                        out.push(line_number_marker(number).into());
                    }
                }
                Fragment::Break(number) => {
                    out.push(line_break().into());
                    if self.options.numbered {
                        out.push(line_number_marker(number).into());
                    }
                }
            }
        }
    }
}

/// Removes line feeds that directly follow a `br`. Editors put them there and
/// they would otherwise open an empty-looking line.
fn drop_newlines_after_br(children: &mut Vec<Node>) {
    let mut after_br = false;
    children.retain_mut(|child| {
        let follows_br = std::mem::replace(&mut after_br, child.tag() == Some(Tag::Br));
        match child {
            Node::Text(text) if follows_br => {
                let cut = text.len() - text.trim_start_matches(['\n', '\r']).len();
                text.drain(..cut);
                !text.is_empty()
            }
            Node::Element(el) => {
                drop_newlines_after_br(&mut el.children);
                true
            }
            Node::Text(_) => true,
        }
    });
}

fn ends_line_sibling(node: Option<&Node>) -> bool {
    node.and_then(Node::tag).is_some_and(|tag| !tag.is_inline())
}

/// Whitespace-only text between two blocks, or before the first / after the
/// last block of its parent.
fn separates_blocks(children: &[Node], index: usize) -> bool {
    if !children[index].is_blank_text() {
        return false;
    }
    let prev_ends_line = index > 0 && ends_line_sibling(children.get(index - 1));
    let next_ends_line = ends_line_sibling(children.get(index + 1));
    let is_last = index + 1 == children.len();
    (prev_ends_line && next_ends_line) || (index == 0 && next_ends_line) || (is_last && prev_ends_line)
}
