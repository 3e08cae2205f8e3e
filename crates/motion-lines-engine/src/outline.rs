//! Views over numbered markup: which lines it spans, where its sections
//! start, how it splits into editable paragraphs, how a single line is
//! highlighted and how inline formatting is cut at line starts.

use motion_lines_syntax::{Element, Node, Tag, parse};
use serde::Serialize;

use crate::error::Result;
use crate::markers::{
    HIGHLIGHT_CLASS, for_each_line_number, is_line_break_node, is_line_number_node, line_number_of, visible_text,
};

/// Lines `[from, to)` covered by a numbered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LineNumberRange {
    pub from: u32,
    pub to: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionHeading {
    pub line_number: u32,
    pub level: u8,
    pub text: String,
}

/// Smallest line number and one past the largest. `None` for unnumbered markup.
pub fn line_number_range(markup: &str) -> Result<Option<LineNumberRange>> {
    let root = parse(markup)?;
    Ok(lines_of(root))
}

pub(crate) fn lines_of(root: Element) -> Option<LineNumberRange> {
    let mut range: Option<LineNumberRange> = None;
    for_each_line_number(&Node::Element(root), &mut |_, number| {
        range = Some(match range {
            None => LineNumberRange { from: number, to: number + 1 },
            Some(r) => LineNumberRange {
                from: r.from.min(number),
                to: r.to.max(number + 1),
            },
        });
    });
    range
}

/// Every numbered heading with the line it starts on, in line order.
pub fn headings_with_line_numbers(markup: &str) -> Result<Vec<SectionHeading>> {
    let root = parse(markup)?;
    let mut headings = Vec::new();
    collect_headings(&root, &mut headings);
    headings.sort_by_key(|heading| heading.line_number);
    Ok(headings)
}

fn collect_headings(el: &Element, out: &mut Vec<SectionHeading>) {
    for child in &el.children {
        let Node::Element(inner) = child else {
            continue;
        };
        let Some(level) = inner.tag.heading_level() else {
            collect_headings(inner, out);
            continue;
        };
        let mut first_line = None;
        for_each_line_number(child, &mut |_, number| {
            first_line.get_or_insert(number);
        });
        if let Some(line_number) = first_line {
            out.push(SectionHeading {
                line_number,
                level,
                text: visible_text(inner).trim().to_string(),
            });
        }
    }
}

/// Splits a document into editable paragraphs. Every top-level block is one
/// paragraph, except lists: each of their items becomes a list of its own.
/// Ordered lists keep the number of the item they hold. Top-level text is
/// dropped.
pub fn split_to_paragraphs(markup: &str) -> Result<Vec<String>> {
    let root = parse(markup)?;
    let mut paragraphs = Vec::new();

    for child in &root.children {
        let Node::Element(el) = child else {
            continue;
        };
        if !matches!(el.tag, Tag::Ul | Tag::Ol) {
            paragraphs.push(el.to_html());
            continue;
        }

        let mut start = el
            .attr("start")
            .and_then(|start| start.trim().parse::<i64>().ok())
            .unwrap_or(1);
        for item in el.children.iter().filter(|item| item.as_element().is_some()) {
            let mut list = el.shallow_clone();
            if el.tag == Tag::Ol {
                list.set_attr("start", start.to_string());
            }
            list.children.push(item.clone());
            paragraphs.push(list.to_html());
            start += 1;
        }
    }

    Ok(paragraphs)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Highlight {
    Before,
    Inside,
    After,
}

/// Wraps every text of `line` in `<span class="highlight">`. Markup without
/// that line comes back unchanged.
pub fn highlight_line(markup: &str, line: u32) -> Result<String> {
    let mut root = parse(markup)?;
    let mut state = Highlight::Before;
    root.children = highlight_children(std::mem::take(&mut root.children), line, &mut state);
    if state == Highlight::Before {
        return Ok(markup.to_string());
    }
    Ok(root.inner_html())
}

fn highlight_children(children: Vec<Node>, line: u32, state: &mut Highlight) -> Vec<Node> {
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        let node = match child {
            Node::Element(el) if is_line_number_node(&el) => {
                match *state {
                    Highlight::Before if line_number_of(&el) == Some(line) => *state = Highlight::Inside,
                    Highlight::Inside => *state = Highlight::After,
                    _ => {}
                }
                el.into()
            }
            Node::Element(mut el) => {
                el.children = highlight_children(std::mem::take(&mut el.children), line, state);
                el.into()
            }
            Node::Text(text) if *state == Highlight::Inside => Element::new(Tag::Span)
                .with_attr("class", HIGHLIGHT_CLASS)
                .with_children(vec![Node::Text(text)])
                .into(),
            text => text,
        };
        out.push(node);
    }
    out
}

/// Cuts inline elements at every line start inside them, so that each line
/// marker sits between inline elements instead of inside one:
///
/// ```text
/// <p><span>aaa ⏎[2]bbb</span></p>   becomes   <p><span>aaa </span>⏎[2]<span>bbb</span></p>
/// ```
///
/// Nested inline elements are cut all the way up to the enclosing block.
pub fn split_inline_elements_at_line_breaks(markup: &str) -> Result<String> {
    let mut root = parse(markup)?;
    root.children = split_children(std::mem::take(&mut root.children));
    Ok(root.inner_html())
}

fn split_children(children: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Node::Element(mut el) if !is_line_number_node(&el) => {
                el.children = split_children(std::mem::take(&mut el.children));
                if el.tag.is_inline() {
                    out.extend(split_at_line_numbers(el));
                } else {
                    out.push(el.into());
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Pieces of inline `el` around its direct line-number markers. A soft break
/// right before a marker moves out with it.
fn split_at_line_numbers(el: Element) -> Vec<Node> {
    let opens_line = |node: &Node| node.as_element().is_some_and(is_line_number_node);
    if !el.children.iter().any(opens_line) {
        return vec![el.into()];
    }

    let mut pieces = Vec::new();
    let mut part: Vec<Node> = Vec::new();
    let wrapper = el.shallow_clone();
    for child in el.children {
        if !opens_line(&child) {
            part.push(child);
            continue;
        }
        let soft_break = part
            .last()
            .and_then(Node::as_element)
            .is_some_and(is_line_break_node)
            .then(|| part.pop())
            .flatten();
        if !part.is_empty() {
            pieces.push(wrapper.shallow_clone().with_children(std::mem::take(&mut part)).into());
        }
        pieces.extend(soft_break);
        pieces.push(child);
    }
    pieces.push(wrapper.with_children(part).into());
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::{is_marker, line_break, line_number_marker};
    use crate::numbering::insert_line_numbers;
    use pretty_assertions::assert_eq;

    #[test]
    fn range_of_numbered_text() {
        let numbered = insert_line_numbers("<p>aaa bbb ccc</p><p>ddd</p>", 5).unwrap();
        assert_eq!(
            line_number_range(&numbered).unwrap(),
            Some(LineNumberRange { from: 1, to: 5 })
        );
    }

    #[test]
    fn range_of_unnumbered_text() {
        assert_eq!(line_number_range("<p>plain</p>").unwrap(), None);
    }

    #[test]
    fn headings_are_listed_in_line_order() {
        let numbered = insert_line_numbers(
            "<h1>Title</h1><p>Intro text</p><div><h3>Nested <em>part</em></h3></div><p>x</p>",
            80,
        )
        .unwrap();
        assert_eq!(
            headings_with_line_numbers(&numbered).unwrap(),
            vec![
                SectionHeading {
                    line_number: 1,
                    level: 1,
                    text: "Title".to_string(),
                },
                SectionHeading {
                    line_number: 3,
                    level: 3,
                    text: "Nested part".to_string(),
                },
            ]
        );
    }

    #[test]
    fn unnumbered_headings_are_skipped() {
        assert!(headings_with_line_numbers("<h2>Loose</h2>").unwrap().is_empty());
    }

    #[test]
    fn list_items_become_paragraphs() {
        let paragraphs = split_to_paragraphs(concat!(
            "<p>Intro</p>\n",
            "<ol start=\"3\"><li>three</li>\n<li>four</li></ol>",
            "<ul><li>a<ul><li>nested</li></ul></li></ul>",
        ))
        .unwrap();
        assert_eq!(
            paragraphs,
            vec![
                "<p>Intro</p>",
                r#"<ol start="3"><li>three</li></ol>"#,
                r#"<ol start="4"><li>four</li></ol>"#,
                "<ul><li>a<ul><li>nested</li></ul></li></ul>",
            ]
        );
    }

    #[test]
    fn ordered_lists_without_start_count_from_one() {
        let paragraphs = split_to_paragraphs("<ol><li>a</li><li>b</li></ol>").unwrap();
        assert_eq!(
            paragraphs,
            vec![r#"<ol start="1"><li>a</li></ol>"#, r#"<ol start="2"><li>b</li></ol>"#]
        );
    }

    #[test]
    fn highlights_one_line_across_elements() {
        let numbered = insert_line_numbers("<p>Lorem <strong>ipsum dolor</strong> sit</p>", 12).unwrap();
        let highlighted = highlight_line(&numbered, 1).unwrap();
        let stripped = crate::numbering::strip_line_numbers(&highlighted).unwrap();
        insta::assert_snapshot!(
            stripped,
            @r#"<p><span class="highlight">Lorem </span><strong><span class="highlight">ipsum </span>dolor</strong> sit</p>"#
        );
    }

    #[test]
    fn inline_elements_are_cut_at_line_starts() {
        let numbered = insert_line_numbers("<p>Lorem <strong>ipsum dolor</strong> sit</p>", 12).unwrap();
        let split = split_inline_elements_at_line_breaks(&numbered).unwrap();
        assert_eq!(
            split,
            format!(
                "<p>{}Lorem <strong>ipsum </strong>{}{}<strong>dolor</strong> sit</p>",
                line_number_marker(1).to_html(),
                line_break().to_html(),
                line_number_marker(2).to_html()
            )
        );
    }

    #[test]
    fn nested_inline_elements_are_cut_up_to_the_block() {
        let numbered = insert_line_numbers("<p>aa <em><strong>bb cc</strong></em></p>", 5).unwrap();
        let split = split_inline_elements_at_line_breaks(&numbered).unwrap();
        let stripped = crate::numbering::strip_line_numbers(&split).unwrap();
        assert_eq!(
            stripped,
            "<p>aa <em><strong>bb </strong></em><em><strong>cc</strong></em></p>"
        );
        let p = parse(&split).unwrap().children.remove(0);
        let top_level_markers = p
            .as_element()
            .map(|p| p.children.iter().filter(|child| is_marker(child)).count());
        assert_eq!(top_level_markers, Some(3));
    }

    #[test]
    fn blocks_are_not_cut() {
        let numbered = insert_line_numbers("<ul><li>aaa bbb</li></ul><p>c</p>", 80).unwrap();
        assert_eq!(split_inline_elements_at_line_breaks(&numbered).unwrap(), numbered);
    }

    #[test]
    fn marker_opening_an_inline_element_moves_in_front_of_it() {
        let numbered = insert_line_numbers("<p><em>aaa</em></p>", 80).unwrap();
        assert_eq!(
            split_inline_elements_at_line_breaks(&numbered).unwrap(),
            format!("<p>{}<em>aaa</em></p>", line_number_marker(1).to_html())
        );
    }

    #[test]
    fn missing_line_leaves_markup_alone() {
        let numbered = insert_line_numbers("<p>one</p>", 80).unwrap();
        assert_eq!(highlight_line(&numbered, 9).unwrap(), numbered);
    }
}
