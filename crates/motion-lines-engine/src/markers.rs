//! Line markers inside numbered markup.
//!
//! A numbered view carries two kinds of synthetic elements:
//!
//! ```text
//! <span class="os-line-number line-number-7" data-line-number="7" contenteditable="false">&nbsp;</span>
//! <br class="os-line-break">
//! ```
//!
//! The span opens line 7. A soft break is always followed by the span of the
//! line it opens (unless numbering is disabled). Neither ever appears in
//! canonical text.

use motion_lines_syntax::{Element, Node, Tag};

pub const LINE_NUMBER_CLASS: &str = "os-line-number";
pub const LINE_BREAK_CLASS: &str = "os-line-break";
pub const SPLIT_BEFORE_CLASS: &str = "os-split-before";
pub const SPLIT_AFTER_CLASS: &str = "os-split-after";
pub const HIGHLIGHT_CLASS: &str = "highlight";
/// Marks inserted text in a diff, next to `<ins>`.
pub const INSERT_CLASS: &str = "insert";
/// Marks deleted text in a diff, next to `<del>`.
pub const DELETE_CLASS: &str = "delete";

const LINE_NUMBER_ATTR: &str = "data-line-number";

/// The marker opening line `number`.
pub fn line_number_marker(number: u32) -> Element {
    Element::new(Tag::Span)
        .with_attr("class", format!("{LINE_NUMBER_CLASS} line-number-{number}"))
        .with_attr(LINE_NUMBER_ATTR, number.to_string())
        .with_attr("contenteditable", "false")
        .with_children(vec![Node::text("\u{a0}")])
}

/// A soft line break inserted by the line breaker.
pub fn line_break() -> Element {
    Element::new(Tag::Br).with_attr("class", LINE_BREAK_CLASS)
}

/// Zero-width anchor used to address line `number` inside the extraction view.
pub fn line_anchor(number: u32) -> Element {
    Element::new(Tag::LineAnchor).with_attr(LINE_NUMBER_ATTR, number.to_string())
}

pub fn is_line_number_node(el: &Element) -> bool {
    el.tag == Tag::Span && el.has_class(LINE_NUMBER_CLASS)
}

pub fn is_line_break_node(el: &Element) -> bool {
    el.tag == Tag::Br && el.has_class(LINE_BREAK_CLASS)
}

/// True for either kind of marker.
pub fn is_marker(node: &Node) -> bool {
    node.as_element()
        .is_some_and(|el| is_line_number_node(el) || is_line_break_node(el))
}

/// Text added by a diff.
pub fn is_insertion(el: &Element) -> bool {
    el.tag == Tag::Ins || el.has_class(INSERT_CLASS)
}

/// Text removed by a diff.
pub fn is_deletion(el: &Element) -> bool {
    el.tag == Tag::Del || el.has_class(DELETE_CLASS)
}

/// The line opened by a line-number marker or a line anchor.
pub fn line_number_of(el: &Element) -> Option<u32> {
    if !is_line_number_node(el) && el.tag != Tag::LineAnchor {
        return None;
    }
    el.attr(LINE_NUMBER_ATTR)?.trim().parse().ok()
}

/// Copy of `children` without any markers. Text split by a removed marker is
/// joined again. A newline right after a removed marker was put there by an
/// editor and becomes a space.
pub fn strip_markers(children: &[Node]) -> Vec<Node> {
    let mut out: Vec<Node> = Vec::with_capacity(children.len());
    let mut after_marker = false;
    for child in children {
        let follows_marker = std::mem::replace(&mut after_marker, false);
        match child {
            _ if is_marker(child) => after_marker = true,
            Node::Text(text) => {
                let text = match text.strip_prefix('\n') {
                    Some(rest) if follows_marker => format!(" {rest}"),
                    _ => text.clone(),
                };
                match out.last_mut() {
                    Some(Node::Text(prev)) => prev.push_str(&text),
                    _ => out.push(Node::Text(text)),
                }
            }
            Node::Element(el) => {
                let mut copy = el.shallow_clone();
                copy.children = strip_markers(&el.children);
                out.push(copy.into());
            }
        }
    }
    out
}

/// Visits every line-number marker in document order.
pub fn for_each_line_number<'a>(node: &'a Node, visit: &mut impl FnMut(&'a Element, u32)) {
    let Node::Element(el) = node else {
        return;
    };
    if let Some(number) = line_number_of(el).filter(|_| is_line_number_node(el)) {
        visit(el, number);
        return;
    }
    for child in &el.children {
        for_each_line_number(child, visit);
    }
}

/// Text of `el` as a reader sees it, without the content of markers.
pub fn visible_text(el: &Element) -> String {
    strip_markers(&el.children)
        .iter()
        .map(Node::text_content)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use motion_lines_syntax::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn marker_markup() {
        assert_eq!(
            line_number_marker(7).to_html(),
            r#"<span class="os-line-number line-number-7" data-line-number="7" contenteditable="false">&nbsp;</span>"#
        );
        assert_eq!(line_break().to_html(), r#"<br class="os-line-break">"#);
    }

    #[test]
    fn recognizes_parsed_markers() {
        let root = parse(concat!(
            r#"<span class="os-line-number line-number-3" data-line-number="3" contenteditable="false">&nbsp;</span>"#,
            r#"<br class="os-line-break"><br><span class="x">y</span>"#
        ))
        .unwrap();
        let els: Vec<&Element> = root.children.iter().filter_map(Node::as_element).collect();

        assert!(is_line_number_node(els[0]));
        assert_eq!(line_number_of(els[0]), Some(3));
        assert!(is_line_break_node(els[1]));
        assert!(!is_line_break_node(els[2]));
        assert!(!is_line_number_node(els[3]));
        assert_eq!(line_number_of(els[3]), None);
    }

    #[test]
    fn recognizes_diff_changes() {
        assert!(is_insertion(&Element::new(Tag::Ins)));
        assert!(is_insertion(&Element::new(Tag::P).with_attr("class", "insert")));
        assert!(is_deletion(&Element::new(Tag::Del)));
        assert!(is_deletion(&Element::new(Tag::Span).with_attr("class", "x delete")));
        assert!(!is_deletion(&Element::new(Tag::Ins)));
        assert!(!is_insertion(&Element::new(Tag::Span).with_attr("class", "inserted")));
    }

    #[test]
    fn anchors_carry_their_line() {
        assert_eq!(line_number_of(&line_anchor(12)), Some(12));
    }

    #[test]
    fn stripping_joins_split_text() {
        let children = vec![
            Element::new(Tag::P)
                .with_children(vec![
                    line_number_marker(1).into(),
                    Node::text("Lorem "),
                    line_break().into(),
                    line_number_marker(2).into(),
                    Node::text("ipsum"),
                ])
                .into(),
        ];
        let stripped = strip_markers(&children);
        assert_eq!(
            stripped,
            vec![
                Element::new(Tag::P)
                    .with_children(vec![Node::text("Lorem ipsum")])
                    .into()
            ]
        );
    }

    #[test]
    fn newline_after_a_stripped_marker_becomes_a_space() {
        let children = vec![
            Node::text("a"),
            line_break().into(),
            line_number_marker(2).into(),
            Node::text("\nb"),
            Node::text("\nc"),
        ];
        assert_eq!(strip_markers(&children), vec![Node::text("a b\nc")]);
    }

    #[test]
    fn visible_text_skips_markers() {
        let el = Element::new(Tag::Heading(1)).with_children(vec![
            line_number_marker(1).into(),
            Node::text("Title"),
        ]);
        assert_eq!(visible_text(&el), "Title");
    }
}
