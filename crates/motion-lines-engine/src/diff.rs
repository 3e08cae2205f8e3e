//! Reading diff markup: text wrapped in `<ins>`/`<del>` or carrying the
//! `insert`/`delete` classes, laid over a numbered text.
//!
//! Computing such a diff is not done here; these helpers only read one.

use log::debug;
use motion_lines_syntax::{Element, Node, Tag, parse};

use crate::error::Result;
use crate::markers::{INSERT_CLASS, is_deletion, is_insertion, line_number_of};
use crate::outline::{LineNumberRange, lines_of};
use crate::range::LineView;

/// The text after accepting every change: deletions go away with their
/// content, `<ins>` wrappers are unwrapped and `insert` classes dropped.
pub fn diff_html_to_final_text(markup: &str) -> Result<String> {
    let root = parse(markup)?;
    Ok(Element::root(accept_changes(root.children)).inner_html())
}

fn accept_changes(children: Vec<Node>) -> Vec<Node> {
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Node::Element(el) if is_deletion(&el) => {}
            Node::Element(el) if el.tag == Tag::Ins => out.extend(accept_changes(el.children)),
            Node::Element(mut el) => {
                el.remove_class(INSERT_CLASS);
                el.children = accept_changes(std::mem::take(&mut el.children));
                out.push(el.into());
            }
            text => out.push(text),
        }
    }
    out
}

/// Lines `[from, to)` touched by the changes of a numbered diff: from the
/// last line starting before the first change up to the first line starting
/// after the last one. `None` without changes or without line numbers.
pub fn detect_affected_line_range(markup: &str) -> Result<Option<LineNumberRange>> {
    let root = parse(markup)?;
    let view = LineView::build(&root);
    let Some(lines) = lines_of(root) else {
        return Ok(None);
    };

    let mut scan = ChangeScan::default();
    scan.visit(&view.root);
    if !scan.seen_change {
        return Ok(None);
    }

    let range = LineNumberRange {
        from: scan.before_first.unwrap_or(lines.from),
        to: scan.after_last.unwrap_or(view.end_line),
    };
    debug!("Changes affect lines {}..{}", range.from, range.to);
    Ok(Some(range))
}

/// Line anchors around changes, in document order.
#[derive(Debug, Default)]
struct ChangeScan {
    last_anchor: Option<u32>,
    seen_change: bool,
    before_first: Option<u32>,
    after_last: Option<u32>,
}

impl ChangeScan {
    fn visit(&mut self, el: &Element) {
        for child in &el.children {
            let Node::Element(inner) = child else {
                continue;
            };
            if inner.tag == Tag::LineAnchor {
                let line = line_number_of(inner);
                if self.seen_change && self.after_last.is_none() {
                    self.after_last = line;
                }
                self.last_anchor = line.or(self.last_anchor);
            } else if is_insertion(inner) || is_deletion(inner) {
                if !self.seen_change {
                    self.seen_change = true;
                    self.before_first = self.last_anchor;
                }
                self.after_last = None;
            } else {
                self.visit(inner);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markers::line_number_marker;
    use crate::numbering::insert_line_numbers;
    use pretty_assertions::assert_eq;

    fn marker(n: u32) -> String {
        line_number_marker(n).to_html()
    }

    #[test]
    fn accepting_changes_keeps_the_new_text() {
        let diff = concat!(
            r#"<p>Old <del>wrong</del><ins>right</ins> text "#,
            r#"<span class="delete">gone</span><span class="insert">new</span></p>"#,
            r#"<p class="delete">x</p><ul class="insert"><li>y</li></ul>"#,
        );
        assert_eq!(
            diff_html_to_final_text(diff).unwrap(),
            "<p>Old right text <span>new</span></p><ul><li>y</li></ul>"
        );
    }

    #[test]
    fn nested_insertions_are_unwrapped() {
        let diff = r#"<p><ins>a <strong><ins class="insert">b</ins></strong></ins> c</p>"#;
        assert_eq!(diff_html_to_final_text(diff).unwrap(), "<p>a <strong>b</strong> c</p>");
    }

    #[test]
    fn change_inside_a_line() {
        let numbered = insert_line_numbers("<p>aaa bbb ccc</p>", 5).unwrap();
        let diff = numbered.replacen("bbb ", "<del>bbb </del><ins>xyz </ins>", 1);
        assert_eq!(
            detect_affected_line_range(&diff).unwrap(),
            Some(LineNumberRange { from: 2, to: 3 })
        );
    }

    #[test]
    fn change_in_the_last_line_reaches_the_end() {
        let numbered = insert_line_numbers("<p>aaa bbb ccc</p>", 5).unwrap();
        let diff = numbered.replacen("ccc", "<ins>ccc ddd</ins>", 1);
        assert_eq!(
            detect_affected_line_range(&diff).unwrap(),
            Some(LineNumberRange { from: 3, to: 4 })
        );
    }

    #[test]
    fn changes_across_lines_span_all_of_them() {
        let numbered = insert_line_numbers("<p>aaa</p><p>bbb</p><p>ccc</p><p>ddd</p>", 80).unwrap();
        let diff = numbered
            .replacen("aaa", "aaa<ins> more</ins>", 1)
            .replacen("ccc", r#"<span class="delete">ccc</span>"#, 1);
        assert_eq!(
            detect_affected_line_range(&diff).unwrap(),
            Some(LineNumberRange { from: 1, to: 4 })
        );
    }

    #[test]
    fn deletion_of_a_whole_line_starts_at_that_line() {
        let numbered = insert_line_numbers("<p>aaa</p><p>bbb</p><p>ccc</p>", 80).unwrap();
        let line_two = format!("{}bbb", marker(2));
        let diff = numbered.replacen(&line_two, &format!("<del>{line_two}</del>"), 1);
        assert_eq!(
            detect_affected_line_range(&diff).unwrap(),
            Some(LineNumberRange { from: 2, to: 3 })
        );
    }

    #[test]
    fn no_changes_no_range() {
        let numbered = insert_line_numbers("<p>aaa</p>", 80).unwrap();
        assert_eq!(detect_affected_line_range(&numbered).unwrap(), None);
        assert_eq!(detect_affected_line_range("<p><ins>x</ins></p>").unwrap(), None);
    }
}
