//! Cutting a line range out of numbered markup.
//!
//! A range `[from, to)` covers line `from` up to the start of line `to`. The
//! cut rarely falls on element boundaries, so the bundle carries the context
//! needed to make the fragment renderable on its own and to splice it back:
//!
//! ```text
//! outer_context_start  <ol start="2" class="os-split-before os-split-after">
//! inner_context_start      <li class="os-split-before">
//! html                         second half of item 2</li><li>item 3
//! inner_context_end            </li>
//! outer_context_end    </ol>
//! ```
//!
//! Elements cut open by the range carry `os-split-before` (their start lies
//! before the range) or `os-split-after` (their end lies after it). Ordered
//! lists opened mid-way get a `start` attribute matching the item they resume
//! at.

use log::debug;
use motion_lines_syntax::{Element, Node, Tag, close_tag, open_tag, parse};
use serde::{Serialize, Serializer};

use crate::error::{EngineError, Result};
use crate::markers::{SPLIT_AFTER_CLASS, SPLIT_BEFORE_CLASS};
use crate::numbering::{NumberingOptions, insert_line_numbers_with};
use crate::range::locate::{LineView, common_ancestor, element_at, element_at_mut};
use crate::range::partial::{serialize_from, serialize_full, serialize_up_to};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionBundle {
    /// The range itself, without line markers.
    #[serde(rename = "innerHtml")]
    pub html: String,
    /// Innermost element containing the whole range.
    #[serde(rename = "ancestorTag", serialize_with = "tag_name")]
    pub ancestor: Tag,
    pub outer_context_start: String,
    pub outer_context_end: String,
    pub inner_context_start: String,
    pub inner_context_end: String,
    /// Everything before the range, markers kept.
    pub previous_html: String,
    /// Closing tags terminating `previous_html`.
    pub previous_html_end_snippet: String,
    /// Opening tags resuming the document for `following_html`.
    pub following_html_start_snippet: String,
    /// Everything from the start of line `to`, markers kept.
    pub following_html: String,
}

fn tag_name<S: Serializer>(tag: &Tag, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(tag.name())
}

/// Extracts lines `[from, to)` of numbered `markup`.
pub fn extract_range(markup: &str, from: u32, to: u32) -> Result<ExtractionBundle> {
    if to <= from {
        return Err(EngineError::InvalidRange { from, to });
    }
    let root = parse(markup)?;
    extract_range_from_tree(&root, from, to)
}

pub fn extract_range_from_tree(numbered: &Element, from: u32, to: u32) -> Result<ExtractionBundle> {
    if to <= from {
        return Err(EngineError::InvalidRange { from, to });
    }
    let view = LineView::build(numbered);
    let from_path = view
        .find_anchor(from)
        .ok_or(EngineError::LineNotFound { line: from })?;
    let to_path = view
        .find_anchor(to)
        .ok_or(EngineError::LineNotFound { line: to })?;
    let trace = common_ancestor(&from_path, &to_path);
    debug!(
        "Extracting lines {from}..{to}, common ancestor at depth {}",
        trace.ancestor.len()
    );

    let previous_html = serialize_up_to(&view.root, &from_path, false);
    let following_html = serialize_from(&view.root, &to_path, false);

    // Everything below works on a copy that collects split classes.
    let mut marked = view.root.clone();

    let mut previous_html_end_snippet = String::new();
    mark_splits(&mut marked, &from_path, SPLIT_BEFORE_CLASS);
    for depth in (1..from_path.len()).rev() {
        if let Some(el) = element_at(&marked, &from_path[..depth]) {
            previous_html_end_snippet.push_str(&close_tag(el));
        }
    }

    let mut following_html_start_snippet = String::new();
    mark_splits(&mut marked, &to_path, SPLIT_AFTER_CLASS);
    for depth in 1..to_path.len() {
        if let Some(el) = element_at(&marked, &to_path[..depth]) {
            following_html_start_snippet.push_str(&resume_tag(el, to_path[depth]));
        }
    }

    let inner_context_start = inner_context_start(&mut marked, &trace.ancestor, &trace.trace_from);
    let inner_context_end = inner_context_end(&marked, &trace.ancestor, &trace.trace_to);

    let ancestor = element_at(&marked, &trace.ancestor).unwrap_or(&marked);
    let html = range_html(ancestor, &trace.trace_from, &trace.trace_to);

    let mut outer_context_start = String::new();
    let mut outer_context_end = String::new();
    for depth in 1..=trace.ancestor.len() {
        if let Some(el) = element_at(&marked, &trace.ancestor[..depth]) {
            outer_context_start.push_str(&resume_tag(el, from_path[depth]));
        }
    }
    for depth in (1..=trace.ancestor.len()).rev() {
        if let Some(el) = element_at(&marked, &trace.ancestor[..depth]) {
            outer_context_end.push_str(&close_tag(el));
        }
    }

    Ok(ExtractionBundle {
        html,
        ancestor: ancestor.tag,
        outer_context_start,
        outer_context_end,
        inner_context_start,
        inner_context_end,
        previous_html,
        previous_html_end_snippet,
        following_html_start_snippet,
        following_html,
    })
}

/// Walks up from the anchor at `path`. Once a node is not the first non-empty
/// child of its parent, that parent and every element above it are cut by
/// the anchor and get `class`.
fn mark_splits(root: &mut Element, path: &[usize], class: &str) {
    let mut is_split = false;
    for depth in (1..path.len()).rev() {
        let Some(parent) = element_at_mut(root, &path[..depth]) else {
            continue;
        };
        if !parent.is_first_nonempty_child(path[depth]) {
            is_split = true;
        }
        if is_split {
            parent.add_class(class);
        }
    }
}

/// Opening tag of `el` when entered at child `child_index`. An ordered list
/// restarts its numbering at the list item containing that child.
fn resume_tag(el: &Element, child_index: usize) -> String {
    if el.tag != Tag::Ol {
        return open_tag(el);
    }
    let offset = el
        .attr("start")
        .and_then(|start| start.trim().parse::<usize>().ok())
        .map_or(0, |start| start.saturating_sub(1));
    let mut resumed = el.shallow_clone();
    resumed.set_attr("start", (nth_list_item(el, child_index) + offset).to_string());
    open_tag(&resumed)
}

/// One-based position of the list item at or after `child_index`.
fn nth_list_item(list: &Element, child_index: usize) -> usize {
    list.children
        .iter()
        .take(child_index)
        .filter(|child| child.tag() == Some(Tag::Li))
        .count()
        + 1
}

/// Opening tags from the ancestor down to the element holding the first line.
fn inner_context_start(marked: &mut Element, ancestor: &[usize], trace: &[usize]) -> String {
    let mut out = String::new();
    let mut is_split = false;
    let mut path = ancestor.to_vec();
    for (i, &index) in trace.iter().enumerate() {
        path.push(index);
        let Some(el) = element_at_mut(marked, &path) else {
            break;
        };
        if el.tag == Tag::LineAnchor {
            break;
        }
        let Some(&next) = trace.get(i + 1) else {
            break;
        };
        if !el.is_first_nonempty_child(next) {
            is_split = true;
        }
        if el.tag == Tag::Ol {
            out.push_str(&resume_tag(el, next));
        } else {
            if is_split {
                el.add_class(SPLIT_BEFORE_CLASS);
            }
            out.push_str(&open_tag(el));
        }
    }
    out
}

/// Closing tags from the element holding the last line up to the ancestor.
fn inner_context_end(marked: &Element, ancestor: &[usize], trace: &[usize]) -> String {
    let mut out = String::new();
    let mut path = ancestor.to_vec();
    for &index in trace {
        path.push(index);
        match element_at(marked, &path) {
            Some(el) if el.tag != Tag::LineAnchor => out.insert_str(0, &close_tag(el)),
            _ => break,
        }
    }
    out
}

/// The children of `ancestor` between the two anchors, markers stripped.
fn range_html(ancestor: &Element, trace_from: &[usize], trace_to: &[usize]) -> String {
    let (Some((&first, from_rest)), Some((&last, to_rest))) =
        (trace_from.split_first(), trace_to.split_first())
    else {
        return String::new();
    };
    let mut out = String::new();
    for (index, child) in ancestor.children.iter().enumerate().take(last + 1).skip(first) {
        match child {
            Node::Element(el) if index == first => out.push_str(&serialize_from(el, from_rest, true)),
            Node::Element(el) if index == last => out.push_str(&serialize_up_to(el, to_rest, true)),
            _ => out.push_str(&serialize_full(child, true)),
        }
    }
    out
}

/// The range rendered on its own: `html` wrapped in all context tags.
pub fn format_bundle(bundle: &ExtractionBundle) -> String {
    [
        bundle.outer_context_start.as_str(),
        &bundle.inner_context_start,
        &bundle.html,
        &bundle.inner_context_end,
        &bundle.outer_context_end,
    ]
    .concat()
}

/// [`format_bundle`] numbered again, starting at `first_line`.
pub fn format_bundle_with_line_numbers(
    bundle: &ExtractionBundle,
    line_length: usize,
    first_line: u32,
) -> Result<String> {
    let options = NumberingOptions::new(line_length).with_first_line(first_line);
    insert_line_numbers_with(&format_bundle(bundle), &options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numbering::insert_line_numbers;
    use pretty_assertions::assert_eq;

    fn extract(markup: &str, line_length: usize, from: u32, to: u32) -> ExtractionBundle {
        let numbered = insert_line_numbers(markup, line_length).unwrap();
        extract_range(&numbered, from, to).unwrap()
    }

    #[test]
    fn middle_line_of_a_paragraph() {
        let bundle = extract("<p>aaa bbb ccc</p>", 5, 2, 3);
        assert_eq!(bundle.html, "bbb ");
        assert_eq!(bundle.ancestor, Tag::P);
        assert_eq!(
            bundle.outer_context_start,
            r#"<p class="os-split-before os-split-after">"#
        );
        assert_eq!(bundle.outer_context_end, "</p>");
        assert_eq!(bundle.inner_context_start, "");
        assert_eq!(bundle.inner_context_end, "");
        assert_eq!(bundle.previous_html_end_snippet, "</p>");
        assert_eq!(
            bundle.following_html_start_snippet,
            r#"<p class="os-split-before os-split-after">"#
        );
        assert_eq!(
            format_bundle(&bundle),
            r#"<p class="os-split-before os-split-after">bbb </p>"#
        );
    }

    #[test]
    fn range_across_paragraphs() {
        let bundle = extract("<p>aaa bbb</p><p>ccc ddd</p>", 5, 2, 4);
        assert_eq!(bundle.ancestor, Tag::Root);
        assert_eq!(bundle.html, r#"bbb</p><p class="os-split-after">ccc "#);
        assert_eq!(bundle.inner_context_start, r#"<p class="os-split-before">"#);
        assert_eq!(bundle.inner_context_end, "</p>");
        assert_eq!(bundle.outer_context_start, "");
        assert_eq!(
            format_bundle(&bundle),
            r#"<p class="os-split-before">bbb</p><p class="os-split-after">ccc </p>"#
        );
    }

    #[test]
    fn whole_paragraphs_are_not_split() {
        let bundle = extract("<p>one</p><p>two</p><p>three</p>", 80, 2, 3);
        assert_eq!(format_bundle(&bundle), "<p>two</p>");
        assert_eq!(bundle.previous_html_end_snippet, "");
        assert_eq!(bundle.following_html_start_snippet, "");
    }

    #[test]
    fn previous_and_following_keep_markers() {
        let numbered = insert_line_numbers("<p>one</p><p>two</p><p>three</p>", 80).unwrap();
        let bundle = extract_range(&numbered, 2, 3).unwrap();
        let rejoined = format!("{}{}", bundle.previous_html, bundle.following_html);
        let mut expected = numbered.clone();
        let start = expected.find("<p><span class=\"os-line-number line-number-2\"").unwrap();
        let end = expected.find("<p><span class=\"os-line-number line-number-3\"").unwrap();
        expected.replace_range(start..end, "");
        assert_eq!(rejoined, expected);
    }

    #[test]
    fn last_line_reaches_the_end() {
        let bundle = extract("<p>one</p><p>two</p>", 80, 2, 3);
        assert_eq!(format_bundle(&bundle), "<p>two</p>");
        assert_eq!(bundle.following_html, "");
    }

    #[test]
    fn ordered_list_resumes_numbering() {
        let bundle = extract(
            r#"<ol start="3"><li>one</li><li>two</li><li>three</li></ol>"#,
            80,
            2,
            3,
        );
        assert_eq!(bundle.ancestor, Tag::Ol);
        assert_eq!(
            bundle.outer_context_start,
            r#"<ol start="4" class="os-split-before os-split-after">"#
        );
        assert_eq!(bundle.outer_context_end, "</ol>");
        assert_eq!(bundle.html, "<li>two</li>");
        assert_eq!(
            bundle.following_html_start_snippet,
            r#"<ol start="5" class="os-split-before os-split-after">"#
        );
    }

    #[test]
    fn lines_inside_one_list_item() {
        let bundle = extract("<ul><li>aaa bbb ccc</li><li>ddd</li></ul>", 10, 2, 3);
        assert_eq!(bundle.ancestor, Tag::Li);
        assert_eq!(bundle.html, "bbb ");
        assert_eq!(
            bundle.outer_context_start,
            r#"<ul class="os-split-before os-split-after"><li class="os-split-before os-split-after">"#
        );
        assert_eq!(bundle.outer_context_end, "</li></ul>");
    }

    #[test]
    fn standalone_rendering_renumbers() {
        let bundle = extract("<p>aaa bbb ccc</p>", 5, 2, 3);
        let numbered = format_bundle_with_line_numbers(&bundle, 5, 2).unwrap();
        assert!(numbered.contains(r#"data-line-number="2""#));
        assert!(!numbered.contains(r#"data-line-number="3""#));
    }

    #[test]
    fn rejects_invalid_ranges() {
        assert!(matches!(
            extract_range("<p>x</p>", 3, 3),
            Err(EngineError::InvalidRange { from: 3, to: 3 })
        ));
        assert!(matches!(
            extract_range("<p>x</p>", 4, 2),
            Err(EngineError::InvalidRange { from: 4, to: 2 })
        ));
    }

    #[test]
    fn rejects_missing_lines() {
        let numbered = insert_line_numbers("<p>one</p>", 80).unwrap();
        assert!(matches!(
            extract_range(&numbered, 1, 5),
            Err(EngineError::LineNotFound { line: 5 })
        ));
        assert!(matches!(
            extract_range(&numbered, 0, 1),
            Err(EngineError::LineNotFound { line: 0 })
        ));
    }

    #[test]
    fn bundle_serializes_with_record_field_names() {
        let bundle = extract("<p>aaa bbb ccc</p>", 5, 2, 3);
        let record = toml::to_string(&bundle).unwrap();
        assert!(record.contains("innerHtml = \"bbb \""));
        assert!(record.contains("ancestorTag = \"p\""));
        assert!(record.contains("previousHtmlEndSnippet = \"</p>\""));
    }
}
