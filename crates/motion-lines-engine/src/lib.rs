//! Line-numbered layout of motion texts.
//!
//! Numbering inserts synthetic markers into rich-text markup so that every
//! visual line of a fixed-width rendering starts with its line number. The
//! numbered markup then addresses line ranges, which can be cut out as
//! standalone fragments and merged back after editing.
//!
//! ```
//! use motion_lines_engine::{extract_range, format_bundle, insert_line_numbers, replace_lines};
//!
//! let numbered = insert_line_numbers("<p>aaa bbb ccc</p>", 5).unwrap();
//! let bundle = extract_range(&numbered, 2, 3).unwrap();
//! assert_eq!(
//!     format_bundle(&bundle),
//!     r#"<p class="os-split-before os-split-after">bbb </p>"#
//! );
//!
//! let edited = replace_lines(&numbered, "<p>BBB</p>", 2, 3).unwrap();
//! assert_eq!(edited, "<p>aaa BBB ccc</p>");
//! ```

pub mod diff;
pub mod error;
pub mod layout;
pub mod markers;
pub mod numbering;
pub mod outline;
pub mod range;

pub use diff::{detect_affected_line_range, diff_html_to_final_text};
pub use error::{EngineError, Result};
pub use layout::{ContainerKind, Fragment, IndentPolicy, LineCursor, Scale, break_text};
pub use numbering::{
    NumberingOptions, insert_line_breaks, insert_line_numbers, insert_line_numbers_with,
    number_tree, strip_line_numbers,
};
pub use outline::{
    LineNumberRange, SectionHeading, headings_with_line_numbers, highlight_line,
    line_number_range, split_inline_elements_at_line_breaks, split_to_paragraphs,
};
pub use range::{
    ExtractionBundle, extract_range, format_bundle, format_bundle_with_line_numbers,
    replace_lines,
};
