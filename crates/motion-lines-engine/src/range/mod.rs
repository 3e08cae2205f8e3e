//! Addressing, cutting out and splicing back line ranges of numbered markup.

pub mod extract;
pub mod locate;
pub mod merge;
pub mod partial;

pub use extract::{
    ExtractionBundle, extract_range, extract_range_from_tree, format_bundle,
    format_bundle_with_line_numbers,
};
pub use locate::{AncestorTrace, LineView, NodePath, common_ancestor, find_marker};
pub use merge::{merge_node_arrays, replace_lines};
