//! Line layout: where lines end and how wide they may be.

pub mod breaker;
pub mod indent;

pub use breaker::{Fragment, LineCursor, break_text};
pub use indent::{ContainerKind, IndentPolicy, Scale};
