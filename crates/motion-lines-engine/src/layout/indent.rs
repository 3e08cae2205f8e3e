//! Line-length budgets of nested containers.
//!
//! Rendered motion texts indent list items and quotations and print headings
//! in a larger font, so fewer characters fit on one of their lines. Every
//! container derives its budget from the budget of the container enclosing it:
//!
//! | Container            | Budget                          |
//! |----------------------|---------------------------------|
//! | `h1`                 | enclosing × 1/2                 |
//! | `h2`                 | enclosing × 2/3                 |
//! | `li`                 | enclosing − 5                   |
//! | `blockquote`         | enclosing − 20                  |
//! | `style="padding-left: Npx"` | enclosing − round(N / 5) |
//!
//! The constants are defaults of [`IndentPolicy`] and can be configured.

use std::sync::OnceLock;

use motion_lines_syntax::{Element, Tag};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// How a container affects the budget of its content.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContainerKind {
    Heading(u8),
    ListItem,
    Quotation,
    /// Explicit left indentation in pixels.
    LeftIndent(f64),
    Plain,
}

impl ContainerKind {
    pub fn of(el: &Element) -> ContainerKind {
        match el.tag {
            Tag::Heading(level) => ContainerKind::Heading(level),
            Tag::Li => ContainerKind::ListItem,
            Tag::Blockquote => ContainerKind::Quotation,
            _ => el
                .attr("style")
                .and_then(left_indent_px)
                .map_or(ContainerKind::Plain, ContainerKind::LeftIndent),
        }
    }
}

/// Reads the left indentation in pixels from an inline style.
pub fn left_indent_px(style: &str) -> Option<f64> {
    static LEFT_INDENT: OnceLock<Regex> = OnceLock::new();
    let regex = LEFT_INDENT.get_or_init(|| {
        Regex::new(r"(?i)(?:^|;)\s*(?:padding|margin)-left\s*:\s*([0-9]+(?:\.[0-9]+)?)px")
            .expect("Invalid left indent regex")
    });
    regex
        .captures(style)
        .and_then(|caps| caps.get(1))
        .and_then(|px| px.as_str().parse().ok())
}

/// A fraction applied to the enclosing budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scale {
    pub numerator: usize,
    pub denominator: usize,
}

impl Scale {
    pub const fn new(numerator: usize, denominator: usize) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    fn apply(self, budget: usize) -> usize {
        budget * self.numerator / self.denominator.max(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndentPolicy {
    /// Characters lost per list item level.
    pub list_item: usize,
    /// Characters lost inside a quotation.
    pub quotation: usize,
    /// Pixels of explicit left indentation per character.
    pub px_per_char: usize,
    pub heading_1: Scale,
    pub heading_2: Scale,
}

impl Default for IndentPolicy {
    fn default() -> Self {
        Self {
            list_item: 5,
            quotation: 20,
            px_per_char: 5,
            heading_1: Scale::new(1, 2),
            heading_2: Scale::new(2, 3),
        }
    }
}

impl IndentPolicy {
    /// Budget inside a container of `kind` enclosed by a container with
    /// budget `enclosing`. Never below one character.
    pub fn budget_for(&self, enclosing: usize, kind: ContainerKind) -> usize {
        let budget = match kind {
            ContainerKind::Heading(1) => self.heading_1.apply(enclosing),
            ContainerKind::Heading(2) => self.heading_2.apply(enclosing),
            ContainerKind::Heading(_) | ContainerKind::Plain => enclosing,
            ContainerKind::ListItem => enclosing.saturating_sub(self.list_item),
            ContainerKind::Quotation => enclosing.saturating_sub(self.quotation),
            ContainerKind::LeftIndent(px) => {
                let chars = (px / self.px_per_char.max(1) as f64).round() as usize;
                enclosing.saturating_sub(chars)
            }
        };
        budget.max(1)
    }

    /// Budget of the innermost container of `stack`, outermost first.
    pub fn effective_budget(&self, base: usize, stack: &[ContainerKind]) -> usize {
        stack
            .iter()
            .fold(base.max(1), |budget, kind| self.budget_for(budget, *kind))
    }
}
