//! # Page Break Decisions
//!
//! Logic for deciding when a physical line has to open a new page.
//! Breaks are forward-only: once a line is placed, it is never moved.

use crate::model::{Emphasis, PageConfig};
use crate::text::wrap::PhysicalLine;

/// Why a page was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakReason {
    /// The cursor fell below the bottom of the body area.
    Overflow,
    /// A heading would sit too close to the bottom with nothing after it.
    KeepWithNext,
}

/// Decide what to do with the next physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakDecision {
    /// Place the line on the current page at the cursor.
    Place,
    /// Close the current page and place the line at the top of a new one.
    NewPage(BreakReason),
}

/// Given the cursor baseline `y`, decide whether `line` fits on this page.
///
/// Overflow applies to every line, spacers included. The keep-with-next rule
/// only compares `y` against a fixed threshold; it does not look at how much
/// body text actually follows the heading.
pub fn decide_break(y: f64, line: &PhysicalLine, config: &PageConfig) -> BreakDecision {
    if y < config.body_bottom {
        return BreakDecision::NewPage(BreakReason::Overflow);
    }

    if !line.is_spacer()
        && line.font == Emphasis::Heading
        && line.is_first
        && y < config.body_bottom + config.keep_with_next
    {
        return BreakDecision::NewPage(BreakReason::KeepWithNext);
    }

    BreakDecision::Place
}
