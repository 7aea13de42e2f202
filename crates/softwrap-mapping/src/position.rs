//! Positions reported by the document parsing pass.

/// A position emitted by the soft-wrap aware document parsing pass.
///
/// Only the coordinates the visual-size bookkeeping consumes are carried here:
/// the logical line being processed and the horizontal cell offset reached on
/// the current visual line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsePosition {
    /// Logical line number (0-based), independent of soft wrapping.
    pub logical_line: usize,
    /// Horizontal extent reached at this point, in character cells.
    pub x: usize,
}

impl ParsePosition {
    /// Create a new parse position.
    pub fn new(logical_line: usize, x: usize) -> Self {
        Self { logical_line, x }
    }
}
