//! Incremental cache update events.

/// Describes one incremental recalculation batch over a contiguous logical
/// line range.
///
/// `old_end_logical_line` is the end line of the affected region *before*
/// recalculation; `new_end_logical_line` is the end line after it. They differ
/// when the triggering document change added or removed logical lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncrementalCacheUpdateEvent {
    start_logical_line: usize,
    old_end_logical_line: usize,
    new_end_logical_line: usize,
}

impl IncrementalCacheUpdateEvent {
    /// Create an event covering `start..=new_end` with the given pre-change end line.
    pub fn new(
        start_logical_line: usize,
        old_end_logical_line: usize,
        new_end_logical_line: usize,
    ) -> Self {
        Self {
            start_logical_line,
            old_end_logical_line,
            new_end_logical_line,
        }
    }

    /// First logical line of the recalculated region.
    pub fn start_logical_line(&self) -> usize {
        self.start_logical_line
    }

    /// End logical line of the region before recalculation.
    pub fn old_end_logical_line(&self) -> usize {
        self.old_end_logical_line
    }

    /// End logical line of the region after recalculation.
    pub fn new_end_logical_line(&self) -> usize {
        self.new_end_logical_line
    }
}
