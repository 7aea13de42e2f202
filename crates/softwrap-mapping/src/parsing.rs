//! Soft-wrap aware document parsing.
//!
//! Defines the listener protocol emitted by an incremental re-layout pass and
//! a rope-backed [`RecalculationEngine`] that drives it. Per recalculation
//! batch the engine delivers, in strict order:
//!
//! 1. exactly one [`on_cache_update_start`](SoftWrapParsingListener::on_cache_update_start);
//! 2. per logical line in the batch, zero or more
//!    [`before_soft_wrap_line_feed`](SoftWrapParsingListener::before_soft_wrap_line_feed)
//!    (one per soft wrap inserted into that line) and exactly one
//!    [`on_visual_line_end`](SoftWrapParsingListener::on_visual_line_end);
//! 3. exactly one [`on_recalculation_end`](SoftWrapParsingListener::on_recalculation_end).
//!
//! Listeners must only be driven from a single logical thread; the protocol is
//! not reentrant and calls from one batch never overlap another.

use ropey::Rope;

use crate::event::IncrementalCacheUpdateEvent;
use crate::metrics::{DEFAULT_TAB_WIDTH, cell_width_at};
use crate::position::ParsePosition;

/// Receives position/line events from an incremental soft-wrap re-layout pass.
///
/// All methods default to no-ops so implementations can override only the
/// events they care about.
pub trait SoftWrapParsingListener {
    /// A recalculation batch is about to begin.
    fn on_cache_update_start(&mut self, event: &IncrementalCacheUpdateEvent) {
        let _ = event;
    }

    /// The end of a visual line was reached; `position.x` is the cell extent
    /// of that visual line.
    fn on_visual_line_end(&mut self, position: ParsePosition) {
        let _ = position;
    }

    /// A soft-wrap line feed is about to be inserted at `position`; the wrap
    /// indicator glyph will be painted starting at `position.x`.
    fn before_soft_wrap_line_feed(&mut self, position: ParsePosition) {
        let _ = position;
    }

    /// The batch ended. `normal` is `false` when the pass terminated abruptly
    /// before covering its whole range.
    fn on_recalculation_end(&mut self, event: &IncrementalCacheUpdateEvent, normal: bool) {
        let _ = (event, normal);
    }
}

/// Incremental soft-wrap re-layout pass over a rope-backed document.
///
/// The engine holds the document text and layout settings, and replays the
/// parsing-listener protocol for the logical line range named by an
/// [`IncrementalCacheUpdateEvent`]. Soft wraps are computed at character
/// boundaries against the viewport width, with `'\t'` expanded to tab stops.
pub struct RecalculationEngine {
    text: Rope,
    viewport_width: usize,
    tab_width: usize,
}

impl RecalculationEngine {
    /// Create an engine over `text` with the given viewport width (in cells).
    pub fn new(text: &str, viewport_width: usize) -> Self {
        Self {
            text: Rope::from_str(text),
            viewport_width,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }

    /// Get viewport width (in cells). A width of 0 disables soft wrapping.
    pub fn viewport_width(&self) -> usize {
        self.viewport_width
    }

    /// Set viewport width (in cells).
    pub fn set_viewport_width(&mut self, width: usize) {
        self.viewport_width = width;
    }

    /// Get tab width (in cells).
    pub fn tab_width(&self) -> usize {
        self.tab_width
    }

    /// Set tab width (in cells) used for expanding `'\t'`.
    pub fn set_tab_width(&mut self, tab_width: usize) {
        self.tab_width = tab_width.max(1);
    }

    /// Replace the whole document text.
    pub fn replace_text(&mut self, text: &str) {
        self.text = Rope::from_str(text);
    }

    /// Total number of logical lines in the document.
    pub fn logical_line_count(&self) -> usize {
        self.text.len_lines()
    }

    /// Run one recalculation batch over every logical line of the document.
    pub fn recalculate_all(&self, listener: &mut dyn SoftWrapParsingListener) {
        let last_line = self.logical_line_count().saturating_sub(1);
        let event = IncrementalCacheUpdateEvent::new(0, last_line, last_line);
        self.recalculate(event, listener);
    }

    /// Run one recalculation batch over the line range named by `event`,
    /// delivering the full parsing-listener protocol to `listener`.
    ///
    /// Lines past the end of the document are skipped; the batch still ends
    /// normally.
    pub fn recalculate(
        &self,
        event: IncrementalCacheUpdateEvent,
        listener: &mut dyn SoftWrapParsingListener,
    ) {
        debug_assert!(event.start_logical_line() <= event.new_end_logical_line());

        listener.on_cache_update_start(&event);

        let last_line = self.logical_line_count().saturating_sub(1);
        let end = event.new_end_logical_line().min(last_line);
        for line in event.start_logical_line()..=end {
            self.parse_line(line, listener);
        }

        listener.on_recalculation_end(&event, true);
    }

    /// Walk one logical line, emitting a wrap-feed event at each soft wrap and
    /// a visual-line-end event at the line's end.
    fn parse_line(&self, line: usize, listener: &mut dyn SoftWrapParsingListener) {
        let slice = self.text.line(line);

        // The rope slice includes the line terminator; exclude it from layout.
        let mut len = slice.len_chars();
        while len > 0 && matches!(slice.char(len - 1), '\n' | '\r') {
            len -= 1;
        }

        let mut x_in_segment = 0usize;
        let mut x_in_line = 0usize;

        for (i, ch) in slice.chars().take(len).enumerate() {
            let ch_width = cell_width_at(ch, x_in_line, self.tab_width);

            // Wrapping disabled when the viewport has no width constraint.
            if self.viewport_width > 0 {
                // If adding this character would exceed the width limit, wrap
                // before it. Double-width characters cannot be split; they
                // move intact to the continuation line.
                if x_in_segment + ch_width > self.viewport_width {
                    listener.before_soft_wrap_line_feed(ParsePosition::new(line, x_in_segment));
                    x_in_segment = 0;
                }
            }

            x_in_segment = x_in_segment.saturating_add(ch_width);
            x_in_line = x_in_line.saturating_add(ch_width);

            // If the segment fills the viewport exactly and more characters
            // follow, the next character starts a continuation line.
            if self.viewport_width > 0 && x_in_segment == self.viewport_width && i + 1 < len {
                listener.before_soft_wrap_line_feed(ParsePosition::new(line, x_in_segment));
                x_in_segment = 0;
            }
        }

        listener.on_visual_line_end(ParsePosition::new(line, x_in_segment));
    }
}
