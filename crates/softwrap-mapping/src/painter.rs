//! Soft-wrap indicator painter collaborator.
//!
//! When a logical line is soft-wrapped, the renderer paints an indicator glyph
//! at the wrap position (one before the inserted visual line feed, one on the
//! continuation line). The visual-size bookkeeping does not draw anything, but
//! it must reserve the horizontal space those glyphs occupy; the painter is
//! the collaborator that knows how much that is.

use crate::metrics::char_width;

/// Classifies where a soft-wrap indicator is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoftWrapDrawingType {
    /// Indicator drawn at the end of a visual line, just before the soft-wrap
    /// induced line feed.
    BeforeSoftWrapLineFeed,
    /// Indicator drawn at the start of the continuation visual line.
    AfterSoftWrap,
}

/// Supplies the minimum horizontal space (in cells) a soft-wrap indicator
/// glyph occupies for a given drawing classification.
pub trait SoftWrapPainter {
    /// Minimum drawing width for the given indicator classification.
    fn min_drawing_width(&self, drawing_type: SoftWrapDrawingType) -> usize;
}

/// Painter that represents soft wraps with text glyphs and measures them per
/// UAX #11.
#[derive(Debug, Clone, Copy)]
pub struct TextBasedSoftWrapPainter {
    before_line_feed: char,
    after_wrap: char,
}

impl TextBasedSoftWrapPainter {
    /// Create a painter with explicit indicator glyphs.
    pub fn new(before_line_feed: char, after_wrap: char) -> Self {
        Self {
            before_line_feed,
            after_wrap,
        }
    }
}

impl Default for TextBasedSoftWrapPainter {
    fn default() -> Self {
        Self::new('↩', '↪')
    }
}

impl SoftWrapPainter for TextBasedSoftWrapPainter {
    fn min_drawing_width(&self, drawing_type: SoftWrapDrawingType) -> usize {
        let glyph = match drawing_type {
            SoftWrapDrawingType::BeforeSoftWrapLineFeed => self.before_line_feed,
            SoftWrapDrawingType::AfterSoftWrap => self.after_wrap,
        };
        char_width(glyph)
    }
}

/// Painter with a uniform indicator width for every drawing classification.
///
/// Useful for hosts whose wrap markers occupy a known fixed number of cells,
/// and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedSoftWrapPainter {
    width: usize,
}

impl FixedSoftWrapPainter {
    /// Create a painter whose indicators all occupy `width` cells.
    pub fn new(width: usize) -> Self {
        Self { width }
    }
}

impl SoftWrapPainter for FixedSoftWrapPainter {
    fn min_drawing_width(&self, _drawing_type: SoftWrapDrawingType) -> usize {
        self.width
    }
}
