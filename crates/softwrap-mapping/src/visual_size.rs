//! Soft-wrap aware visual size tracking.
//!
//! Bridges the soft-wrap document parsing protocol to a per-line width cache
//! plus change notifications: during each recalculation batch the manager
//! records the maximum visual width reached by every logical line it sees
//! (including the cells a wrap indicator will occupy), and when the batch ends
//! it reports the affected line range and the width cache to every registered
//! listener.
//!
//! Not thread-safe; drive it from a single logical thread only.

use crate::event::IncrementalCacheUpdateEvent;
use crate::painter::{SoftWrapDrawingType, SoftWrapPainter};
use crate::parsing::SoftWrapParsingListener;
use crate::position::ParsePosition;
use crate::widths::LineWidths;

/// Notification payload delivered to visual size change listeners once per
/// completed recalculation batch.
///
/// `widths` borrows the manager's cache: listeners read it during the callback
/// and must not retain it. The manager does not touch the cache again until
/// the next batch starts.
#[derive(Debug)]
pub struct LineWidthsChange<'a> {
    /// First logical line of the recalculated region.
    pub start_line: usize,
    /// End logical line of the region before recalculation.
    pub old_end_line: usize,
    /// Most recently processed logical line. When the batch terminated
    /// abruptly this is the last line actually reached, which may fall short
    /// of the event's range.
    pub last_line: usize,
    /// Maximum visual widths recorded during the batch, keyed by logical line.
    pub widths: &'a LineWidths,
}

/// Boxed callback invoked with a [`LineWidthsChange`] after each batch.
pub type VisualSizeChangeCallback = Box<dyn FnMut(&LineWidthsChange<'_>)>;

/// Tracks the maximum visual width of each logical line across incremental
/// soft-wrap recalculation passes.
///
/// Wire it into a re-layout pass as a [`SoftWrapParsingListener`]; register
/// listeners to observe the resulting widths.
///
/// # Example
///
/// ```rust
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use softwrap_mapping::{RecalculationEngine, SoftWrapVisualSizeManager, TextBasedSoftWrapPainter};
///
/// let engine = RecalculationEngine::new("a long line that will wrap", 10);
/// let mut manager = SoftWrapVisualSizeManager::new(TextBasedSoftWrapPainter::default());
///
/// let reported = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&reported);
/// manager.add_visual_size_change_listener(move |change| {
///     sink.borrow_mut().extend(change.widths.to_sorted_vec());
/// });
///
/// engine.recalculate_all(&mut manager);
/// assert_eq!(reported.borrow().as_slice(), &[(0, 11)]);
/// ```
pub struct SoftWrapVisualSizeManager {
    listeners: Vec<VisualSizeChangeCallback>,
    line_widths: LineWidths,
    painter: Box<dyn SoftWrapPainter>,

    /// A recalculation may finish abruptly; the last processed logical line is
    /// tracked here so listeners can still be told how far the pass got.
    last_logical_line: usize,
}

impl SoftWrapVisualSizeManager {
    /// Create a manager that reserves wrap-indicator space via `painter`.
    pub fn new<P>(painter: P) -> Self
    where
        P: SoftWrapPainter + 'static,
    {
        Self {
            listeners: Vec::new(),
            line_widths: LineWidths::new(),
            painter: Box::new(painter),
            last_logical_line: 0,
        }
    }

    /// Register a listener to be notified after each recalculation batch.
    ///
    /// Listeners are invoked in registration order; duplicates are allowed.
    /// Returns whether the listener set changed (always `true` under list
    /// semantics).
    pub fn add_visual_size_change_listener<F>(&mut self, listener: F) -> bool
    where
        F: FnMut(&LineWidthsChange<'_>) + 'static,
    {
        self.listeners.push(Box::new(listener));
        true
    }

    /// Whether any listener is registered.
    pub fn has_listeners(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// The widths recorded during the current (or most recently completed)
    /// batch.
    pub fn line_widths(&self) -> &LineWidths {
        &self.line_widths
    }

    /// The most recently processed logical line.
    pub fn last_logical_line(&self) -> usize {
        self.last_logical_line
    }
}

impl SoftWrapParsingListener for SoftWrapVisualSizeManager {
    fn on_cache_update_start(&mut self, _event: &IncrementalCacheUpdateEvent) {
        self.line_widths.clear();
    }

    fn on_visual_line_end(&mut self, position: ParsePosition) {
        self.line_widths.update_max(position.logical_line, position.x);
        self.last_logical_line = position.logical_line;
    }

    fn before_soft_wrap_line_feed(&mut self, position: ParsePosition) {
        let new_width = position.x
            + self
                .painter
                .min_drawing_width(SoftWrapDrawingType::BeforeSoftWrapLineFeed);
        self.last_logical_line = position.logical_line;
        if !self.line_widths.contains_line(position.logical_line) {
            // First write for this line; nothing to compare against.
            self.line_widths.insert(position.logical_line, new_width);
            return;
        }

        self.line_widths.update_max(position.logical_line, new_width);
    }

    fn on_recalculation_end(&mut self, event: &IncrementalCacheUpdateEvent, _normal: bool) {
        // An abnormal end still notifies: listeners get a best-effort report
        // reflecting the last line actually processed.
        if self.listeners.is_empty() {
            return;
        }

        let change = LineWidthsChange {
            start_line: event.start_logical_line(),
            old_end_line: event.old_end_logical_line(),
            last_line: self.last_logical_line,
            widths: &self.line_widths,
        };
        for listener in &mut self.listeners {
            listener(&change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::painter::FixedSoftWrapPainter;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn event(start: usize, old_end: usize) -> IncrementalCacheUpdateEvent {
        IncrementalCacheUpdateEvent::new(start, old_end, old_end)
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Notification {
        start_line: usize,
        old_end_line: usize,
        last_line: usize,
        widths: Vec<(usize, usize)>,
    }

    type NotificationLog = Rc<RefCell<Vec<Notification>>>;

    fn subscribe(manager: &mut SoftWrapVisualSizeManager) -> NotificationLog {
        let log: NotificationLog = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        manager.add_visual_size_change_listener(move |change| {
            sink.borrow_mut().push(Notification {
                start_line: change.start_line,
                old_end_line: change.old_end_line,
                last_line: change.last_line,
                widths: change.widths.to_sorted_vec(),
            });
        });
        log
    }

    #[test]
    fn test_visual_line_end_keeps_maximum_width() {
        // Scenario: two visual-line-end reports for line 3, second one smaller.
        let mut manager = SoftWrapVisualSizeManager::new(FixedSoftWrapPainter::new(1));
        let log = subscribe(&mut manager);

        manager.on_cache_update_start(&event(0, 5));
        manager.on_visual_line_end(ParsePosition::new(3, 100));
        manager.on_visual_line_end(ParsePosition::new(3, 50));
        manager.on_recalculation_end(&event(0, 5), true);

        assert_eq!(
            log.borrow().as_slice(),
            &[Notification {
                start_line: 0,
                old_end_line: 5,
                last_line: 3,
                widths: vec![(3, 100)],
            }]
        );
    }

    #[test]
    fn test_wrap_feed_first_write_adds_marker_width() {
        let mut manager = SoftWrapVisualSizeManager::new(FixedSoftWrapPainter::new(10));

        manager.on_cache_update_start(&event(0, 2));
        manager.before_soft_wrap_line_feed(ParsePosition::new(2, 80));

        assert_eq!(manager.line_widths().get(2), Some(90));
        assert_eq!(manager.last_logical_line(), 2);
    }

    #[test]
    fn test_wrap_feed_second_write_applies_max_rule() {
        let mut manager = SoftWrapVisualSizeManager::new(FixedSoftWrapPainter::new(10));

        manager.on_cache_update_start(&event(0, 2));
        manager.before_soft_wrap_line_feed(ParsePosition::new(2, 80)); // 90
        manager.before_soft_wrap_line_feed(ParsePosition::new(2, 95)); // 105
        assert_eq!(manager.line_widths().get(2), Some(105));

        // A smaller report must not shrink the stored width.
        manager.before_soft_wrap_line_feed(ParsePosition::new(2, 30));
        assert_eq!(manager.line_widths().get(2), Some(105));
    }

    #[test]
    fn test_first_write_direct_equals_max_against_zero() {
        // First-write-direct on wrap feed must be indistinguishable from
        // compare-and-max against a default of zero.
        let mut direct = SoftWrapVisualSizeManager::new(FixedSoftWrapPainter::new(3));
        direct.on_cache_update_start(&event(0, 0));
        direct.before_soft_wrap_line_feed(ParsePosition::new(0, 0));
        assert_eq!(direct.line_widths().get(0), Some(3));

        let mut seeded = SoftWrapVisualSizeManager::new(FixedSoftWrapPainter::new(3));
        seeded.on_cache_update_start(&event(0, 0));
        seeded.on_visual_line_end(ParsePosition::new(0, 0)); // stores 0
        seeded.before_soft_wrap_line_feed(ParsePosition::new(0, 0));
        assert_eq!(seeded.line_widths().get(0), Some(3));
    }

    #[test]
    fn test_cache_update_start_clears_previous_batch() {
        let mut manager = SoftWrapVisualSizeManager::new(FixedSoftWrapPainter::new(1));

        manager.on_cache_update_start(&event(0, 1));
        manager.on_visual_line_end(ParsePosition::new(0, 40));
        manager.on_visual_line_end(ParsePosition::new(1, 60));
        assert_eq!(manager.line_widths().len(), 2);

        manager.on_cache_update_start(&event(0, 1));
        assert!(manager.line_widths().is_empty());
    }

    #[test]
    fn test_no_listeners_no_notification_but_state_still_updates() {
        // Tracking is decoupled from notification: with nobody registered the
        // widths still accumulate, and nothing observable happens at batch end.
        let mut manager = SoftWrapVisualSizeManager::new(FixedSoftWrapPainter::new(1));
        assert!(!manager.has_listeners());

        manager.on_cache_update_start(&event(0, 3));
        manager.on_visual_line_end(ParsePosition::new(1, 25));
        manager.before_soft_wrap_line_feed(ParsePosition::new(3, 9));
        manager.on_recalculation_end(&event(0, 3), true);

        assert_eq!(manager.line_widths().get(1), Some(25));
        assert_eq!(manager.line_widths().get(3), Some(10));
        assert_eq!(manager.last_logical_line(), 3);

        // A listener registered after the fact sees the next batch only.
        let log = subscribe(&mut manager);
        assert!(log.borrow().is_empty());

        manager.on_cache_update_start(&event(2, 2));
        manager.on_visual_line_end(ParsePosition::new(2, 7));
        manager.on_recalculation_end(&event(2, 2), true);
        assert_eq!(
            log.borrow().as_slice(),
            &[Notification {
                start_line: 2,
                old_end_line: 2,
                last_line: 2,
                widths: vec![(2, 7)],
            }]
        );
    }

    #[test]
    fn test_abnormal_end_reports_best_effort_state() {
        let mut manager = SoftWrapVisualSizeManager::new(FixedSoftWrapPainter::new(1));
        let log = subscribe(&mut manager);

        // The batch claims lines 0..=9 but dies after processing line 4.
        manager.on_cache_update_start(&event(0, 9));
        manager.on_visual_line_end(ParsePosition::new(4, 12));
        manager.on_recalculation_end(&event(0, 9), false);

        assert_eq!(
            log.borrow().as_slice(),
            &[Notification {
                start_line: 0,
                old_end_line: 9,
                last_line: 4,
                widths: vec![(4, 12)],
            }]
        );
    }

    #[test]
    fn test_last_logical_line_persists_across_batches() {
        let mut manager = SoftWrapVisualSizeManager::new(FixedSoftWrapPainter::new(1));
        let log = subscribe(&mut manager);

        manager.on_cache_update_start(&event(0, 8));
        manager.on_visual_line_end(ParsePosition::new(8, 30));
        manager.on_recalculation_end(&event(0, 8), true);

        // Next batch ends abruptly before any line event; the previous last
        // line is all there is to report.
        manager.on_cache_update_start(&event(0, 8));
        manager.on_recalculation_end(&event(0, 8), false);

        let log = log.borrow();
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].last_line, 8);
        assert!(log[1].widths.is_empty());
    }

    #[test]
    fn test_listeners_notified_in_registration_order() {
        let mut manager = SoftWrapVisualSizeManager::new(FixedSoftWrapPainter::new(1));
        let order: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

        let first = Rc::clone(&order);
        assert!(manager.add_visual_size_change_listener(move |_| first.borrow_mut().push("first")));
        let second = Rc::clone(&order);
        assert!(
            manager.add_visual_size_change_listener(move |_| second.borrow_mut().push("second"))
        );

        manager.on_cache_update_start(&event(0, 0));
        manager.on_visual_line_end(ParsePosition::new(0, 1));
        manager.on_recalculation_end(&event(0, 0), true);

        assert_eq!(order.borrow().as_slice(), &["first", "second"]);
    }
}
