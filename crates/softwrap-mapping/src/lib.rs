#![warn(missing_docs)]
//! Soft-Wrap Mapping - Visual Size Tracking for Headless Editor Layout
//!
//! # Overview
//!
//! `softwrap-mapping` maintains the maximum visual width reached by each
//! logical line of a document across incremental soft-wrap recalculation
//! passes, and reports the result to registered listeners after every pass.
//! It does not render anything; it assumes an upper layer consumes the width
//! reports (e.g. to size a horizontal scrollbar or a text grid). Unicode wide
//! characters and tab stops are handled per UAX #11.
//!
//! # Core Features
//!
//! - **Per-line width cache**: running maximum per logical line, reset each batch
//! - **Wrap-indicator accounting**: reserves the cells a wrap marker glyph occupies
//! - **Change Notifications**: registration-order listener callbacks per batch
//! - **Abrupt-termination reporting**: partial passes still report how far they got
//! - **Incremental re-layout driver**: rope-backed pass emitting the parsing protocol
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Visual Size Manager (width cache + notify) │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Parsing Listener Protocol                  │  ← Event Contract
//! ├─────────────────────────────────────────────┤
//! │  Recalculation Engine (Rope-based)          │  ← Incremental Pass
//! ├─────────────────────────────────────────────┤
//! │  Cell Metrics (UAX #11 + tab stops)         │  ← Width Measurement
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use softwrap_mapping::{
//!     RecalculationEngine, SoftWrapVisualSizeManager, TextBasedSoftWrapPainter,
//! };
//!
//! let engine = RecalculationEngine::new("short\na much longer logical line", 12);
//! let mut manager = SoftWrapVisualSizeManager::new(TextBasedSoftWrapPainter::default());
//!
//! // Subscribe to width changes
//! let widths = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&widths);
//! manager.add_visual_size_change_listener(move |change| {
//!     *sink.borrow_mut() = change.widths.to_sorted_vec();
//! });
//!
//! engine.recalculate_all(&mut manager);
//!
//! // Line 0 never wraps; line 1 wraps and reserves one cell for the marker.
//! assert_eq!(widths.borrow()[0], (0, 5));
//! assert_eq!(widths.borrow()[1].0, 1);
//! ```
//!
//! # Module Description
//!
//! - [`metrics`] - UAX #11 cell widths with tab-stop expansion
//! - [`position`] - positions carried by parsing events
//! - [`event`] - incremental cache update (batch) descriptors
//! - [`painter`] - wrap-indicator painter collaborator
//! - [`parsing`] - parsing listener protocol and recalculation engine
//! - [`visual_size`] - the visual size manager (width cache + notification)
//!
//! # Concurrency
//!
//! Everything here is single-threaded and non-reentrant, matching the
//! owning editor's text-model contract: one recalculation pass at a time,
//! all calls serialized by the caller.

pub mod event;
pub mod metrics;
pub mod painter;
pub mod parsing;
pub mod position;
pub mod visual_size;
pub mod widths;

pub use event::IncrementalCacheUpdateEvent;
pub use painter::{FixedSoftWrapPainter, SoftWrapDrawingType, SoftWrapPainter, TextBasedSoftWrapPainter};
pub use parsing::{RecalculationEngine, SoftWrapParsingListener};
pub use position::ParsePosition;
pub use visual_size::{LineWidthsChange, SoftWrapVisualSizeManager, VisualSizeChangeCallback};
pub use widths::LineWidths;
