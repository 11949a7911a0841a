//! Frame-to-frame scroll state of one egui pane
//!
//! A [`PaneSlot`] sits between an egui `ScrollArea` and the [`ScrollMirror`]:
//! it stores the measurements of the last frame, queues the offset the mirror
//! wants applied on the next frame, and detects user scrolling.
//!
//! [`ScrollMirror`]: super::ScrollMirror

use super::sync_scroll::{PaneMetrics, ScrollPane, ScrollTracker};
use eframe::egui::scroll_area::ScrollAreaOutput;

/// Scroll bookkeeping for one pane.
#[derive(Debug, Clone, Default)]
pub struct PaneSlot {
    metrics: Option<PaneMetrics>,
    pending_scroll: Option<f32>,
    tracker: ScrollTracker,
}

impl PaneSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset queued by the mirror, consumed when the pane is next shown.
    pub fn take_pending_scroll(&mut self) -> Option<f32> {
        self.pending_scroll.take()
    }

    /// Store this frame's measurements. Returns `true` if the pane scrolled.
    pub fn record(&mut self, metrics: PaneMetrics) -> bool {
        self.metrics = Some(metrics);
        self.tracker.observe(metrics.scroll_top)
    }

    /// Store measurements from a `ScrollArea` output.
    pub fn record_output<R>(&mut self, output: &ScrollAreaOutput<R>) -> bool {
        self.record(metrics_from_output(output))
    }

    /// Forget everything; the pane is hidden.
    pub fn clear(&mut self) {
        self.metrics = None;
        self.pending_scroll = None;
        self.tracker.reset();
    }

    /// Keep the measurements but stop treating the next offset as a scroll.
    pub fn forget_offset(&mut self) {
        self.tracker.reset();
    }
}

impl ScrollPane for PaneSlot {
    fn metrics(&self) -> Option<PaneMetrics> {
        self.metrics
    }

    /// Queue `offset` for the next frame. Applying it is not reported as a
    /// scroll of this pane.
    fn set_scroll_top(&mut self, offset: f32) {
        self.pending_scroll = Some(offset);
        self.tracker.observe(offset);
        if let Some(metrics) = self.metrics.as_mut() {
            metrics.scroll_top = offset;
        }
    }
}

/// Measure a shown `ScrollArea`.
pub fn metrics_from_output<R>(output: &ScrollAreaOutput<R>) -> PaneMetrics {
    PaneMetrics::new(
        output.state.offset.y,
        output.content_size.y,
        output.inner_rect.height(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{ScrollMirror, SyncOutcome};
    use std::time::Instant;

    #[test]
    fn test_first_record_is_not_a_scroll() {
        let mut slot = PaneSlot::new();
        assert!(slot.metrics().is_none());
        assert!(!slot.record(PaneMetrics::new(0.0, 1000.0, 400.0)));
        assert!(slot.record(PaneMetrics::new(120.0, 1000.0, 400.0)));
    }

    #[test]
    fn test_mirror_write_is_queued() {
        let mut source = PaneSlot::new();
        let mut preview = PaneSlot::new();
        source.record(PaneMetrics::new(500.0, 1500.0, 500.0));
        preview.record(PaneMetrics::new(0.0, 2100.0, 600.0));

        let mut mirror = ScrollMirror::new();
        let outcome = mirror.on_source_scroll(&source, Some(&mut preview), Instant::now());

        assert_eq!(outcome, SyncOutcome::Mirrored { offset: 750.0 });
        assert_eq!(preview.metrics().map(|m| m.scroll_top), Some(750.0));
        assert_eq!(preview.take_pending_scroll(), Some(750.0));
        assert_eq!(preview.take_pending_scroll(), None);
    }

    #[test]
    fn test_applied_mirror_write_is_not_echoed() {
        let mut slot = PaneSlot::new();
        slot.record(PaneMetrics::new(0.0, 2100.0, 600.0));
        slot.set_scroll_top(750.0);

        assert!(!slot.record(PaneMetrics::new(750.0, 2100.0, 600.0)));
        assert!(slot.record(PaneMetrics::new(800.0, 2100.0, 600.0)));
    }

    #[test]
    fn test_clear_hides_pane() {
        let mut slot = PaneSlot::new();
        slot.record(PaneMetrics::new(10.0, 1000.0, 400.0));
        slot.set_scroll_top(40.0);
        slot.clear();

        assert!(slot.metrics().is_none());
        assert_eq!(slot.take_pending_scroll(), None);
        assert!(!slot.record(PaneMetrics::new(300.0, 1000.0, 400.0)));
    }

    #[test]
    fn test_forget_offset_suppresses_next_event() {
        let mut slot = PaneSlot::new();
        slot.record(PaneMetrics::new(10.0, 1000.0, 400.0));
        slot.forget_offset();
        assert!(!slot.record(PaneMetrics::new(90.0, 1200.0, 400.0)));
        assert!(slot.metrics().is_some());
    }
}
