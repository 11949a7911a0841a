//! Bidirectional Sync Scrolling between the Source and Rendered panes
//!
//! Each pane is reduced to three measurements (scroll offset, content height,
//! viewport height). When one pane scrolls, its position is expressed as a
//! ratio of its scrollable range and the same ratio is applied to the other
//! pane, so both views sit at the same relative depth even though their total
//! heights differ.
//!
//! # Feedback loops
//!
//! Writing the other pane's offset makes that pane scroll, which would
//! normally mirror straight back. A three-valued [`MirrorLock`] records which
//! side started the current pass; the opposite side's handler is a no-op
//! until the lock is released a fixed delay later.
//!
//! # Usage
//!
//! ```ignore
//! let mut mirror = ScrollMirror::new();
//!
//! // The source pane moved this frame
//! mirror.on_source_scroll(&source_pane, Some(&mut preview_pane), Instant::now());
//!
//! // Every frame, release an expired lock
//! mirror.poll(Instant::now());
//! ```

use log::debug;
use std::time::{Duration, Instant};

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// How long a pass keeps the lock before the other side may mirror back.
///
/// Must outlast the frame in which the programmatic write is applied and
/// observed; three frames at 60fps is comfortably above that.
pub const LOCK_RELEASE_DELAY: Duration = Duration::from_millis(50);

/// Scroll offset changes at or below this many pixels are not scroll events.
pub const SCROLL_EPSILON: f32 = 0.5;

// ─────────────────────────────────────────────────────────────────────────────
// Mirror Lock
// ─────────────────────────────────────────────────────────────────────────────

/// Which pane initiated the synchronization pass in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MirrorLock {
    /// No pass in progress
    #[default]
    Idle,
    /// The source (text) pane is driving the rendered pane
    SourceActive,
    /// The rendered pane is driving the source pane
    TargetActive,
}

// ─────────────────────────────────────────────────────────────────────────────
// Pane Metrics
// ─────────────────────────────────────────────────────────────────────────────

/// Vertical scroll measurements of one pane, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneMetrics {
    /// Current offset of the viewport from the top of the content
    pub scroll_top: f32,
    /// Total height of the scrolled content
    pub scroll_height: f32,
    /// Height of the visible viewport
    pub client_height: f32,
}

impl PaneMetrics {
    pub fn new(scroll_top: f32, scroll_height: f32, client_height: f32) -> Self {
        Self {
            scroll_top,
            scroll_height,
            client_height,
        }
    }

    /// Largest reachable scroll offset (zero when the content fits).
    pub fn max_scroll(&self) -> f32 {
        (self.scroll_height - self.client_height).max(0.0)
    }

    /// Whether the content is taller than the viewport.
    pub fn has_overflow(&self) -> bool {
        self.scroll_height > self.client_height
    }

    /// Scroll position as a fraction of the scrollable range.
    ///
    /// `None` when the pane has nothing to scroll.
    pub fn scroll_ratio(&self) -> Option<f32> {
        if !self.has_overflow() {
            return None;
        }
        Some((self.scroll_top / self.max_scroll()).clamp(0.0, 1.0))
    }

    /// Offset that puts this pane at `ratio` of its scrollable range.
    pub fn offset_for_ratio(&self, ratio: f32) -> f32 {
        ratio.clamp(0.0, 1.0) * self.max_scroll()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Scroll Pane
// ─────────────────────────────────────────────────────────────────────────────

/// A scrollable surface the mirror can read from and write to.
pub trait ScrollPane {
    /// Current measurements, or `None` if the pane has not been laid out.
    fn metrics(&self) -> Option<PaneMetrics>;

    /// Move the viewport to `offset` points from the top.
    fn set_scroll_top(&mut self, offset: f32);
}

/// What a scroll handler did with an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncOutcome {
    /// The other pane was moved to this offset
    Mirrored { offset: f32 },
    /// The other side holds the lock; the event was ignored
    Locked,
    /// The scrolled pane has no overflow, so there is no ratio to propagate
    NoOverflow,
    /// The other pane is hidden or not measured yet
    TargetMissing,
    /// Sync scrolling is switched off
    Disabled,
}

// ─────────────────────────────────────────────────────────────────────────────
// Scroll Mirror
// ─────────────────────────────────────────────────────────────────────────────

/// Ratio-based scroll synchronization with a timed re-entrancy lock.
#[derive(Debug, Clone)]
pub struct ScrollMirror {
    /// Whether sync scrolling is enabled
    enabled: bool,
    /// Side that started the pass in progress
    lock: MirrorLock,
    /// When the current lock expires
    release_at: Option<Instant>,
    /// Lock duration after each pass
    release_delay: Duration,
}

impl Default for ScrollMirror {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollMirror {
    /// Create an enabled mirror with the default release delay.
    pub fn new() -> Self {
        Self::with_release_delay(LOCK_RELEASE_DELAY)
    }

    pub fn with_release_delay(release_delay: Duration) -> Self {
        Self {
            enabled: true,
            lock: MirrorLock::Idle,
            release_at: None,
            release_delay,
        }
    }

    pub fn lock(&self) -> MirrorLock {
        self.lock
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Switch sync scrolling on or off. Switching off drops any held lock.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.release();
        }
    }

    /// Flip the enabled switch and return the new value.
    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    /// Handle a scroll of the source pane.
    ///
    /// `target` is `None` while the rendered pane is hidden.
    pub fn on_source_scroll<S, T>(
        &mut self,
        source: &S,
        target: Option<&mut T>,
        now: Instant,
    ) -> SyncOutcome
    where
        S: ScrollPane + ?Sized,
        T: ScrollPane + ?Sized,
    {
        self.handle(MirrorLock::SourceActive, source, target, now)
    }

    /// Handle a scroll of the rendered pane.
    pub fn on_target_scroll<T, S>(
        &mut self,
        target: &T,
        source: Option<&mut S>,
        now: Instant,
    ) -> SyncOutcome
    where
        T: ScrollPane + ?Sized,
        S: ScrollPane + ?Sized,
    {
        self.handle(MirrorLock::TargetActive, target, source, now)
    }

    /// Release the lock if its delay has elapsed. Returns `true` if released.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.release_at {
            Some(deadline) if now >= deadline => {
                self.release();
                true
            }
            _ => false,
        }
    }

    /// Time left until the held lock is released, if one is held.
    pub fn time_until_release(&self, now: Instant) -> Option<Duration> {
        self.release_at
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    fn release(&mut self) {
        self.lock = MirrorLock::Idle;
        self.release_at = None;
    }

    fn handle<F, O>(
        &mut self,
        side: MirrorLock,
        from: &F,
        to: Option<&mut O>,
        now: Instant,
    ) -> SyncOutcome
    where
        F: ScrollPane + ?Sized,
        O: ScrollPane + ?Sized,
    {
        if !self.enabled {
            return SyncOutcome::Disabled;
        }

        // A late release is harmless; apply it before judging this event.
        self.poll(now);

        let Some(to) = to else {
            return SyncOutcome::TargetMissing;
        };

        if self.lock != MirrorLock::Idle && self.lock != side {
            return SyncOutcome::Locked;
        }

        self.lock = side;
        self.release_at = Some(now + self.release_delay);

        let (Some(from_metrics), Some(to_metrics)) = (from.metrics(), to.metrics()) else {
            return SyncOutcome::TargetMissing;
        };

        let Some(ratio) = from_metrics.scroll_ratio() else {
            return SyncOutcome::NoOverflow;
        };

        let offset = to_metrics.offset_for_ratio(ratio);
        to.set_scroll_top(offset);
        debug!("Sync scroll {:?}: ratio {:.3} -> offset {:.1}", side, ratio, offset);

        SyncOutcome::Mirrored { offset }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Pane Tracking
// ─────────────────────────────────────────────────────────────────────────────

/// Turns per-frame scroll offsets into scroll events.
///
/// egui has no scroll callbacks; a pane "scrolled" when its offset differs
/// from the previous frame's by more than [`SCROLL_EPSILON`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ScrollTracker {
    last_offset: Option<f32>,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record this frame's offset and report whether it moved.
    ///
    /// The first observation after construction or [`reset`](Self::reset)
    /// is never a scroll event.
    pub fn observe(&mut self, offset: f32) -> bool {
        let moved = self
            .last_offset
            .is_some_and(|last| (offset - last).abs() > SCROLL_EPSILON);
        self.last_offset = Some(offset);
        moved
    }

    /// Forget the last offset (the pane was hidden or re-laid out).
    pub fn reset(&mut self) {
        self.last_offset = None;
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// In-memory pane that records writes.
    #[derive(Debug, Clone)]
    struct FakePane {
        metrics: Option<PaneMetrics>,
        writes: Vec<f32>,
    }

    impl FakePane {
        fn new(scroll_top: f32, scroll_height: f32, client_height: f32) -> Self {
            Self {
                metrics: Some(PaneMetrics::new(scroll_top, scroll_height, client_height)),
                writes: Vec::new(),
            }
        }

        fn unmeasured() -> Self {
            Self {
                metrics: None,
                writes: Vec::new(),
            }
        }

        fn scroll_top(&self) -> f32 {
            self.metrics.map(|m| m.scroll_top).unwrap_or(0.0)
        }

        fn scroll_to(&mut self, offset: f32) {
            if let Some(m) = self.metrics.as_mut() {
                m.scroll_top = offset;
            }
        }
    }

    impl ScrollPane for FakePane {
        fn metrics(&self) -> Option<PaneMetrics> {
            self.metrics
        }

        fn set_scroll_top(&mut self, offset: f32) {
            self.writes.push(offset);
            self.scroll_to(offset);
        }
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_pane_metrics_ratio() {
        let m = PaneMetrics::new(500.0, 1500.0, 500.0);
        assert_eq!(m.max_scroll(), 1000.0);
        assert!(m.has_overflow());
        assert!(approx_eq(m.scroll_ratio().unwrap(), 0.5));
    }

    #[test]
    fn test_pane_metrics_no_overflow() {
        let fits = PaneMetrics::new(0.0, 300.0, 500.0);
        assert!(!fits.has_overflow());
        assert_eq!(fits.scroll_ratio(), None);
        assert_eq!(fits.max_scroll(), 0.0);

        let exact = PaneMetrics::new(0.0, 500.0, 500.0);
        assert_eq!(exact.scroll_ratio(), None);
    }

    #[test]
    fn test_half_depth_scenario() {
        let now = Instant::now();
        let mut mirror = ScrollMirror::new();
        let source = FakePane::new(500.0, 1500.0, 500.0);
        let mut target = FakePane::new(0.0, 2100.0, 600.0);

        let outcome = mirror.on_source_scroll(&source, Some(&mut target), now);

        assert_eq!(outcome, SyncOutcome::Mirrored { offset: 750.0 });
        assert!(approx_eq(target.scroll_top(), 750.0));
        assert_eq!(mirror.lock(), MirrorLock::SourceActive);
    }

    #[test]
    fn test_ratio_preserved_across_positions() {
        let source_height = 4000.0;
        let source_client = 700.0;
        let source_range = source_height - source_client;

        for step in 0..=33 {
            let p = source_range * step as f32 / 33.0;
            let mut mirror = ScrollMirror::new();
            let source = FakePane::new(p, source_height, source_client);
            let mut target = FakePane::new(0.0, 9000.0, 650.0);

            mirror.on_source_scroll(&source, Some(&mut target), Instant::now());

            let target_ratio = target.metrics().unwrap().scroll_ratio().unwrap();
            assert!(
                approx_eq(target_ratio, p / source_range),
                "position {}: {} != {}",
                p,
                target_ratio,
                p / source_range
            );
        }
    }

    #[test]
    fn test_source_without_overflow_leaves_target() {
        let mut mirror = ScrollMirror::new();
        let source = FakePane::new(0.0, 400.0, 500.0);
        let mut target = FakePane::new(320.0, 2000.0, 500.0);

        let outcome = mirror.on_source_scroll(&source, Some(&mut target), Instant::now());

        assert_eq!(outcome, SyncOutcome::NoOverflow);
        assert!(target.writes.is_empty());
        assert_eq!(target.scroll_top(), 320.0);
    }

    #[test]
    fn test_target_without_overflow_gets_zero() {
        let mut mirror = ScrollMirror::new();
        let source = FakePane::new(250.0, 1000.0, 500.0);
        let mut target = FakePane::new(0.0, 200.0, 500.0);

        let outcome = mirror.on_source_scroll(&source, Some(&mut target), Instant::now());

        assert_eq!(outcome, SyncOutcome::Mirrored { offset: 0.0 });
    }

    #[test]
    fn test_no_feedback_while_source_active() {
        let now = Instant::now();
        let mut mirror = ScrollMirror::new();
        let mut source = FakePane::new(500.0, 1500.0, 500.0);
        let mut target = FakePane::new(0.0, 2100.0, 600.0);

        mirror.on_source_scroll(&source, Some(&mut target), now);
        // The write above makes the rendered pane fire its own handler.
        let echo = mirror.on_target_scroll(
            &target,
            Some(&mut source),
            now + Duration::from_millis(16),
        );

        assert_eq!(echo, SyncOutcome::Locked);
        assert!(source.writes.is_empty());
        assert_eq!(source.scroll_top(), 500.0);
    }

    #[test]
    fn test_no_feedback_while_target_active() {
        let now = Instant::now();
        let mut mirror = ScrollMirror::new();
        let mut source = FakePane::new(0.0, 1500.0, 500.0);
        let mut target = FakePane::new(300.0, 900.0, 300.0);

        let outcome = mirror.on_target_scroll(&target, Some(&mut source), now);
        assert_eq!(outcome, SyncOutcome::Mirrored { offset: 500.0 });
        assert_eq!(mirror.lock(), MirrorLock::TargetActive);

        let echo = mirror.on_source_scroll(&source, Some(&mut target), now);
        assert_eq!(echo, SyncOutcome::Locked);
        assert!(target.writes.is_empty());
    }

    #[test]
    fn test_same_side_keeps_mirroring() {
        let now = Instant::now();
        let mut mirror = ScrollMirror::new();
        let mut source = FakePane::new(100.0, 1100.0, 100.0);
        let mut target = FakePane::new(0.0, 2100.0, 100.0);

        mirror.on_source_scroll(&source, Some(&mut target), now);
        source.scroll_to(600.0);
        let outcome =
            mirror.on_source_scroll(&source, Some(&mut target), now + Duration::from_millis(10));

        assert_eq!(outcome, SyncOutcome::Mirrored { offset: 1200.0 });
        assert_eq!(target.writes, vec![200.0, 1200.0]);
    }

    #[test]
    fn test_lock_released_after_delay() {
        let now = Instant::now();
        let mut mirror = ScrollMirror::new();
        let mut source = FakePane::new(500.0, 1500.0, 500.0);
        let mut target = FakePane::new(0.0, 2100.0, 600.0);

        mirror.on_source_scroll(&source, Some(&mut target), now);
        assert!(!mirror.poll(now + Duration::from_millis(10)));
        assert_eq!(mirror.lock(), MirrorLock::SourceActive);

        assert!(mirror.poll(now + LOCK_RELEASE_DELAY));
        assert_eq!(mirror.lock(), MirrorLock::Idle);
        assert_eq!(mirror.time_until_release(now), None);

        // An independent scroll of the rendered pane now mirrors normally.
        target.scroll_to(1500.0);
        let later = now + Duration::from_millis(200);
        let outcome = mirror.on_target_scroll(&target, Some(&mut source), later);
        assert_eq!(outcome, SyncOutcome::Mirrored { offset: 1000.0 });
        assert_eq!(mirror.lock(), MirrorLock::TargetActive);
    }

    #[test]
    fn test_late_event_releases_expired_lock() {
        let now = Instant::now();
        let mut mirror = ScrollMirror::new();
        let mut source = FakePane::new(500.0, 1500.0, 500.0);
        let mut target = FakePane::new(0.0, 2100.0, 600.0);

        mirror.on_source_scroll(&source, Some(&mut target), now);

        // No poll in between: the handler itself notices the expired lock.
        let outcome = mirror.on_target_scroll(
            &target,
            Some(&mut source),
            now + Duration::from_millis(120),
        );
        assert!(matches!(outcome, SyncOutcome::Mirrored { .. }));
    }

    #[test]
    fn test_time_until_release() {
        let now = Instant::now();
        let mut mirror = ScrollMirror::with_release_delay(Duration::from_millis(80));
        let source = FakePane::new(10.0, 1000.0, 500.0);
        let mut target = FakePane::new(0.0, 1000.0, 500.0);

        assert_eq!(mirror.time_until_release(now), None);
        mirror.on_source_scroll(&source, Some(&mut target), now);
        assert_eq!(
            mirror.time_until_release(now + Duration::from_millis(30)),
            Some(Duration::from_millis(50))
        );
        assert_eq!(
            mirror.time_until_release(now + Duration::from_millis(500)),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_hidden_rendered_pane_is_noop() {
        let now = Instant::now();
        let mut mirror = ScrollMirror::new();
        let source = FakePane::new(500.0, 1500.0, 500.0);

        let outcome = mirror.on_source_scroll::<_, FakePane>(&source, None, now);

        assert_eq!(outcome, SyncOutcome::TargetMissing);
        assert_eq!(mirror.lock(), MirrorLock::Idle);
    }

    #[test]
    fn test_unmeasured_pane_is_noop() {
        let now = Instant::now();
        let mut mirror = ScrollMirror::new();
        let source = FakePane::new(500.0, 1500.0, 500.0);
        let mut target = FakePane::unmeasured();

        let outcome = mirror.on_source_scroll(&source, Some(&mut target), now);

        assert_eq!(outcome, SyncOutcome::TargetMissing);
        assert!(target.writes.is_empty());
    }

    #[test]
    fn test_disabled_mirror_does_nothing() {
        let now = Instant::now();
        let mut mirror = ScrollMirror::new();
        let source = FakePane::new(500.0, 1500.0, 500.0);
        let mut target = FakePane::new(0.0, 2100.0, 600.0);

        assert!(!mirror.toggle());
        let outcome = mirror.on_source_scroll(&source, Some(&mut target), now);

        assert_eq!(outcome, SyncOutcome::Disabled);
        assert!(target.writes.is_empty());
        assert!(mirror.toggle());
    }

    #[test]
    fn test_disabling_drops_lock() {
        let now = Instant::now();
        let mut mirror = ScrollMirror::new();
        let source = FakePane::new(500.0, 1500.0, 500.0);
        let mut target = FakePane::new(0.0, 2100.0, 600.0);

        mirror.on_source_scroll(&source, Some(&mut target), now);
        mirror.set_enabled(false);

        assert_eq!(mirror.lock(), MirrorLock::Idle);
        assert_eq!(mirror.time_until_release(now), None);
    }

    #[test]
    fn test_tracker_detects_movement() {
        let mut tracker = ScrollTracker::new();
        assert!(!tracker.observe(0.0));
        assert!(!tracker.observe(0.3));
        assert!(tracker.observe(40.0));
        assert!(!tracker.observe(40.0));

        tracker.reset();
        assert!(!tracker.observe(900.0));
        assert!(tracker.observe(0.0));
    }
}
