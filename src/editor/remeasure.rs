//! Deferred re-measure of the source pane
//!
//! Toggling the preview changes the editor's width. The new layout is only
//! known a few frames later, so the editor is re-measured after a short
//! delay instead of immediately.

use std::time::{Duration, Instant};

/// Delay between a preview toggle and the re-measure.
pub const REMEASURE_DELAY: Duration = Duration::from_millis(100);

/// One-shot timer; scheduling again pushes the deadline back.
#[derive(Debug, Clone, Copy)]
pub struct RemeasureTimer {
    due: Option<Instant>,
    delay: Duration,
}

impl Default for RemeasureTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl RemeasureTimer {
    pub fn new() -> Self {
        Self::with_delay(REMEASURE_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { due: None, delay }
    }

    pub fn schedule(&mut self, now: Instant) {
        self.due = Some(now + self.delay);
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// Returns `true` exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_after_delay() {
        let start = Instant::now();
        let mut timer = RemeasureTimer::new();
        assert!(!timer.poll(start));

        timer.schedule(start);
        assert!(timer.is_pending());
        assert!(!timer.poll(start + Duration::from_millis(99)));
        assert!(timer.poll(start + REMEASURE_DELAY));
        assert!(!timer.poll(start + Duration::from_secs(1)));
        assert!(!timer.is_pending());
    }

    #[test]
    fn test_reschedule_pushes_deadline() {
        let start = Instant::now();
        let mut timer = RemeasureTimer::new();
        timer.schedule(start);
        timer.schedule(start + Duration::from_millis(60));

        assert!(!timer.poll(start + Duration::from_millis(120)));
        assert!(timer.poll(start + Duration::from_millis(160)));
    }

    #[test]
    fn test_time_until_due() {
        let start = Instant::now();
        let mut timer = RemeasureTimer::with_delay(Duration::from_millis(40));
        assert_eq!(timer.time_until_due(start), None);

        timer.schedule(start);
        assert_eq!(
            timer.time_until_due(start + Duration::from_millis(10)),
            Some(Duration::from_millis(30))
        );
        assert_eq!(
            timer.time_until_due(start + Duration::from_millis(90)),
            Some(Duration::ZERO)
        );
    }
}
