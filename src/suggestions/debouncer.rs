use std::time::{Duration, Instant};

/// Trailing-edge debouncer carrying the latest scheduled value.
///
/// Every `schedule` replaces the pending value and restarts the delay; only
/// the value still pending once the delay has elapsed is released.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    /// Pending value and the time it was scheduled
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_due(&self, now: Instant) -> bool {
        match &self.pending {
            Some((_, scheduled_at)) => now.saturating_duration_since(*scheduled_at) >= self.delay,
            None => false,
        }
    }

    /// Release the pending value if its delay has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<T> {
        if !self.is_due(now) {
            return None;
        }
        self.pending.take().map(|(value, _)| value)
    }
}

#[cfg(test)]
#[path = "debouncer_tests.rs"]
mod debouncer_tests;
