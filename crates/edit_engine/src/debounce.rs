//! Input debouncing
//!
//! A burst of events collapses into one trailing invocation: each new
//! event replaces the pending value and restarts the window. Callers poll
//! from their event loop; nothing runs on a background thread.

use std::time::{Duration, Instant};

/// Window for search-as-you-type
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Window for snapshotting typed edits into history
pub const EDIT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Trailing-edge debouncer holding at most one pending value
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
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

    /// Schedule `value`, cancelling whatever was pending
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Take the pending value if its window has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, at)) if now.saturating_duration_since(*at) >= self.delay => {
                self.pending.take().map(|(value, _)| value)
            }
            _ => None,
        }
    }

    /// Drop the pending value without running it
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Take the pending value immediately, ignoring the window
    pub fn flush(&mut self) -> Option<T> {
        self.cancel()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending value becomes ready
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, at)| self.delay.saturating_sub(now.saturating_duration_since(*at)))
    }
}
