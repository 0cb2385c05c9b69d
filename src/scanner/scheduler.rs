use std::time::{Duration, Instant};

/// Rate limiter for detection attempts
///
/// The capture loop calls [`ScanScheduler::try_begin`] on every tick; only
/// ticks at least `min_interval` after the previous attempt go through.
#[derive(Debug, Clone)]
pub struct ScanScheduler {
    last_attempt: Option<Instant>,
    min_interval: Duration,
}

impl ScanScheduler {
    /// Create a scheduler with no recorded attempt
    pub fn new(min_interval: Duration) -> Self {
        Self {
            last_attempt: None,
            min_interval,
        }
    }

    /// Record an attempt at `now` if the interval has elapsed
    pub fn try_begin(&mut self, now: Instant) -> bool {
        match self.last_attempt {
            Some(last) if now.saturating_duration_since(last) < self.min_interval => return false,
            _ => {}
        }
        self.last_attempt = Some(now);
        true
    }

    /// Forget the last attempt so the next tick runs immediately
    pub fn reset(&mut self) {
        self.last_attempt = None;
    }

    /// Time of the last recorded attempt
    pub fn last_attempt(&self) -> Option<Instant> {
        self.last_attempt
    }

    /// Minimum spacing between attempts
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}
