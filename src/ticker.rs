//! Cancellable fixed-interval tick source
//!
//! Time is passed in by the caller, so the ticker never sleeps or reads the
//! clock itself.

use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Instant,
    cancelled: bool,
}

impl Ticker {
    /// First tick is due one interval after `now`
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
            cancelled: false,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Stop for good. A cancelled ticker never fires again
    pub fn cancel(&mut self) {
        if !self.cancelled {
            debug!("tick driver cancelled");
            self.cancelled = true;
        }
    }

    /// Time left until the next tick; `None` once cancelled
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        if self.cancelled {
            return None;
        }
        Some(self.next_due.saturating_duration_since(now))
    }

    /// Fire at most one tick if it is due. A late tick reschedules from
    /// `now` rather than replaying every missed interval.
    pub fn fire(&mut self, now: Instant) -> bool {
        if self.cancelled || now < self.next_due {
            return false;
        }
        self.next_due = now + self.interval;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn test_fires_once_per_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(SECOND, start);
        assert!(!ticker.fire(start));
        assert_eq!(ticker.remaining(start), Some(SECOND));
        assert!(ticker.fire(start + SECOND));
        assert!(!ticker.fire(start + SECOND));
        assert!(ticker.fire(start + 2 * SECOND));
    }

    #[test]
    fn test_late_tick_does_not_burst() {
        let start = Instant::now();
        let mut ticker = Ticker::new(SECOND, start);
        let late = start + 5 * SECOND;
        assert!(ticker.fire(late));
        assert!(!ticker.fire(late));
        assert_eq!(ticker.remaining(late), Some(SECOND));
    }

    #[test]
    fn test_cancelled_never_fires() {
        let start = Instant::now();
        let mut ticker = Ticker::new(SECOND, start);
        ticker.cancel();
        ticker.cancel();
        assert!(ticker.is_cancelled());
        assert!(!ticker.fire(start + 10 * SECOND));
        assert_eq!(ticker.remaining(start), None);
    }

    #[test]
    fn test_remaining_saturates() {
        let start = Instant::now();
        let ticker = Ticker::new(SECOND, start);
        assert_eq!(ticker.remaining(start + 3 * SECOND), Some(Duration::ZERO));
    }
}
