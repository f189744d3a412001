// Periodic timer
//
// Deadline-based: a timer fires at most once per poll, and a late poll
// re-arms from the current time instead of queueing the ticks it missed.

use std::time::{Duration, Instant};

/// A single periodic registration
#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    period: Duration,
    next_due: Instant,
}

impl PeriodicTimer {
    /// Arm a timer whose first tick is one period after `now`
    pub fn new(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Timer period
    pub fn period(&self) -> Duration {
        self.period
    }

    /// When the timer next fires
    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Returns true (once) if the timer is due at `now`
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }

        self.next_due += self.period;
        if self.next_due <= now {
            self.next_due = now + self.period;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_due_before_first_period() {
        let t0 = Instant::now();
        let mut timer = PeriodicTimer::new(Duration::from_millis(10), t0);

        assert!(!timer.poll(t0));
        assert!(!timer.poll(t0 + Duration::from_millis(9)));
        assert!(timer.poll(t0 + Duration::from_millis(10)));
    }

    #[test]
    fn test_fires_once_per_poll() {
        let t0 = Instant::now();
        let mut timer = PeriodicTimer::new(Duration::from_millis(10), t0);

        let now = t0 + Duration::from_millis(10);
        assert!(timer.poll(now));
        assert!(!timer.poll(now));
    }

    #[test]
    fn test_stays_on_grid_when_slightly_late() {
        let t0 = Instant::now();
        let mut timer = PeriodicTimer::new(Duration::from_millis(10), t0);

        assert!(timer.poll(t0 + Duration::from_millis(13)));
        assert_eq!(timer.next_due(), t0 + Duration::from_millis(20));
    }

    #[test]
    fn test_missed_ticks_are_not_replayed() {
        let t0 = Instant::now();
        let mut timer = PeriodicTimer::new(Duration::from_millis(10), t0);

        let late = t0 + Duration::from_millis(55);
        assert!(timer.poll(late));
        assert!(!timer.poll(late));
        assert_eq!(timer.next_due(), late + Duration::from_millis(10));
    }
}
