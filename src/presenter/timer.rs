//! Periodic dashboard refresh

use std::time::{Duration, Instant};

/// The dashboard re-renders this often so elapsed-time tooltips keep ticking
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

/// Shortest accepted interval; smaller values, zero included, are raised to it
pub const MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(1);

/// A repeating deadline polled from the event loop.
///
/// There is only ever one pending deadline: [`start`](Self::start) replaces
/// any running schedule, so re-initializing never doubles the refresh rate.
#[derive(Debug, Clone)]
pub struct RefreshTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Default for RefreshTimer {
    fn default() -> Self {
        Self::new(DEFAULT_REFRESH_INTERVAL)
    }
}

impl RefreshTimer {
    /// A stopped timer. `interval` is clamped to [`MIN_REFRESH_INTERVAL`].
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(MIN_REFRESH_INTERVAL),
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Cancel any pending schedule and fire one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_active(&self) -> bool {
        self.next_due.is_some()
    }

    /// Time left until the next firing, zero if overdue, `None` when stopped
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.saturating_duration_since(now))
    }

    /// Returns `true` once per elapsed deadline and schedules the next one.
    ///
    /// Missed periods (e.g. the process was suspended) collapse into a single
    /// firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        // Next boundary of the original cadence strictly after `now`
        let behind = now.duration_since(due).as_nanos() % self.interval.as_nanos();
        self.next_due = Some(now + (self.interval - Duration::from_nanos(behind as u64)));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_timer_never_fires() {
        let mut timer = RefreshTimer::default();
        assert!(!timer.is_active());
        assert!(!timer.poll(Instant::now() + Duration::from_secs(60)));
        assert_eq!(timer.time_until_due(Instant::now()), None);
    }

    #[test]
    fn test_fires_every_interval() {
        let t0 = Instant::now();
        let mut timer = RefreshTimer::new(Duration::from_secs(10));
        timer.start(t0);

        assert!(!timer.poll(t0 + Duration::from_secs(9)));
        assert!(timer.poll(t0 + Duration::from_secs(10)));
        assert!(!timer.poll(t0 + Duration::from_secs(11)));
        assert!(timer.poll(t0 + Duration::from_secs(20)));
    }

    #[test]
    fn test_missed_periods_fire_once() {
        let t0 = Instant::now();
        let mut timer = RefreshTimer::new(Duration::from_secs(10));
        timer.start(t0);

        assert!(timer.poll(t0 + Duration::from_secs(55)));
        assert!(!timer.poll(t0 + Duration::from_secs(56)));
        assert_eq!(
            timer.time_until_due(t0 + Duration::from_secs(56)),
            Some(Duration::from_secs(4))
        );
    }

    #[test]
    fn test_restart_replaces_schedule() {
        let t0 = Instant::now();
        let mut timer = RefreshTimer::new(Duration::from_secs(10));
        timer.start(t0);
        timer.start(t0 + Duration::from_secs(5));

        assert!(!timer.poll(t0 + Duration::from_secs(10)));
        assert!(timer.poll(t0 + Duration::from_secs(15)));
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let t0 = Instant::now();
        let mut timer = RefreshTimer::new(Duration::ZERO);
        assert_eq!(timer.interval(), MIN_REFRESH_INTERVAL);

        timer.start(t0);
        assert!(timer.poll(t0 + Duration::from_millis(1)));
        assert!(timer.poll(t0 + Duration::from_secs(3600)));
        assert_eq!(
            timer.time_until_due(t0 + Duration::from_secs(3600)),
            Some(MIN_REFRESH_INTERVAL)
        );
    }

    #[test]
    fn test_cancel_stops_firing() {
        let t0 = Instant::now();
        let mut timer = RefreshTimer::new(Duration::from_secs(1));
        timer.start(t0);
        timer.cancel();
        assert!(!timer.poll(t0 + Duration::from_secs(5)));
    }
}
