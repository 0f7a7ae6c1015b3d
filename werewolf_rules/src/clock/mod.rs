//! Time source for timestamping recorded events.
//!
//! Nothing in the memory layer reads the system time directly. A [`Clock`] is
//! injected at construction so tests can drive time with a [`ManualClock`].

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, Mutex};

/// Instant at which an event was recorded.
pub type Timestamp = DateTime<Utc>;

/// A source of the current time.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> Timestamp;
}

/// Shared handle to a clock, cloned into every store of a session.
pub type SharedClock = Arc<dyn Clock>;

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<Timestamp>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: Timestamp) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    /// Move the clock forward (or backward, for negative durations).
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = *current + by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(DateTime::<Utc>::default())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Wraps another clock so readings never go backwards.
///
/// If the inner clock steps back, the last reading is repeated instead.
#[derive(Debug)]
pub struct MonotonicClock {
    inner: SharedClock,
    last: Mutex<Option<Timestamp>>,
}

impl MonotonicClock {
    pub fn new(inner: SharedClock) -> Self {
        Self {
            inner,
            last: Mutex::new(None),
        }
    }

    /// Wrap `inner` and return it as a shared handle.
    pub fn shared(inner: SharedClock) -> SharedClock {
        Arc::new(Self::new(inner))
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Timestamp {
        let mut last = self.last.lock().unwrap_or_else(|e| e.into_inner());
        let reading = self.inner.now();
        let next = match *last {
            Some(previous) if previous > reading => previous,
            _ => reading,
        };
        *last = Some(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::default();
        let start = clock.now();

        clock.advance(Duration::seconds(30));

        assert_eq!(clock.now() - start, Duration::seconds(30));
    }

    #[test]
    fn test_monotonic_clock_never_steps_back() {
        let manual = Arc::new(ManualClock::default());
        let clock = MonotonicClock::new(manual.clone());

        manual.advance(Duration::minutes(5));
        let first = clock.now();

        manual.advance(Duration::minutes(-3));
        let second = clock.now();
        assert_eq!(second, first);

        manual.advance(Duration::minutes(10));
        assert!(clock.now() > first);
    }

    #[test]
    fn test_system_clock_is_recent() {
        let before = Utc::now();
        let reading = SystemClock.now();
        assert!(reading >= before);
    }
}
