use crate::domain::{Clock, Timestamp};
use chrono::{Duration, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

/// Clock that only moves when told to
///
/// Used by tests to pin timestamps or to move time backwards.
#[derive(Debug, Clone)]
pub struct FixedClock {
    inner: Arc<RwLock<Timestamp>>,
}

impl FixedClock {
    pub fn at(time: Timestamp) -> Self {
        FixedClock {
            inner: Arc::new(RwLock::new(time)),
        }
    }

    pub fn set(&self, time: Timestamp) {
        *self.inner.write() = time;
    }

    pub fn advance(&self, duration: Duration) {
        *self.inner.write() += duration;
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.inner.read()
    }

    fn name(&self) -> &str {
        "FixedClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_moves_only_on_request() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let clock = FixedClock::at(start);
        assert_eq!(clock.now(), start);

        clock.advance(Duration::seconds(5));
        assert_eq!(clock.now(), start + Duration::seconds(5));

        clock.set(start - Duration::hours(1));
        assert_eq!(clock.now(), start - Duration::hours(1));
    }
}
