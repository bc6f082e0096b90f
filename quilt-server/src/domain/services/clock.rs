use crate::domain::value_objects::Timestamp;

/// Time source for store-assigned timestamps
///
/// Production uses the wall clock; tests substitute a fixed clock so
/// ordering can be exercised deterministically.
pub trait Clock: Send + Sync {
    /// Get current time from this clock's perspective
    fn now(&self) -> Timestamp;

    /// Get current time as microseconds since Unix epoch
    fn now_micros(&self) -> i64 {
        self.now().timestamp_micros()
    }

    /// Clock name for diagnostics
    fn name(&self) -> &str {
        "Clock"
    }
}
