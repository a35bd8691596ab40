//! Monotonic wall-clock timestamp generator
//!
//! Produces strictly increasing `DateTime<Utc>` values even when called from
//! many tasks in the same millisecond. `GameSession.created_at` ordering (and
//! therefore streak and leaderboard tie-breaking) depends on this guarantee.
//!
//! The guarantee is process-local: two server instances each have their own
//! last-value state.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;

/// Smallest step between two issued timestamps
const TICK: Duration = Duration::milliseconds(1);

/// Strictly increasing timestamp source
///
/// Returns the current wall-clock time unless that would not be strictly
/// greater than the last issued value, in which case it returns
/// `last + 1ms` instead.
#[derive(Debug, Default)]
pub struct MonotonicClock {
    last: Mutex<Option<DateTime<Utc>>>,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next timestamp, seeded from the current wall clock
    pub fn next(&self) -> DateTime<Utc> {
        self.next_from(Utc::now())
    }

    /// Issue the next timestamp, seeded from a caller-supplied candidate
    ///
    /// Returns `candidate` if it is strictly greater than the last issued
    /// value, otherwise `last + 1ms`. Callers use this to keep a meaningful
    /// session start time while still getting a unique, ordered value.
    pub fn next_from(&self, candidate: DateTime<Utc>) -> DateTime<Utc> {
        let mut last = self.last.lock();
        let issued = match *last {
            Some(prev) if candidate <= prev => prev + TICK,
            _ => candidate,
        };
        *last = Some(issued);
        issued
    }

    /// Clear internal state. Intended for test isolation only.
    pub fn reset(&self) {
        *self.last.lock() = None;
    }
}
