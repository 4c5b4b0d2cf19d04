//! Time sources.

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::RwLock;

/// Source of the current time for issuance and expiry checks.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
///
/// # Example
///
/// ```
/// use chrono::TimeDelta;
/// use tubegate_token::{Clock, ManualClock};
///
/// let clock = ManualClock::starting_now();
/// let start = clock.now();
/// clock.advance(TimeDelta::minutes(16));
/// assert_eq!(clock.now() - start, TimeDelta::minutes(16));
/// ```
#[derive(Debug)]
pub struct ManualClock {
    now: RwLock<DateTime<Utc>>,
}

impl ManualClock {
    /// Start at a fixed instant.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    /// Start at the current wall-clock time.
    pub fn starting_now() -> Self {
        Self::new(Utc::now())
    }

    /// Move time forward (or backward, for a negative delta).
    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.now.write();
        *now += delta;
    }

    /// Jump to an instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.write() = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.read()
    }
}
