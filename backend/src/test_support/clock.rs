//! Clock whose reading tests can move.

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Local, TimeDelta, Utc};
use mockable::Clock;

/// A [`Clock`] that stands still until told otherwise.
#[derive(Debug)]
pub struct MutableClock {
    now: Mutex<DateTime<Utc>>,
}

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn advances_and_resets() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("time");
        let clock = MutableClock::new(start);
        clock.advance(TimeDelta::hours(25));
        assert_eq!(clock.utc(), start + TimeDelta::hours(25));
        clock.set(start);
        assert_eq!(clock.utc(), start);
    }
}
