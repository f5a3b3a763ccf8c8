//! Time source for stores
//!
//! Stores never read the system clock directly so tests can pin the date
//! and move across midnight.

use chrono::{DateTime, Duration, Local, NaiveDateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Current local wall-clock time, used for calendar days and HH:MM stamps
    fn local_now(&self) -> NaiveDateTime;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock. Local time equals UTC.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.guard() = now;
    }

    pub fn advance(&self, by: Duration) {
        *self.guard() += by;
    }

    /// A panic while holding the lock leaves a valid timestamp behind
    fn guard(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.guard()
    }

    fn local_now(&self) -> NaiveDateTime {
        self.now().naive_utc()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_fixed_clock_advances() {
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2026, 3, 1, 23, 30, 0).unwrap());
        clock.advance(Duration::hours(1));
        assert_eq!(clock.local_now().format("%Y-%m-%d %H:%M").to_string(), "2026-03-02 00:30");
    }

    #[test]
    fn test_fixed_clock_recovers_from_poisoned_lock() {
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let clock = FixedClock::new(start);
        let shared = clock.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.now.lock().unwrap();
            panic!("poison the clock");
        })
        .join();
        assert!(clock.now.is_poisoned());

        clock.advance(Duration::minutes(30));
        assert_eq!(clock.now(), start + Duration::minutes(30));
        clock.set(start);
        assert_eq!(clock.now(), start);
    }
}
