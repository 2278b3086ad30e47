use std::cell::Cell;

use chrono::{DateTime, Duration, Utc};

/// Source of the current time for ids and record timestamps.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Cell<DateTime<Utc>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// Issues record ids derived from wall-clock milliseconds.
///
/// Ids are strictly increasing within a session and skip any value already
/// present in the target collection, so two creations in the same clock tick
/// still get distinct ids.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, now: DateTime<Utc>, taken: impl Fn(i64) -> bool) -> i64 {
        let mut id = now.timestamp_millis().max(self.last + 1);
        while taken(id) {
            id += 1;
        }
        self.last = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_id_is_clock_millis() {
        let mut ids = IdGenerator::new();
        let id = ids.next_id(t0(), |_| false);
        assert_eq!(id, t0().timestamp_millis());
    }

    #[test]
    fn test_same_tick_ids_differ() {
        let mut ids = IdGenerator::new();
        let a = ids.next_id(t0(), |_| false);
        let b = ids.next_id(t0(), |_| false);
        assert_eq!(b, a + 1);
    }

    #[test]
    fn test_skips_taken_ids() {
        let mut ids = IdGenerator::new();
        let base = t0().timestamp_millis();
        let id = ids.next_id(t0(), |id| id == base || id == base + 1);
        assert_eq!(id, base + 2);
    }

    #[test]
    fn test_clock_going_backwards_stays_monotonic() {
        let mut ids = IdGenerator::new();
        let a = ids.next_id(t0(), |_| false);
        let b = ids.next_id(t0() - Duration::seconds(5), |_| false);
        assert!(b > a);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(t0());
        clock.advance(Duration::milliseconds(250));
        assert_eq!(clock.now(), t0() + Duration::milliseconds(250));
        clock.set(t0());
        assert_eq!((&clock).now(), t0());
    }
}
