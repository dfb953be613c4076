use chrono::{Local, NaiveDate, NaiveDateTime};

/// Source of the current local date and time.
///
/// Handlers read "now" through this trait so history timestamps and age
/// calculations can be pinned in tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: NaiveDateTime,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_returns_given_instant() {
        let now = NaiveDate::from_ymd_opt(2025, 10, 2)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let clock: Box<dyn Clock> = Box::new(FixedClock::new(now));

        assert_eq!(clock.now(), now);
        assert_eq!(clock.today(), now.date());
    }

    #[test]
    fn system_clock_tracks_local_time() {
        let before = Local::now().naive_local();
        let now = SystemClock.now();

        assert!(now >= before);
    }
}
