//! Promotion Schedules

use jiff::{Timestamp, civil::Date, tz::TimeZone};

const SECONDS_PER_DAY: i64 = 86_400;

/// When a promotion runs, and whether it has been switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    /// First instant the promotion may apply.
    pub starts_at: Timestamp,

    /// Last instant the promotion may apply.
    pub ends_at: Timestamp,

    /// Administrative on/off flag.
    pub is_active: bool,
}

impl Schedule {
    /// Create a schedule.
    #[must_use]
    pub const fn new(starts_at: Timestamp, ends_at: Timestamp, is_active: bool) -> Self {
        Self {
            starts_at,
            ends_at,
            is_active,
        }
    }

    /// Whether the schedule starts strictly before it ends.
    pub fn is_ordered(&self) -> bool {
        self.starts_at < self.ends_at
    }

    /// Whether the promotion applies at `instant`.
    ///
    /// Requires the flag to be set and `starts_at <= instant <= ends_at`.
    /// A flagged promotion outside its window is not live.
    pub fn is_live_at(&self, instant: Timestamp) -> bool {
        self.is_active && self.starts_at <= instant && instant <= self.ends_at
    }

    /// Whole days between start and end, truncated toward zero.
    pub fn whole_days(&self) -> i64 {
        self.ends_at.duration_since(self.starts_at).as_secs() / SECONDS_PER_DAY
    }

    /// Calendar date (UTC) on which the promotion starts.
    pub fn start_date(&self) -> Date {
        utc_date(self.starts_at)
    }
}

/// Calendar date (UTC) of `instant`.
pub fn utc_date(instant: Timestamp) -> Date {
    instant.to_zoned(TimeZone::UTC).date()
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use super::*;

    fn at(raw: &str) -> Result<Timestamp, jiff::Error> {
        raw.parse()
    }

    #[test]
    fn live_bounds_are_inclusive() -> TestResult {
        let schedule = Schedule::new(
            at("2026-03-01T00:00:00Z")?,
            at("2026-03-10T00:00:00Z")?,
            true,
        );

        assert!(schedule.is_live_at(at("2026-03-01T00:00:00Z")?));
        assert!(schedule.is_live_at(at("2026-03-05T12:00:00Z")?));
        assert!(schedule.is_live_at(at("2026-03-10T00:00:00Z")?));

        assert!(!schedule.is_live_at(at("2026-02-28T23:59:59Z")?));
        assert!(!schedule.is_live_at(at("2026-03-10T00:00:01Z")?));

        Ok(())
    }

    #[test]
    fn inactive_flag_is_never_live() -> TestResult {
        let schedule = Schedule::new(
            at("2026-03-01T00:00:00Z")?,
            at("2026-03-10T00:00:00Z")?,
            false,
        );

        assert!(!schedule.is_live_at(at("2026-03-05T00:00:00Z")?));

        Ok(())
    }

    #[test]
    fn whole_days_truncates_partial_days() -> TestResult {
        let starts_at = at("2026-03-01T00:00:00Z")?;

        let exact = Schedule::new(starts_at, starts_at + SignedDuration::from_hours(30 * 24), true);
        let partial = Schedule::new(
            starts_at,
            starts_at + SignedDuration::from_hours(30 * 24 + 23),
            true,
        );

        assert_eq!(exact.whole_days(), 30);
        assert_eq!(partial.whole_days(), 30);

        Ok(())
    }

    #[test]
    fn unordered_schedule_is_detected() -> TestResult {
        let instant = at("2026-03-01T00:00:00Z")?;

        assert!(!Schedule::new(instant, instant, true).is_ordered());
        assert!(
            !Schedule::new(instant, instant - SignedDuration::from_secs(1), true).is_ordered()
        );
        assert!(
            Schedule::new(instant, instant + SignedDuration::from_secs(1), true).is_ordered()
        );

        Ok(())
    }

    #[test]
    fn start_date_uses_utc_calendar() -> TestResult {
        let schedule = Schedule::new(
            at("2026-03-01T23:30:00-05:00")?,
            at("2026-03-05T00:00:00Z")?,
            true,
        );

        assert_eq!(schedule.start_date(), jiff::civil::date(2026, 3, 2));

        Ok(())
    }
}
