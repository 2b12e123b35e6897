//! Temporal values that chrono has no direct type for.

use chrono::{DateTime, FixedOffset, NaiveTime};

const NANOS_PER_SECOND: i128 = 1_000_000_000;

/// A wall-clock time with a fixed UTC offset (e.g. `21:21:00+04:00`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetTime {
    pub time: NaiveTime,
    pub offset: FixedOffset,
}

impl OffsetTime {
    pub fn new(time: NaiveTime, offset: FixedOffset) -> Self {
        Self { time, offset }
    }
}

/// A date-time with an offset and, optionally, the region id it was
/// resolved in (e.g. `Europe/Berlin`).
///
/// The zone id is carried verbatim; no time-zone database is consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonedDateTime {
    pub datetime: DateTime<FixedOffset>,
    pub zone: Option<String>,
}

impl ZonedDateTime {
    pub fn new(datetime: DateTime<FixedOffset>) -> Self {
        Self { datetime, zone: None }
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = Some(zone.into());
        self
    }
}

/// ISO 8601 duration (months, days, seconds, nanoseconds)
///
/// Months and days are kept apart from seconds because their length in
/// seconds depends on the calendar. `nanoseconds` always carries the sign
/// of `seconds` and stays below one second in magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IsoDuration {
    pub months: i64,
    pub days: i64,
    pub seconds: i64,
    pub nanoseconds: i32,
}

impl IsoDuration {
    /// Build a duration, folding whole seconds out of `nanoseconds`.
    ///
    /// Saturates at the `i64` second range.
    pub fn new(months: i64, days: i64, seconds: i64, nanoseconds: i64) -> Self {
        let total = seconds as i128 * NANOS_PER_SECOND + nanoseconds as i128;
        let secs = total / NANOS_PER_SECOND;
        let nanos = total % NANOS_PER_SECOND;
        Self {
            months,
            days,
            seconds: secs.clamp(i64::MIN as i128, i64::MAX as i128) as i64,
            nanoseconds: nanos as i32,
        }
    }

    pub fn of_months(months: i64) -> Self { Self::new(months, 0, 0, 0) }
    pub fn of_days(days: i64) -> Self { Self::new(0, days, 0, 0) }
    pub fn of_seconds(seconds: i64) -> Self { Self::new(0, 0, seconds, 0) }

    pub fn is_zero(&self) -> bool {
        self.months == 0 && self.days == 0 && self.seconds == 0 && self.nanoseconds == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_normalizes_nanos() {
        let d = IsoDuration::new(0, 0, 1, 2_500_000_000);
        assert_eq!(d.seconds, 3);
        assert_eq!(d.nanoseconds, 500_000_000);
    }

    #[test]
    fn test_duration_nanos_follow_seconds_sign() {
        let d = IsoDuration::new(0, 0, -1, 500_000_000);
        assert_eq!(d.seconds, 0);
        assert_eq!(d.nanoseconds, -500_000_000);
    }

    #[test]
    fn test_zero() {
        assert!(IsoDuration::default().is_zero());
        assert!(!IsoDuration::of_days(42).is_zero());
    }
}
