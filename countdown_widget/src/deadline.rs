use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

use crate::WidgetError;

/// ISO date-time layouts without an offset. These are read in the host's
/// local zone, the same as a browser reads them.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// ISO date-time with an offset but without seconds, which RFC 3339
/// does not allow.
const OFFSET_MINUTES_FORMAT: &str = "%Y-%m-%dT%H:%M%#z";

/// The instant at which the countdown reaches zero, in milliseconds since
/// the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Deadline {
    millis: i64,
}

impl Deadline {
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self { millis }
    }

    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.millis
    }

    /// Parse a deadline, reading offset-less date-times in the local zone.
    ///
    /// # Errors
    /// `WidgetError::InvalidDeadline` if `value` is not a recognised date.
    pub fn parse(value: &str) -> Result<Self, WidgetError> {
        Self::parse_in(value, &Local)
    }

    /// Parse a deadline, reading offset-less date-times in `tz`.
    ///
    /// Accepted, in order:
    /// - RFC 3339 (`2026-10-14T12:00:00Z`, `2026-10-14T12:00:00.5+02:00`)
    /// - ISO date-time with offset and no seconds (`2026-10-14T12:00Z`)
    /// - ISO date-time without offset, `T` or space separated, seconds and
    ///   fraction optional; ambiguous local times take the earliest instant
    /// - ISO date (`2026-10-14`), midnight UTC
    /// - RFC 2822 (`Wed, 14 Oct 2026 12:00:00 +0000`)
    ///
    /// # Errors
    /// `WidgetError::InvalidDeadline` if none of the above match, or the
    /// local time does not exist in `tz`.
    pub fn parse_in<Tz: TimeZone>(
        value: &str,
        tz: &Tz,
    ) -> Result<Self, WidgetError> {
        let trimmed = value.trim();
        let invalid = || WidgetError::InvalidDeadline {
            value: value.to_string(),
        };

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(Self::from_millis(dt.timestamp_millis()));
        }

        if let Ok(dt) = DateTime::parse_from_str(trimmed, OFFSET_MINUTES_FORMAT)
        {
            return Ok(Self::from_millis(dt.timestamp_millis()));
        }

        if let Some(naive) = LOCAL_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        {
            return tz
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| Self::from_millis(dt.timestamp_millis()))
                .ok_or_else(invalid);
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|naive| Self::from_millis(naive.and_utc().timestamp_millis()))
                .ok_or_else(invalid);
        }

        if let Ok(dt) = DateTime::parse_from_rfc2822(trimmed) {
            return Ok(Self::from_millis(dt.timestamp_millis()));
        }

        Err(invalid())
    }

    /// Milliseconds left at `now_ms`, zero once the deadline has passed.
    #[must_use]
    pub fn remaining_ms(self, now_ms: i64) -> u64 {
        u64::try_from(self.millis.saturating_sub(now_ms)).unwrap_or(0)
    }
}

impl FromStr for Deadline {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
