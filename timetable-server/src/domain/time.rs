//! Instant handling for journey queries.
//!
//! The provider speaks RFC 3339 timestamps with an explicit offset. Clients
//! are more relaxed: they may omit the offset (local wall-clock time) or the
//! time entirely (a bare date, read as midnight UTC).

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};

/// A point in time with the offset it was reported in.
///
/// Comparisons and differences between instants are absolute, regardless
/// of their offsets.
pub type Instant = DateTime<FixedOffset>;

/// Error returned when parsing an invalid instant string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid instant {input:?}: {reason}")]
pub struct InstantError {
    input: String,
    reason: &'static str,
}

impl InstantError {
    fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Date-time layouts accepted without an offset, tried in order.
const LOCAL_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an instant supplied by a client.
///
/// Accepted forms:
/// - RFC 3339 with offset (`2024-03-15T08:30:00+00:00`, `...Z`)
/// - date-time without offset, interpreted in the server's local zone
///   (`2024-03-15T08:30`, `2024-03-15 08:30:00`)
/// - a bare date, interpreted as midnight UTC (`2024-03-15`)
///
/// # Examples
///
/// ```
/// use timetable_server::domain::parse_instant;
///
/// let t = parse_instant("2024-03-15T08:30:00Z").unwrap();
/// assert_eq!(t.to_rfc3339(), "2024-03-15T08:30:00+00:00");
///
/// let d = parse_instant("2024-03-15").unwrap();
/// assert_eq!(d.to_rfc3339(), "2024-03-15T00:00:00+00:00");
///
/// assert!(parse_instant("tomorrow").is_err());
/// ```
pub fn parse_instant(s: &str) -> Result<Instant, InstantError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(InstantError::new(s, "empty"));
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
        return Ok(instant);
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::default()).and_utc().fixed_offset());
    }

    for format in LOCAL_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| local.fixed_offset())
                .ok_or_else(|| InstantError::new(s, "does not exist in the local time zone"));
        }
    }

    Err(InstantError::new(
        s,
        "expected RFC 3339, YYYY-MM-DDTHH:MM[:SS] or YYYY-MM-DD",
    ))
}

/// The current instant in the server's local zone.
pub fn now() -> Instant {
    Local::now().fixed_offset()
}
