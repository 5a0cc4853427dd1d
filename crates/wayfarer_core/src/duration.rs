//! Day-count derivation from trip dates.

use chrono::{DateTime, NaiveDate, Utc};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Parse a strict `YYYY-MM-DD` calendar date.
///
/// # Examples
///
/// ```
/// use wayfarer_core::parse_calendar_date;
///
/// assert!(parse_calendar_date("2025-01-01").is_some());
/// assert!(parse_calendar_date("01/01/2025").is_none());
/// assert!(parse_calendar_date("2025-1-1").is_none());
/// ```
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let shape_ok = value.len() == 10
        && value
            .char_indices()
            .all(|(i, c)| if i == 4 || i == 7 { c == '-' } else { c.is_ascii_digit() });
    if !shape_ok {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Parse a calendar date or a full RFC 3339 timestamp into an instant.
fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    if let Some(date) = parse_calendar_date(value) {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    DateTime::parse_from_rfc3339(value.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Whole days between two dates, rounded up, never less than one.
///
/// Order does not matter. Returns `None` if either value is not a date.
///
/// # Examples
///
/// ```
/// use wayfarer_core::days_between;
///
/// assert_eq!(days_between("2025-01-01", "2025-01-05"), Some(4));
/// assert_eq!(days_between("2025-01-01", "2025-01-01"), Some(1));
/// assert_eq!(days_between("soon", "2025-01-01"), None);
/// ```
pub fn days_between(start: &str, end: &str) -> Option<u32> {
    let start = parse_instant(start)?;
    let end = parse_instant(end)?;
    let millis = (end - start).num_milliseconds().abs();
    let days = (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY;
    Some(u32::try_from(days.max(1)).unwrap_or(u32::MAX))
}

/// Trip length as rendered into a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripDuration {
    /// Known number of days
    Days(u32),
    /// Dates were missing or unparseable
    Unknown,
}

impl From<Option<u32>> for TripDuration {
    fn from(days: Option<u32>) -> Self {
        days.map_or(TripDuration::Unknown, TripDuration::Days)
    }
}

impl std::fmt::Display for TripDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TripDuration::Days(days) => write!(f, "{}", days),
            TripDuration::Unknown => write!(f, "unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_dates_use_absolute_span() {
        assert_eq!(days_between("2025-01-05", "2025-01-01"), Some(4));
    }

    #[test]
    fn partial_days_round_up() {
        assert_eq!(
            days_between("2025-01-01T00:00:00Z", "2025-01-02T06:00:00Z"),
            Some(2)
        );
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        assert!(parse_calendar_date("2025-02-30").is_none());
        assert!(parse_calendar_date("2025-13-01").is_none());
    }

    #[test]
    fn unknown_duration_renders_placeholder() {
        assert_eq!(TripDuration::from(None).to_string(), "unknown");
        assert_eq!(TripDuration::from(Some(3)).to_string(), "3");
    }
}
