//! Arrival time handling.
//!
//! The feed carries expected arrival times as ISO 8601 strings. This module
//! turns them into instants and decides whether they fall inside the rolling
//! window the dashboard displays.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Length of the rolling display window, in hours.
pub const WINDOW_HOURS: i64 = 24;

/// Date-time layouts accepted without an explicit offset. These are read as
/// local wall-clock time.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Error returned when an arrival time cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid arrival time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// Parse an expected arrival time.
///
/// Accepted forms:
/// - RFC 3339 with an offset (`2024-03-15T10:00:00Z`, `2024-03-15T10:00:00+05:30`)
/// - a date-time without offset (`2024-03-15T10:00:00` or `2024-03-15 10:00:00`),
///   read as local time
/// - a bare date (`2024-03-15`), read as UTC midnight
///
/// # Examples
///
/// ```
/// use train_dashboard::domain::parse_arrival;
///
/// let t = parse_arrival("2024-03-15T10:00:00Z").unwrap();
/// assert_eq!(t.to_rfc3339(), "2024-03-15T10:00:00+00:00");
///
/// assert!(parse_arrival("tomorrow").is_err());
/// assert!(parse_arrival("").is_err());
/// ```
pub fn parse_arrival(s: &str) -> Result<DateTime<Utc>, TimeError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(TimeError::new("empty timestamp"));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .ok_or_else(|| TimeError::new("local time does not exist"));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc())
            .ok_or_else(|| TimeError::new("invalid date"));
    }

    Err(TimeError::new("not an ISO 8601 timestamp"))
}

/// The rolling window of arrivals shown on the dashboard.
///
/// Both ends are inclusive: an arrival exactly at `now` and one exactly
/// [`WINDOW_HOURS`] later are both inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrivalWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ArrivalWindow {
    /// The window starting at `now`.
    pub fn rolling(now: DateTime<Utc>) -> Self {
        let end = now
            .checked_add_signed(Duration::hours(WINDOW_HOURS))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self { start: now, end }
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Whether `instant` lies in `[start, end]`.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        parse_arrival("2024-03-15T12:00:00Z").unwrap()
    }

    #[test]
    fn parse_rfc3339_utc() {
        let t = parse_arrival("2024-03-15T10:30:00Z").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap());
    }

    #[test]
    fn parse_rfc3339_offset() {
        let t = parse_arrival("2024-03-15T10:30:00+05:30").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 3, 15, 5, 0, 0).unwrap());
    }

    #[test]
    fn parse_fractional_seconds() {
        let t = parse_arrival("2024-03-15T10:30:00.250Z").unwrap();
        assert_eq!(t.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn parse_naive_as_local() {
        let naive = NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap();
        let expected = Local
            .from_local_datetime(&naive)
            .earliest()
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(parse_arrival("2024-03-15T10:30:00").unwrap(), expected);
        assert_eq!(parse_arrival("2024-03-15T10:30").unwrap(), expected);
        assert_eq!(parse_arrival("2024-03-15 10:30:00").unwrap(), expected);
        assert_eq!(parse_arrival("2024-03-15 10:30").unwrap(), expected);
    }

    #[test]
    fn space_separated_keeps_fraction() {
        let spaced = parse_arrival("2024-03-15 10:30:00.500").unwrap();
        assert_eq!(spaced.timestamp_subsec_millis(), 500);
    }

    #[test]
    fn parse_bare_date_as_utc_midnight() {
        let t = parse_arrival("2024-03-15").unwrap();
        assert_eq!(t, Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap());
    }

    #[test]
    fn parse_trims_whitespace() {
        assert!(parse_arrival("  2024-03-15T10:30:00Z ").is_ok());
    }

    #[test]
    fn reject_garbage() {
        assert!(parse_arrival("").is_err());
        assert!(parse_arrival("   ").is_err());
        assert!(parse_arrival("not a date").is_err());
        assert!(parse_arrival("2024-13-45T10:00:00Z").is_err());
        assert!(parse_arrival("10:30").is_err());
    }

    #[test]
    fn error_display() {
        let err = parse_arrival("nope").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid arrival time: not an ISO 8601 timestamp"
        );
    }

    #[test]
    fn window_bounds_inclusive() {
        let window = ArrivalWindow::rolling(now());
        assert!(window.contains(now()));
        assert!(window.contains(now() + Duration::hours(24)));
        assert!(window.contains(now() + Duration::hours(1)));
    }

    #[test]
    fn window_excludes_outside() {
        let window = ArrivalWindow::rolling(now());
        assert!(!window.contains(now() - Duration::seconds(1)));
        assert!(!window.contains(now() + Duration::hours(24) + Duration::seconds(1)));
        assert!(!window.contains(now() + Duration::hours(30)));
    }

    #[test]
    fn window_end_saturates() {
        let window = ArrivalWindow::rolling(DateTime::<Utc>::MAX_UTC);
        assert_eq!(window.end(), DateTime::<Utc>::MAX_UTC);
        assert!(window.contains(DateTime::<Utc>::MAX_UTC));
    }
}
