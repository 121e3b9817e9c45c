//! Schedule time parsing
//!
//! Publish requests may carry an ISO 8601 timestamp to defer execution. Only
//! timestamps that parse and land in the future defer a publish; a past
//! instant falls through to immediate dispatch.

use crate::{CrosspostError, Result};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Parse an ISO 8601 schedule time
///
/// Accepts RFC 3339 timestamps (`2025-11-20T15:00:00Z`,
/// `2025-11-20T15:00:00+09:00`) and offset-less timestamps
/// (`2025-11-20T15:00:00`), which are read as UTC.
///
/// # Errors
///
/// Returns `CrosspostError::InvalidInput` if the string is empty or does not
/// parse as a timestamp.
pub fn parse_schedule_time(input: &str) -> Result<DateTime<Utc>> {
    if input.is_empty() {
        return Err(CrosspostError::InvalidInput(
            "Schedule time cannot be empty".to_string(),
        ));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    Err(CrosspostError::InvalidInput(format!(
        "Could not parse schedule time: {}",
        input
    )))
}

/// Whether a schedule time defers execution relative to `now`
pub fn is_future(schedule_time: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    schedule_time > now
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc3339_utc() {
        let parsed = parse_schedule_time("2025-11-20T15:00:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 11, 20, 15, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_with_offset() {
        let parsed = parse_schedule_time("2025-11-20T15:00:00+09:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 11, 20, 6, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_timestamp_as_utc() {
        let parsed = parse_schedule_time("2025-11-20T15:00:00").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2025, 11, 20, 15, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_naive_timestamp_with_fraction() {
        let parsed = parse_schedule_time("2025-11-20T15:00:00.250").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_empty_string() {
        assert!(parse_schedule_time("").is_err());
    }

    #[test]
    fn test_parse_invalid_format() {
        let result = parse_schedule_time("next tuesday");
        assert!(result.is_err());

        let message = result.unwrap_err().to_string();
        assert!(message.contains("Could not parse schedule time"));
    }

    #[test]
    fn test_is_future() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 1).unwrap();
        let earlier = Utc.with_ymd_and_hms(2025, 6, 1, 11, 59, 59).unwrap();

        assert!(is_future(later, now));
        assert!(!is_future(earlier, now));
        assert!(!is_future(now, now));
    }
}
