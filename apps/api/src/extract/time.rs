use chrono::{DateTime, NaiveDateTime, Utc};

// CodeChef renders submission times as "21/03/24, 14:05:33"; older pages use
// an ISO-like "2024-03-21 14:05:33".
const PRIMARY_FORMAT: &str = "%d/%m/%y, %H:%M:%S";
const SECONDARY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses a submission timestamp, trying the primary display format and then
/// the secondary one. `None` means the caller should drop that one item, not
/// fail the request.
pub fn parse_submission_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    for format in [PRIMARY_FORMAT, SECONDARY_FORMAT] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    None
}

/// Converts a Unix timestamp (seconds) into a timezone-aware instant.
pub fn from_unix(seconds: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(seconds, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_primary_format() {
        let dt = parse_submission_time("21/03/24, 14:05:33").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 21));
    }

    #[test]
    fn test_secondary_format() {
        let dt = parse_submission_time("2024-03-21 14:05:33").unwrap();
        assert_eq!((dt.year(), dt.month(), dt.day()), (2024, 3, 21));
    }

    #[test]
    fn test_unparseable_returns_none() {
        assert!(parse_submission_time("yesterday").is_none());
        assert!(parse_submission_time("").is_none());
    }

    #[test]
    fn test_from_unix() {
        // 2021-01-01T00:00:00Z
        let dt = from_unix(1609459200).unwrap();
        assert_eq!((dt.year(), dt.month()), (2021, 1));
    }
}
