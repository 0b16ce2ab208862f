//! Textual timestamp format shared by ride data and configuration
//!
//! All simulation timestamps are naive local times with minute precision,
//! written as `YYYY-MM-DD HH:MM`.

use chrono::{NaiveDateTime, Timelike};

/// Datetime format of ride records and configured window bounds
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a timestamp in [`DATETIME_FORMAT`]. Single-digit hours are accepted.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), DATETIME_FORMAT)
}

/// Render a timestamp in [`DATETIME_FORMAT`]
pub fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

/// Whether the timestamp falls exactly on a minute boundary
pub fn is_whole_minute(value: &NaiveDateTime) -> bool {
    value.second() == 0 && value.nanosecond() == 0
}

/// Serde adapter for [`NaiveDateTime`] fields stored in [`DATETIME_FORMAT`]
pub mod serde_timestamp {
    use super::{format_timestamp, parse_timestamp};
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize a timestamp as `YYYY-MM-DD HH:MM`
    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(value))
    }

    /// Deserialize a timestamp from `YYYY-MM-DD HH:MM`
    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_timestamp(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_padded_and_unpadded_hours() {
        let expected = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2017-06-01 08:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2017-06-01 8:00").unwrap(), expected);
        assert_eq!(parse_timestamp(" 2017-06-01 08:00 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_rejects_other_formats() {
        assert!(parse_timestamp("2017/06/01 08:00").is_err());
        assert!(parse_timestamp("2017-06-01").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_format_timestamp() {
        let ts = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap().and_hms_opt(7, 5, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2017-06-01 07:05");
    }

    #[test]
    fn test_whole_minute_detection() {
        let day = NaiveDate::from_ymd_opt(2017, 6, 1).unwrap();
        assert!(is_whole_minute(&day.and_hms_opt(7, 5, 0).unwrap()));
        assert!(!is_whole_minute(&day.and_hms_opt(7, 5, 30).unwrap()));
    }
}
