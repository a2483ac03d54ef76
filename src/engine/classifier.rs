//! Maps a record's UTC timestamp to a day bucket.
//!
//! Both sides are truncated to the UTC calendar day before subtracting,
//! so the hour difference is always a whole multiple of 24.

use chrono::{NaiveDate, NaiveDateTime};

use crate::types::{DayBucket, ForecastError};

/// Fixed timestamp layout of the `utcTime` field.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse a record timestamp. No offset is accepted; the value is UTC.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, ForecastError> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|e| {
        ForecastError::TimestampParse {
            value: text.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Hours from the record's day to `today`. Future days are negative.
pub fn day_offset_hours(today: NaiveDate, record: NaiveDateTime) -> i64 {
    today.signed_duration_since(record.date()).num_hours()
}

/// Exact-match decision table: 0 / -24 / -48, everything else is discarded.
pub fn bucket_for_offset(diff_hours: i64) -> DayBucket {
    match diff_hours {
        0 => DayBucket::Today,
        -24 => DayBucket::Tomorrow,
        -48 => DayBucket::DayAfter,
        _ => DayBucket::Discarded,
    }
}

/// Classify a record timestamp relative to `today`.
pub fn classify(today: NaiveDate, timestamp: &str) -> Result<DayBucket, ForecastError> {
    let record = parse_timestamp(timestamp)?;
    Ok(bucket_for_offset(day_offset_hours(today, record)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
