//! Shared types for DAYCAST.
//!
//! These types form the data model used across all modules: the raw
//! hourly record handed over by the source, the day buckets the engine
//! sorts records into, and the summaries it hands to renderers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Raw records
// ---------------------------------------------------------------------------

/// One hourly forecast sample, exactly as the payload carries it.
///
/// Every numeric value arrives as JSON text. Parsing happens later in the
/// engine so that a decode failure and a parse failure stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRecord {
    /// Air temperature, °C.
    #[serde(rename = "temperature")]
    pub temperature_text: String,
    /// Chance of rain, %.
    #[serde(rename = "chanceofrain")]
    pub rain_chance_text: String,
    /// Rain amount, mm/hr.
    #[serde(rename = "rain")]
    pub rain_amount_text: String,
    /// Wind speed, mph.
    #[serde(rename = "windgustspeed")]
    pub wind_text: String,
    /// Relative humidity, %.
    #[serde(rename = "humidity")]
    pub humidity_text: String,
    /// `YYYY-MM-DDTHH:MM:SS`, no offset, implicitly UTC.
    #[serde(rename = "utcTime")]
    pub utc_timestamp: String,
    /// Weekday name, used as the label of the day-after bucket.
    #[serde(rename = "weekday")]
    pub weekday_name: String,
}

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

/// Day-relative target for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayBucket {
    Today,
    Tomorrow,
    DayAfter,
    /// In the past or more than two days out.
    Discarded,
}

impl DayBucket {
    /// The buckets that produce summaries, in report order.
    pub const LIVE: &'static [DayBucket] =
        &[DayBucket::Today, DayBucket::Tomorrow, DayBucket::DayAfter];

    pub fn is_live(&self) -> bool {
        !matches!(self, DayBucket::Discarded)
    }
}

impl fmt::Display for DayBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayBucket::Today => write!(f, "Today"),
            DayBucket::Tomorrow => write!(f, "Tomorrow"),
            DayBucket::DayAfter => write!(f, "Day after"),
            DayBucket::Discarded => write!(f, "Discarded"),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsed values and summaries
// ---------------------------------------------------------------------------

/// Numeric values of one record after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFields {
    pub temperature: i32,
    pub rain_chance: i32,
    pub rain_amount: Decimal,
    pub wind: i32,
    pub gust: i32,
    pub humidity: i32,
}

/// Inclusive (min, max) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: i32,
    pub max: i32,
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

/// Reduced statistics for one day.
///
/// Field order is the display order renderers rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySummary {
    pub label: String,
    pub rain_chance: ValueRange,
    pub rain_total: Decimal,
    pub temperature: ValueRange,
    pub wind: ValueRange,
    pub gust: ValueRange,
    pub humidity: ValueRange,
}

/// Up to three day summaries. A bucket with no records is absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub today: Option<DaySummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tomorrow: Option<DaySummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_after: Option<DaySummary>,
}

impl ForecastReport {
    /// Summary for a bucket, if that bucket received records.
    pub fn get(&self, bucket: DayBucket) -> Option<&DaySummary> {
        match bucket {
            DayBucket::Today => self.today.as_ref(),
            DayBucket::Tomorrow => self.tomorrow.as_ref(),
            DayBucket::DayAfter => self.day_after.as_ref(),
            DayBucket::Discarded => None,
        }
    }

    pub(crate) fn set(&mut self, bucket: DayBucket, summary: DaySummary) {
        match bucket {
            DayBucket::Today => self.today = Some(summary),
            DayBucket::Tomorrow => self.tomorrow = Some(summary),
            DayBucket::DayAfter => self.day_after = Some(summary),
            DayBucket::Discarded => {}
        }
    }

    /// Present summaries in report order.
    pub fn days(&self) -> impl Iterator<Item = &DaySummary> {
        [&self.today, &self.tomorrow, &self.day_after]
            .into_iter()
            .filter_map(Option::as_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.days().next().is_none()
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Everything that can fail a pass.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid timestamp '{value}': {reason}")]
    TimestampParse { value: String, reason: String },

    #[error("Invalid {field} value '{value}'")]
    NumericParse { field: &'static str, value: String },

    #[error("Cannot reduce empty bucket: {0}")]
    EmptyBucket(DayBucket),
}

impl From<reqwest::Error> for ForecastError {
    fn from(e: reqwest::Error) -> Self {
        ForecastError::Fetch(e.to_string())
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(e: serde_json::Error) -> Self {
        ForecastError::Decode(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
