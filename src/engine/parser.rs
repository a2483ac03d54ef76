//! Parses textual record values into typed numbers.
//!
//! Integer metrics parse as base-10 `i32`; rain amount parses as an exact
//! `Decimal`. Any failure is reported as `NumericParse` naming the field.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::types::{ForecastError, ForecastRecord, ParsedFields};

/// Text the gust value is read from.
///
/// The consumed payload has no separate gust field, so gust mirrors the
/// wind field. Swap this when a real gust field is decoded.
pub fn gust_text(record: &ForecastRecord) -> &str {
    &record.wind_text
}

fn parse_int(field: &'static str, text: &str) -> Result<i32, ForecastError> {
    text.parse::<i32>().map_err(|_| ForecastError::NumericParse {
        field,
        value: text.to_string(),
    })
}

fn parse_decimal(field: &'static str, text: &str) -> Result<Decimal, ForecastError> {
    Decimal::from_str(text).map_err(|_| ForecastError::NumericParse {
        field,
        value: text.to_string(),
    })
}

/// Parse all six numeric fields of a record.
pub fn parse_record(record: &ForecastRecord) -> Result<ParsedFields, ForecastError> {
    Ok(ParsedFields {
        temperature: parse_int("temperature", &record.temperature_text)?,
        rain_chance: parse_int("rain chance", &record.rain_chance_text)?,
        rain_amount: parse_decimal("rain amount", &record.rain_amount_text)?,
        wind: parse_int("wind", &record.wind_text)?,
        gust: parse_int("gust", gust_text(record))?,
        humidity: parse_int("humidity", &record.humidity_text)?,
    })
}
