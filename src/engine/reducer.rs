//! Turns an accumulator into an immutable `DaySummary`.

use crate::types::{DayBucket, DaySummary, ForecastError, ValueRange};

use super::aggregator::BucketAccumulator;

/// Single linear scan; the first value seeds both ends.
pub fn min_max(values: &[i32]) -> Option<ValueRange> {
    let (first, rest) = values.split_first()?;
    let mut range = ValueRange { min: *first, max: *first };
    for &v in rest {
        if v < range.min {
            range.min = v;
        }
        if v > range.max {
            range.max = v;
        }
    }
    Some(range)
}

/// Reduce one bucket. An accumulator with no records is an error.
pub fn reduce(bucket: DayBucket, acc: &BucketAccumulator) -> Result<DaySummary, ForecastError> {
    let range = |values: &[i32]| min_max(values).ok_or(ForecastError::EmptyBucket(bucket));

    Ok(DaySummary {
        label: acc.label.clone(),
        rain_chance: range(&acc.rain_chances)?,
        rain_total: acc.rain_total,
        temperature: range(&acc.temperatures)?,
        wind: range(&acc.winds)?,
        gust: range(&acc.gusts)?,
        humidity: range(&acc.humidities)?,
    })
}
