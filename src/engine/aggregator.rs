//! Folds parsed values into per-day accumulators.
//!
//! Accumulators are created on the first record that lands in a bucket and
//! live until the pass finishes. Values are appended in encounter order.

use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::trace;

use super::reducer;
use crate::types::{DayBucket, ForecastError, ForecastReport, ParsedFields};

/// Running state for one live bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketAccumulator {
    pub label: String,
    pub rain_total: Decimal,
    pub temperatures: Vec<i32>,
    pub rain_chances: Vec<i32>,
    pub winds: Vec<i32>,
    pub gusts: Vec<i32>,
    pub humidities: Vec<i32>,
}

impl BucketAccumulator {
    /// Number of records folded in.
    pub fn len(&self) -> usize {
        self.temperatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.temperatures.is_empty()
    }

    fn push(&mut self, fields: &ParsedFields) -> Result<(), ForecastError> {
        self.rain_total = self
            .rain_total
            .checked_add(fields.rain_amount)
            .ok_or_else(|| ForecastError::NumericParse {
                field: "rain amount",
                value: fields.rain_amount.to_string(),
            })?;
        self.temperatures.push(fields.temperature);
        self.rain_chances.push(fields.rain_chance);
        self.winds.push(fields.wind);
        self.gusts.push(fields.gust);
        self.humidities.push(fields.humidity);
        Ok(())
    }
}

/// Per-pass set of accumulators, at most one per live bucket.
#[derive(Debug, Default)]
pub struct Aggregator {
    buckets: BTreeMap<DayBucket, BucketAccumulator>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record's values into its bucket. Discarded records are dropped.
    ///
    /// `weekday` labels the day-after bucket; the latest record wins.
    /// Fails if the bucket's rain total leaves the `Decimal` range.
    pub fn fold(
        &mut self,
        bucket: DayBucket,
        fields: &ParsedFields,
        weekday: &str,
    ) -> Result<(), ForecastError> {
        let label = match bucket {
            DayBucket::Discarded => return Ok(()),
            DayBucket::DayAfter => weekday.to_string(),
            live => live.to_string(),
        };

        let acc = self.buckets.entry(bucket).or_default();
        acc.push(fields)?;
        acc.label = label;
        trace!(%bucket, records = acc.len(), "Record folded");
        Ok(())
    }

    #[cfg(test)]
    fn get(&self, bucket: DayBucket) -> Option<&BucketAccumulator> {
        self.buckets.get(&bucket)
    }

    /// Number of buckets that received at least one record.
    #[cfg(test)]
    fn live_buckets(&self) -> usize {
        self.buckets.len()
    }

    /// Reduce every accumulator into the final report.
    pub fn finish(self) -> Result<ForecastReport, ForecastError> {
        let mut report = ForecastReport::default();
        for (bucket, acc) in &self.buckets {
            report.set(*bucket, reducer::reduce(*bucket, acc)?);
        }
        Ok(report)
    }
}
