//! Core engine — the classify → parse → fold → reduce pass.
//!
//! Pure computation over an already-decoded record sequence. Holds no
//! process-wide state; every call to [`aggregate`] is an independent pass.

pub mod aggregator;
pub mod classifier;
pub mod parser;
pub mod reducer;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::types::{ForecastError, ForecastRecord, ForecastReport};
use aggregator::Aggregator;

/// What to do with a record whose numeric text does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadRecordPolicy {
    /// Fail the whole pass.
    #[default]
    Abort,
    /// Drop the record from aggregation and keep going.
    Skip,
}

/// Record counts for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassStats {
    pub records_seen: usize,
    pub records_folded: usize,
    pub records_discarded: usize,
    pub records_skipped: usize,
}

/// Result of a successful pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutcome {
    pub report: ForecastReport,
    pub stats: PassStats,
}

/// Run one aggregation pass over `records` relative to the UTC day `today`.
///
/// Timestamp errors always fail the pass. Numeric errors fail it under
/// [`BadRecordPolicy::Abort`] and drop the record under `Skip`. A rain total
/// that overflows fails the pass under either policy.
pub fn aggregate(
    records: &[ForecastRecord],
    today: NaiveDate,
    policy: BadRecordPolicy,
) -> Result<PassOutcome, ForecastError> {
    let mut agg = Aggregator::new();
    let mut stats = PassStats {
        records_seen: records.len(),
        ..PassStats::default()
    };

    for (index, record) in records.iter().enumerate() {
        let bucket = classifier::classify(today, &record.utc_timestamp)?;

        let fields = match parser::parse_record(record) {
            Ok(fields) => fields,
            Err(e) if policy == BadRecordPolicy::Skip => {
                warn!(index, error = %e, "Skipping unparseable record");
                stats.records_skipped += 1;
                continue;
            }
            Err(e) => return Err(e),
        };

        if bucket.is_live() {
            stats.records_folded += 1;
        } else {
            stats.records_discarded += 1;
        }
        agg.fold(bucket, &fields, &record.weekday_name)?;
    }

    let report = agg.finish()?;
    debug!(
        %today,
        seen = stats.records_seen,
        folded = stats.records_folded,
        discarded = stats.records_discarded,
        skipped = stats.records_skipped,
        "Aggregation pass complete"
    );

    Ok(PassOutcome { report, stats })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
