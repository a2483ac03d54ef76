//! Published summaries and the refresh pass that replaces them.
//!
//! The store holds one immutable `Snapshot` behind an `Arc`. A refresh runs
//! a full fetch → decode → aggregate pass and swaps the `Arc` only when the
//! pass succeeds, so readers never see a partially updated report and a
//! failed pass leaves the previous snapshot in place.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::engine::{self, BadRecordPolicy, PassStats};
use crate::source::ForecastSource;
use crate::types::{ForecastError, ForecastReport};

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Output of one successful pass.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub pass_id: Uuid,
    /// Start order of the pass; later passes have larger values.
    pub sequence: u64,
    pub refreshed_at: DateTime<Utc>,
    /// UTC day the records were classified against.
    pub forecast_day: NaiveDate,
    pub report: ForecastReport,
    pub stats: PassStats,
}

/// Last failed pass, kept for status reporting.
#[derive(Debug, Clone, Serialize)]
pub struct RefreshFailure {
    pub sequence: u64,
    pub failed_at: DateTime<Utc>,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct StoreState {
    latest: Option<Arc<Snapshot>>,
    last_failure: Option<RefreshFailure>,
}

impl StoreState {
    fn latest_sequence(&self) -> u64 {
        self.latest.as_ref().map_or(0, |s| s.sequence)
    }
}

/// Many-reader holder of the latest snapshot and the last failure.
///
/// Both live under one lock. Results from a pass that started before the
/// published one are dropped, so a slow pass never overwrites newer state.
#[derive(Debug, Default)]
pub struct SummaryStore {
    state: RwLock<StoreState>,
    passes: AtomicU64,
}

impl SummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the sequence number for a pass that is about to start.
    pub fn begin_pass(&self) -> u64 {
        self.passes.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// The most recently published snapshot, if any pass has succeeded.
    pub async fn latest(&self) -> Option<Arc<Snapshot>> {
        self.state.read().await.latest.clone()
    }

    pub async fn last_failure(&self) -> Option<RefreshFailure> {
        self.state.read().await.last_failure.clone()
    }

    /// Both fields read under one lock.
    pub async fn status(&self) -> (Option<Arc<Snapshot>>, Option<RefreshFailure>) {
        let state = self.state.read().await;
        (state.latest.clone(), state.last_failure.clone())
    }

    /// Replace the published snapshot and clear any older failure.
    ///
    /// Returns the snapshot that is published afterwards, which is the
    /// current one if `snapshot` comes from an older pass.
    pub async fn publish(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let mut state = self.state.write().await;
        if let Some(current) = state.latest.as_ref().filter(|c| c.sequence > snapshot.sequence) {
            debug!(
                stale = snapshot.sequence,
                current = current.sequence,
                "Dropping snapshot from an older pass"
            );
            return Arc::clone(current);
        }

        let snapshot = Arc::new(snapshot);
        state.latest = Some(Arc::clone(&snapshot));
        if state
            .last_failure
            .as_ref()
            .is_some_and(|f| f.sequence < snapshot.sequence)
        {
            state.last_failure = None;
        }
        snapshot
    }

    /// Record a failed pass. The published snapshot is untouched, and a
    /// failure older than it is ignored.
    pub async fn record_failure(&self, sequence: u64, err: &ForecastError) {
        let mut state = self.state.write().await;
        let newest_failure = state.last_failure.as_ref().map_or(0, |f| f.sequence);
        if sequence < state.latest_sequence() || sequence < newest_failure {
            debug!(sequence, "Ignoring failure from an older pass");
            return;
        }
        state.last_failure = Some(RefreshFailure {
            sequence,
            failed_at: Utc::now(),
            message: err.to_string(),
        });
    }
}

// ---------------------------------------------------------------------------
// Refresher
// ---------------------------------------------------------------------------

/// Runs passes against a source and publishes successful results.
pub struct Refresher {
    source: Box<dyn ForecastSource>,
    store: Arc<SummaryStore>,
    policy: BadRecordPolicy,
}

impl Refresher {
    pub fn new(
        source: Box<dyn ForecastSource>,
        store: Arc<SummaryStore>,
        policy: BadRecordPolicy,
    ) -> Self {
        Self {
            source,
            store,
            policy,
        }
    }

    pub fn store(&self) -> &Arc<SummaryStore> {
        &self.store
    }

    /// Run a pass for the current UTC day.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, ForecastError> {
        self.refresh_for(Utc::now().date_naive()).await
    }

    /// Run a pass classifying records against `today`.
    pub async fn refresh_for(&self, today: NaiveDate) -> Result<Arc<Snapshot>, ForecastError> {
        let pass_id = Uuid::new_v4();
        let sequence = self.store.begin_pass();
        info!(%pass_id, sequence, %today, "Starting refresh pass");

        match self.run_pass(today).await {
            Ok((report, stats)) => {
                let snapshot = self
                    .store
                    .publish(Snapshot {
                        pass_id,
                        sequence,
                        refreshed_at: Utc::now(),
                        forecast_day: today,
                        report,
                        stats,
                    })
                    .await;
                info!(
                    %pass_id,
                    days = snapshot.report.days().count(),
                    folded = snapshot.stats.records_folded,
                    "Summaries published"
                );
                Ok(snapshot)
            }
            Err(e) => {
                error!(%pass_id, error = %e, "Refresh pass failed; keeping previous summaries");
                self.store.record_failure(sequence, &e).await;
                Err(e)
            }
        }
    }

    async fn run_pass(
        &self,
        today: NaiveDate,
    ) -> Result<(ForecastReport, PassStats), ForecastError> {
        let records = self.source.fetch_records().await?;
        let outcome = engine::aggregate(&records, today, self.policy)?;
        Ok((outcome.report, outcome.stats))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
