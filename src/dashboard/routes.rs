//! Dashboard API route handlers.
//!
//! State is shared via `Arc<DashboardState>`. Reads clone the published
//! snapshot `Arc`; a refresh runs its own pass and swaps it.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::publish::{RefreshFailure, Refresher, Snapshot};
use crate::report;

// ---------------------------------------------------------------------------
// Shared state
// ---------------------------------------------------------------------------

/// Shared state accessible by all route handlers.
pub struct DashboardState {
    pub refresher: Refresher,
}

impl DashboardState {
    pub fn new(refresher: Refresher) -> Self {
        Self { refresher }
    }
}

pub type AppState = Arc<DashboardState>;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub published: bool,
    pub pass_id: Option<Uuid>,
    pub refreshed_at: Option<DateTime<Utc>>,
    pub forecast_day: Option<NaiveDate>,
    pub last_failure: Option<RefreshFailure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { error: message.into() }))
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

/// GET /api/summaries
pub async fn get_summaries(State(state): State<AppState>) -> Result<Json<Snapshot>, ApiError> {
    match state.refresher.store().latest().await {
        Some(snapshot) => Ok(Json(Snapshot::clone(&snapshot))),
        None => Err(api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "No summaries published yet",
        )),
    }
}

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let (latest, last_failure) = state.refresher.store().status().await;
    Json(StatusResponse {
        published: latest.is_some(),
        pass_id: latest.as_ref().map(|s| s.pass_id),
        refreshed_at: latest.as_ref().map(|s| s.refreshed_at),
        forecast_day: latest.as_ref().map(|s| s.forecast_day),
        last_failure,
    })
}

/// POST /api/refresh
pub async fn post_refresh(State(state): State<AppState>) -> Result<Json<Snapshot>, ApiError> {
    state
        .refresher
        .refresh()
        .await
        .map(|snapshot| Json(Snapshot::clone(&snapshot)))
        .map_err(|e| api_error(StatusCode::BAD_GATEWAY, e.to_string()))
}

/// GET /
pub async fn get_report(State(state): State<AppState>) -> (StatusCode, String) {
    match state.refresher.store().latest().await {
        Some(snapshot) => (StatusCode::OK, report::render(&snapshot.report)),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            "No summaries published yet\n".to_string(),
        ),
    }
}

/// GET /health
pub async fn health() -> StatusCode {
    StatusCode::OK
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
