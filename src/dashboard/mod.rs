//! Dashboard — Axum web server exposing the published summaries.
//!
//! Serves a small JSON API, a plain-text report, and a refresh trigger.
//! CORS enabled for local development.

pub mod routes;

use anyhow::{Context, Result};
use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

pub use routes::{AppState, DashboardState};

/// Bind the dashboard port on all interfaces.
pub async fn bind(port: u16) -> Result<TcpListener> {
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind dashboard port {port}"))?;
    let port = listener.local_addr()?.port();
    info!(port, "Dashboard server listening on http://localhost:{port}");
    Ok(listener)
}

/// Serve on an already-bound listener until the process exits.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, build_router(state))
        .await
        .context("Dashboard server error")
}

/// Start the dashboard in a background task. It doesn't block.
pub fn spawn_dashboard(listener: TcpListener, state: AppState) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = serve(listener, state).await {
            error!(error = %e, "Dashboard stopped");
        }
    })
}

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/api/summaries", get(routes::get_summaries))
        .route("/api/status", get(routes::get_status))
        .route("/api/refresh", post(routes::post_refresh))
        .route("/health", get(routes::health))
        .route("/", get(routes::get_report))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
