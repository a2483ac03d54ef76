//! DAYCAST — hourly forecast digest.
//!
//! Entry point. Loads configuration, initialises structured logging, and
//! either prints a single fetch-and-report pass or serves the dashboard
//! with periodic refreshes and graceful shutdown.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use daycast::cli::Cli;
use daycast::config::{self, AppConfig};
use daycast::dashboard::{self, DashboardState};
use daycast::publish::{Refresher, SummaryStore};
use daycast::report;
use daycast::source::MetcheckClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (non-fatal if missing)
    let _ = dotenv::dotenv();

    let cli = Cli::parse();
    let cfg = AppConfig::load_or_default(&cli.config)?.with_url_override(cli.url.clone());

    init_logging(&cfg.logging);

    let source = MetcheckClient::new(cfg.source.url.clone(), cfg.source.timeout())
        .context("Failed to build forecast HTTP client")?;

    info!(
        url = source.url(),
        policy = ?cfg.source.on_bad_record,
        serve = cli.serve,
        "DAYCAST starting up"
    );
    let store = Arc::new(SummaryStore::new());
    let refresher = Refresher::new(Box::new(source), store, cfg.source.on_bad_record);

    if cli.serve {
        serve(refresher, &cfg).await
    } else {
        run_once(&refresher, cli.json).await
    }
}

/// One fetch → aggregate pass, printed to stdout.
async fn run_once(refresher: &Refresher, json: bool) -> Result<()> {
    let snapshot = refresher.refresh().await.context("Forecast pass failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot.report)?);
    } else {
        print!("{}", report::render(&snapshot.report));
    }
    Ok(())
}

/// Serve the dashboard and refresh on the configured interval until Ctrl+C.
async fn serve(refresher: Refresher, cfg: &AppConfig) -> Result<()> {
    let listener = dashboard::bind(cfg.server.port).await?;
    let state = Arc::new(DashboardState::new(refresher));
    let server = dashboard::spawn_dashboard(listener, state.clone());

    // A failed first pass is not fatal; the dashboard reports it.
    if let Err(e) = state.refresher.refresh().await {
        warn!(error = %e, "Initial refresh failed");
    }

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    if cfg.refresh.interval_secs == 0 {
        info!("Automatic refresh disabled. Press Ctrl+C to stop.");
        shutdown.await.context("Failed to listen for Ctrl+C")?;
    } else {
        let mut interval = tokio::time::interval(Duration::from_secs(cfg.refresh.interval_secs));
        // The first tick fires immediately and the initial pass already ran.
        interval.tick().await;

        info!(
            interval_secs = cfg.refresh.interval_secs,
            "Entering refresh loop. Press Ctrl+C to stop."
        );

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    // Failures are logged and recorded by the refresher.
                    let _ = state.refresher.refresh().await;
                }
                _ = &mut shutdown => {
                    break;
                }
            }
        }
    }

    info!("Shutdown signal received.");
    server.abort();
    Ok(())
}

/// Initialise the `tracing` subscriber.
fn init_logging(cfg: &config::LoggingConfig) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.filter));

    if cfg.json {
        fmt()
            .json()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_thread_ids(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .init();
    }
}
