//! Metcheck forecast client.
//!
//! Fetches the v9 JSON forecast and decodes the hourly records out of
//! `metcheckData.forecastLocation.forecast`. Numeric values stay as text.
//!
//! Auth: None required.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::ForecastSource;
use crate::types::{ForecastError, ForecastRecord};

/// Default endpoint (North Yorkshire location).
pub const DEFAULT_URL: &str =
    "http://ws1.metcheck.com/ENGINE/v9_0/json.asp?lat=53.9&lon=-1.6&lid=67633&Fc=No";

const USER_AGENT: &str = concat!("DAYCAST/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// Payload shape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetcheckPayload {
    metcheck_data: MetcheckData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetcheckData {
    forecast_location: ForecastLocation,
}

#[derive(Debug, Deserialize)]
struct ForecastLocation {
    forecast: Vec<ForecastRecord>,
}

/// Decode a raw payload into its ordered record sequence.
pub fn decode_payload(body: &str) -> Result<Vec<ForecastRecord>, ForecastError> {
    let payload: MetcheckPayload = serde_json::from_str(body)?;
    Ok(payload.metcheck_data.forecast_location.forecast)
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for one configured Metcheck URL.
pub struct MetcheckClient {
    http: Client,
    url: String,
}

impl MetcheckClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ForecastError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ForecastSource for MetcheckClient {
    async fn fetch_records(&self) -> Result<Vec<ForecastRecord>, ForecastError> {
        debug!(url = %self.url, "Fetching forecast");

        let resp = self.http.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ForecastError::Fetch(format!("Metcheck API error: {status}")));
        }

        let body = resp.text().await?;
        let records = decode_payload(&body)?;

        info!(count = records.len(), bytes = body.len(), "Forecast records decoded");
        Ok(records)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
