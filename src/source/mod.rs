//! Forecast sources.
//!
//! Defines the `ForecastSource` trait and the Metcheck JSON implementation.

pub mod metcheck;

use async_trait::async_trait;

use crate::types::{ForecastError, ForecastRecord};

pub use metcheck::{decode_payload, MetcheckClient};

/// Anything that can produce the ordered hourly record sequence for a pass.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Retrieve and decode the current forecast.
    async fn fetch_records(&self) -> Result<Vec<ForecastRecord>, ForecastError>;
}
