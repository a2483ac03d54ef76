//! Stub forecast source for integration testing.
//!
//! Provides a deterministic `ForecastSource` that serves queued responses
//! in order, all in-memory with no network.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use daycast::source::ForecastSource;
use daycast::types::{ForecastError, ForecastRecord};

type Response = Result<Vec<ForecastRecord>, ForecastError>;

/// Serves one queued response per fetch; clones handles share the queue.
#[derive(Clone, Default)]
pub struct StubSource {
    responses: Arc<Mutex<VecDeque<Response>>>,
    fetches: Arc<Mutex<usize>>,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_records(&self, records: Vec<ForecastRecord>) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(records));
        self
    }

    pub fn push_error(&self, err: ForecastError) -> &Self {
        self.responses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn fetch_count(&self) -> usize {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl ForecastSource for StubSource {
    async fn fetch_records(&self) -> Result<Vec<ForecastRecord>, ForecastError> {
        *self.fetches.lock().unwrap() += 1;
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ForecastError::Fetch("stub source exhausted".into())))
    }
}

/// Builder for hourly records with sensible defaults.
pub struct RecordBuilder {
    record: ForecastRecord,
}

impl RecordBuilder {
    pub fn at(utc: &str) -> Self {
        Self {
            record: ForecastRecord {
                temperature_text: "10".into(),
                rain_chance_text: "0".into(),
                rain_amount_text: "0.0".into(),
                wind_text: "5".into(),
                humidity_text: "70".into(),
                utc_timestamp: utc.into(),
                weekday_name: "Monday".into(),
            },
        }
    }

    /// Hour `hour` of `day`.
    pub fn on(day: NaiveDate, hour: u32) -> Self {
        Self::at(&format!("{day}T{hour:02}:00:00"))
    }

    pub fn temp(mut self, v: &str) -> Self {
        self.record.temperature_text = v.into();
        self
    }

    pub fn chance(mut self, v: &str) -> Self {
        self.record.rain_chance_text = v.into();
        self
    }

    pub fn rain(mut self, v: &str) -> Self {
        self.record.rain_amount_text = v.into();
        self
    }

    pub fn wind(mut self, v: &str) -> Self {
        self.record.wind_text = v.into();
        self
    }

    pub fn humid(mut self, v: &str) -> Self {
        self.record.humidity_text = v.into();
        self
    }

    pub fn weekday(mut self, v: &str) -> Self {
        self.record.weekday_name = v.into();
        self
    }

    pub fn build(self) -> ForecastRecord {
        self.record
    }
}

#[test]
fn test_stub_serves_in_order_then_exhausts() {
    let stub = StubSource::new();
    stub.push_records(vec![RecordBuilder::at("2024-01-01T00:00:00").build()])
        .push_error(ForecastError::Decode("second".into()));

    tokio_test::block_on(async {
        assert_eq!(stub.fetch_records().await.unwrap().len(), 1);
        assert!(matches!(stub.fetch_records().await, Err(ForecastError::Decode(_))));
        assert!(matches!(stub.fetch_records().await, Err(ForecastError::Fetch(_))));
    });
    assert_eq!(stub.fetch_count(), 3);
}
