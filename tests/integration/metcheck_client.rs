//! Integration tests for MetcheckClient using wiremock.

use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use daycast::source::{ForecastSource, MetcheckClient};
use daycast::types::ForecastError;

fn record(utc: &str, temp: &str) -> serde_json::Value {
    serde_json::json!({
        "temperature": temp,
        "chanceofrain": "20",
        "rain": "0.1",
        "windgustspeed": "14",
        "humidity": "77",
        "utcTime": utc,
        "weekday": "Tue",
        "winddirection": "240"
    })
}

fn client_for(server: &MockServer, route: &str) -> MetcheckClient {
    MetcheckClient::new(format!("{}{route}", server.uri()), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_fetch_records_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ENGINE/v9_0/json.asp"))
        .and(query_param("lat", "53.9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "metcheckData": {
                "forecastLocation": {
                    "forecast": [
                        record("2024-01-02T00:00:00", "4"),
                        record("2024-01-02T01:00:00", "3"),
                    ]
                }
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, "/ENGINE/v9_0/json.asp?lat=53.9&lon=-1.6");
    let records = client.fetch_records().await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].temperature_text, "4");
    assert_eq!(records[1].utc_timestamp, "2024-01-02T01:00:00");
    assert_eq!(records[1].weekday_name, "Tue");
}

#[tokio::test]
async fn test_fetch_non_success_status_is_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server, "/forecast").fetch_records().await.unwrap_err();
    match err {
        ForecastError::Fetch(msg) => assert!(msg.contains("503")),
        other => panic!("Expected Fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_wrong_shape_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "metcheckData": { "forecastLocation": { "forecast": "unavailable" } }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server, "/forecast").fetch_records().await.unwrap_err();
    assert!(matches!(err, ForecastError::Decode(_)));
}

#[tokio::test]
async fn test_fetch_numbers_instead_of_text_is_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "metcheckData": { "forecastLocation": { "forecast": [{
                "temperature": 4, "chanceofrain": "20", "rain": "0.1",
                "windgustspeed": "14", "humidity": "77",
                "utcTime": "2024-01-02T00:00:00", "weekday": "Tue"
            }] } }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server, "/forecast").fetch_records().await.unwrap_err();
    assert!(matches!(err, ForecastError::Decode(_)));
}

#[tokio::test]
async fn test_unmatched_route_is_fetch_error() {
    let server = MockServer::start().await;

    let err = client_for(&server, "/missing").fetch_records().await.unwrap_err();
    match err {
        ForecastError::Fetch(msg) => assert!(msg.contains("404")),
        other => panic!("Expected Fetch error, got {other:?}"),
    }
}
