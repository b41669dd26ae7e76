//! Airport directory API client.

use std::sync::Arc;

use futures::future::join_all;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Deserialize;
use tokio::sync::Semaphore;
use tracing::debug;

use crate::domain::{Airport, IataCode};

use super::AirportResolver;
use super::error::AirportError;

/// Default base URL for the airport directory API.
const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Default number of codes per request.
const DEFAULT_CHUNK_SIZE: usize = 50;

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Wrapper for the airports response.
#[derive(Debug, Deserialize)]
pub struct AirportsResponse {
    pub airports: Vec<Airport>,
}

/// Configuration for the airport API client.
#[derive(Debug, Clone)]
pub struct AirportClientConfig {
    /// API key for x-apikey header authentication
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum IATA codes per request
    pub chunk_size: usize,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
}

impl AirportClientConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
        }
    }

    /// Set a custom base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the number of codes sent per request (at least 1).
    pub fn with_chunk_size(mut self, n: usize) -> Self {
        self.chunk_size = n.max(1);
        self
    }

    /// Set maximum concurrent requests (at least 1).
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n.max(1);
        self
    }
}

/// Client for the airport directory API.
///
/// Large code sets are split into chunks fetched concurrently, with a
/// semaphore bounding how many requests are in flight.
#[derive(Debug, Clone)]
pub struct AirportClient {
    http: reqwest::Client,
    base_url: String,
    chunk_size: usize,
    semaphore: Arc<Semaphore>,
}

impl AirportClient {
    /// Create a new airport API client.
    pub fn new(config: AirportClientConfig) -> Result<Self, AirportError> {
        let mut headers = HeaderMap::new();

        let api_key_header =
            HeaderValue::from_str(&config.api_key).map_err(|_| AirportError::Api {
                status: 0,
                message: "Invalid API key format".to_string(),
            })?;
        headers.insert(HeaderName::from_static("x-apikey"), api_key_header);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            chunk_size: config.chunk_size.max(1),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Fetch the airports for a set of IATA codes.
    ///
    /// Codes the directory does not know are simply absent from the result.
    /// Any failed chunk fails the whole call.
    pub async fn fetch_by_iata(&self, codes: &[IataCode]) -> Result<Vec<Airport>, AirportError> {
        if codes.is_empty() {
            return Ok(Vec::new());
        }

        let requests = codes.chunks(self.chunk_size).map(|chunk| self.fetch_chunk(chunk));
        let mut airports = Vec::new();
        for result in join_all(requests).await {
            airports.extend(result?);
        }

        debug!(
            requested = codes.len(),
            found = airports.len(),
            "fetched airports"
        );
        Ok(airports)
    }

    async fn fetch_chunk(&self, codes: &[IataCode]) -> Result<Vec<Airport>, AirportError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| AirportError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = airports_url(&self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("iata", iata_query(codes))])
            .send()
            .await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AirportError::Unauthorized);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AirportError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let response: AirportsResponse =
            serde_json::from_str(&body).map_err(|e| AirportError::Json {
                message: e.to_string(),
            })?;

        Ok(response.airports)
    }
}

impl AirportResolver for AirportClient {
    async fn resolve_by_iata(&self, codes: &[IataCode]) -> Result<Vec<Airport>, AirportError> {
        self.fetch_by_iata(codes).await
    }
}

fn airports_url(base_url: &str) -> String {
    format!("{}/airports", base_url)
}

/// Comma-separated code list for the `iata` query parameter.
fn iata_query(codes: &[IataCode]) -> String {
    codes
        .iter()
        .map(IataCode::as_str)
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = AirportClientConfig::new("test-api-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
    }

    #[test]
    fn config_builders() {
        let config = AirportClientConfig::new("test-api-key")
            .with_base_url("http://localhost:9000/")
            .with_timeout(5)
            .with_chunk_size(0)
            .with_max_concurrent(0);
        assert_eq!(config.base_url, "http://localhost:9000/");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.chunk_size, 1);
        assert_eq!(config.max_concurrent, 1);
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let client =
            AirportClient::new(AirportClientConfig::new("k").with_base_url("http://host/api/"))
                .unwrap();
        assert_eq!(airports_url(&client.base_url), "http://host/api/airports");
    }

    #[test]
    fn invalid_api_key_is_rejected() {
        let err = AirportClient::new(AirportClientConfig::new("bad\nkey")).unwrap_err();
        assert!(matches!(err, AirportError::Api { status: 0, .. }));
    }

    #[test]
    fn query_joins_codes() {
        let codes = [IataCode::parse("KUL").unwrap(), IataCode::parse("PEN").unwrap()];
        assert_eq!(iata_query(&codes), "KUL,PEN");
    }

    #[test]
    fn response_parses() {
        let body = r#"{"airports":[{"IATA":"KUL","name":"Kuala Lumpur"}]}"#;
        let response: AirportsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.airports.len(), 1);
        assert_eq!(response.airports[0].iata, "KUL");
    }

    #[test]
    fn response_tolerates_loose_records() {
        let body = r#"{"airports":[
            {"IATA":"KUL","altitude":"\\N","createdAt":"2024-01-01T00:00:00Z","__v":0},
            {"IATA":"PEN","latitude":5.297}
        ]}"#;
        let response: AirportsResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.airports.len(), 2);
        assert_eq!(response.airports[0].attributes["altitude"], "\\N");
        assert_eq!(response.airports[0].attributes["createdAt"], "2024-01-01T00:00:00Z");
        assert_eq!(response.airports[1].iata, "PEN");
    }

    #[tokio::test]
    async fn empty_request_makes_no_call() {
        // Unroutable base URL: any request would fail
        let client = AirportClient::new(
            AirportClientConfig::new("k").with_base_url("http://127.0.0.1:1"),
        )
        .unwrap();
        assert!(client.fetch_by_iata(&[]).await.unwrap().is_empty());
    }
}
