//! Google Maps Geocoding API client.

use std::fmt;

use async_trait::async_trait;
use nearmap_core::{with_retry, Coordinate, GeocodeError, Geocoder, RetryPolicy};
use serde::Deserialize;

const DEFAULT_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// [`Geocoder`] backed by the Google Maps Geocoding API.
pub struct GoogleGeocoder {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    retry: RetryPolicy,
}

impl fmt::Debug for GoogleGeocoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleGeocoder")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

impl GoogleGeocoder {
    pub fn new(http: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: api_key.into(),
            retry: RetryPolicy::default(),
        }
    }

    /// Point at a different endpoint, used by tests against a local mock.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the retry budget.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[async_trait]
impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let response = with_retry(
            self.retry,
            || async {
                self.http
                    .get(&self.endpoint)
                    .query(&[("address", address), ("key", self.api_key.as_str())])
                    .send()
                    .await
                    .map_err(|e| GeocodeError::Request(e.to_string()))?
                    .error_for_status()
                    .map_err(|e| GeocodeError::Request(e.to_string()))
            },
            "geocoding lookup",
        )
        .await?;

        let body: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| GeocodeError::Malformed(e.to_string()))?;

        match body.status.as_str() {
            "OK" => {
                let location = body
                    .results
                    .first()
                    .map(|r| &r.geometry.location)
                    .ok_or_else(|| {
                        GeocodeError::Malformed("status OK with no results".to_string())
                    })?;
                Ok(Some(Coordinate::new(location.lat, location.lng)))
            }
            "ZERO_RESULTS" => Ok(None),
            other => Err(GeocodeError::Request(format!(
                "geocoding API returned status {other}"
            ))),
        }
    }
}
