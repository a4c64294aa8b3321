//! Address to coordinates through the external geocoding API.
//!
//! One request per address, no retries. Anything that is not a clean "OK"
//! answer is logged and leaves the record without coordinates.

pub mod types;

pub use types::{GeocodeOutcome, GeocodeResponse};

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{info, instrument, warn};
use url::Url;

use crate::entities::{Coordinates, GeocodedRecord, LabRecord, NOT_AVAILABLE};
use crate::fetcher::{FetchError, get_client};
use crate::throttle::Throttle;

pub const GEOCODE_TIMEOUT: Duration = Duration::from_secs(15);

/// Whether a location string is worth sending to the provider.
///
/// Blank locations and the "N/A" placeholder count as missing. Anything
/// containing "http" is treated as a link rather than an address; this also
/// rejects the rare real address containing those letters.
pub fn is_geocodable(address: &str) -> bool {
    let address = address.trim();
    !address.is_empty() && address != NOT_AVAILABLE && !address.contains("http")
}

#[derive(Debug, Clone)]
pub struct Geocoder {
    endpoint: Url,
    api_key: String,
    timeout: Duration,
}

impl Geocoder {
    pub fn new(endpoint: Url, api_key: impl Into<String>) -> Self {
        Self {
            endpoint,
            api_key: api_key.into(),
            timeout: GEOCODE_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Coordinates for `address`, or `None` for any failure or skip.
    pub async fn geocode(&self, address: &str) -> Option<Coordinates> {
        self.lookup(address).await.coordinates()
    }

    #[instrument(skip(self), level = "debug")]
    pub async fn lookup(&self, address: &str) -> GeocodeOutcome {
        if !is_geocodable(address) {
            return GeocodeOutcome::Skipped;
        }

        let response = match get_client()
            .get(self.endpoint.clone())
            .query(&[("address", address), ("key", self.api_key.as_str())])
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let err = FetchError::from_reqwest_error(err);
                warn!(address, error = %err, "connection error while geocoding");
                return GeocodeOutcome::Failed(err.to_string());
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!(address, %status, "geocoding request failed");
            return GeocodeOutcome::Http(status);
        }

        let body: GeocodeResponse = match response.json().await {
            Ok(body) => body,
            Err(err) => {
                warn!(address, error = %err, "unreadable geocoding response");
                return GeocodeOutcome::Failed(err.to_string());
            }
        };

        if body.status != types::STATUS_OK {
            warn!(address, status = %body.status, "geocoding provider did not return OK");
            return GeocodeOutcome::Rejected(body.status);
        }

        match body.results.first() {
            Some(first) => GeocodeOutcome::Located(Coordinates {
                latitude: first.geometry.location.lat,
                longitude: first.geometry.location.lng,
            }),
            None => {
                warn!(address, "geocoding provider returned OK without results");
                GeocodeOutcome::NoResults
            }
        }
    }
}

/// Geocode every record in order, pausing `delay` after each one whether or
/// not a request was made.
pub async fn geocode_all(
    geocoder: &Geocoder,
    records: Vec<LabRecord>,
    throttle: &dyn Throttle,
    delay: Duration,
) -> Vec<GeocodedRecord> {
    let total = records.len();
    let mut geocoded = Vec::with_capacity(total);

    for (i, record) in records.into_iter().enumerate() {
        info!("[{}/{}] Geocoding: {}", i + 1, total, record.location);
        let coordinates = geocoder.geocode(&record.location).await;
        geocoded.push(GeocodedRecord::new(record, coordinates));
        throttle.pause(delay).await;
    }

    geocoded
}
