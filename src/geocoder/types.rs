use reqwest::StatusCode;
use serde::Deserialize;

use crate::entities::Coordinates;

/// Status the provider reports for a successful lookup.
pub const STATUS_OK: &str = "OK";

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// What a single lookup came to. Only `Located` carries coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeOutcome {
    Located(Coordinates),
    /// The location is empty or looks like a URL; no request was made.
    Skipped,
    /// The provider answered with a status other than "OK".
    Rejected(String),
    /// "OK" but without any result to read.
    NoResults,
    Http(StatusCode),
    /// Transport failure or unreadable response body.
    Failed(String),
}

impl GeocodeOutcome {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match self {
            Self::Located(coordinates) => Some(*coordinates),
            _ => None,
        }
    }
}
