use serde::{Deserialize, Serialize};

/// Placeholder for any field that could not be determined.
pub const NOT_AVAILABLE: &str = "N/A";

// --- Records ---

/// One lab as extracted from its detail and contact pages.
///
/// `location` is a postal address, a map-service URL (when the page only
/// offered a map link) or [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabRecord {
    #[serde(rename = "Lab Name")]
    pub name: String,
    #[serde(rename = "Sectors", default)]
    pub sectors: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Institution", default = "not_available")]
    pub institution: String,
}

impl LabRecord {
    /// A record with only name and sectors known; location and institution
    /// start out as [`NOT_AVAILABLE`].
    pub fn new(name: impl Into<String>, sectors: &[String]) -> Self {
        Self {
            name: name.into(),
            sectors: sectors.join(", "),
            location: NOT_AVAILABLE.to_string(),
            institution: NOT_AVAILABLE.to_string(),
        }
    }

    pub fn has_location(&self) -> bool {
        self.location != NOT_AVAILABLE
    }
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A [`LabRecord`] after the geocoding pass. Latitude and longitude travel
/// together, so a record is either located or not.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedRecord {
    pub record: LabRecord,
    pub coordinates: Option<Coordinates>,
}

impl GeocodedRecord {
    pub fn new(record: LabRecord, coordinates: Option<Coordinates>) -> Self {
        Self {
            record,
            coordinates,
        }
    }

    pub fn latitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.latitude)
    }

    pub fn longitude(&self) -> Option<f64> {
        self.coordinates.map(|c| c.longitude)
    }
}

/// Flat row shape of the geocoded table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedRow {
    #[serde(rename = "Lab Name")]
    pub name: String,
    #[serde(rename = "Sectors")]
    pub sectors: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Institution")]
    pub institution: String,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
}

impl From<&GeocodedRecord> for GeocodedRow {
    fn from(geocoded: &GeocodedRecord) -> Self {
        let record = &geocoded.record;
        Self {
            name: record.name.clone(),
            sectors: record.sectors.clone(),
            location: record.location.clone(),
            institution: record.institution.clone(),
            latitude: geocoded.latitude(),
            longitude: geocoded.longitude(),
        }
    }
}
