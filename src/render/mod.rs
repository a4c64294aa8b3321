//! Output artifacts built from the geocoded records.
//!
//! The three renderers are independent: each reads the same slice and writes
//! its own file. Only the table includes records without coordinates.

pub mod kml;
pub mod map;
pub mod table;

pub use kml::write_kml;
pub use map::{MapOutcome, write_map};
pub use table::write_geocoded_table;

use thiserror::Error;

use crate::entities::{Coordinates, GeocodedRecord};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] crate::storage::StorageError),
}

/// Records that can be placed on a map, paired with their coordinates.
pub fn located(records: &[GeocodedRecord]) -> impl Iterator<Item = (&GeocodedRecord, Coordinates)> {
    records
        .iter()
        .filter_map(|r| r.coordinates.map(|c| (r, c)))
}
