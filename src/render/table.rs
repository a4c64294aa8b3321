use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::entities::{GeocodedRecord, GeocodedRow};
use crate::render::RenderError;
use crate::storage::write_rows;

const HEADER: [&str; 6] = [
    "Lab Name",
    "Sectors",
    "Location",
    "Institution",
    "Latitude",
    "Longitude",
];

/// Every record, located or not; missing coordinates are empty cells.
pub fn write_geocoded_table_to<W: Write>(
    writer: W,
    records: &[GeocodedRecord],
) -> Result<(), RenderError> {
    let rows: Vec<GeocodedRow> = records.iter().map(GeocodedRow::from).collect();
    write_rows(writer, &rows, Some(&HEADER))?;
    Ok(())
}

pub fn write_geocoded_table(path: &Path, records: &[GeocodedRecord]) -> Result<(), RenderError> {
    write_geocoded_table_to(File::create(path)?, records)
}
