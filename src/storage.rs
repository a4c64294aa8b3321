//! CSV tables passed between the two stages.
//!
//! Stage 1 writes the discovered URLs (a checkpoint) and the extracted lab
//! records. Stage 2 reads the records back. Every write replaces the file.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::entities::LabRecord;

const URL_HEADER: &str = "Lab URL";
const LOCATION_HEADER: &str = "Location";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{0} not found. Please run the scraper first.")]
    MissingInput(String),

    #[error("'Location' column missing from {0}")]
    MissingLocationColumn(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Serialize)]
struct UrlRow<'a> {
    #[serde(rename = "Lab URL")]
    url: &'a str,
}

/// Write `rows` with a header taken from `T`'s field names. An empty slice
/// still gets the header line when `header` is given.
pub(crate) fn write_rows<W: Write, T: Serialize>(
    writer: W,
    rows: &[T],
    header: Option<&[&str]>,
) -> Result<(), StorageError> {
    let mut out = csv::WriterBuilder::new()
        .has_headers(!rows.is_empty())
        .from_writer(writer);
    if rows.is_empty()
        && let Some(header) = header
    {
        out.write_record(header)?;
    }
    for row in rows {
        out.serialize(row)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_url_checkpoint_to<W: Write>(writer: W, urls: &[String]) -> Result<(), StorageError> {
    let rows: Vec<UrlRow<'_>> = urls.iter().map(|url| UrlRow { url }).collect();
    write_rows(writer, &rows, Some(&[URL_HEADER]))
}

pub fn write_url_checkpoint(path: &Path, urls: &[String]) -> Result<(), StorageError> {
    write_url_checkpoint_to(File::create(path)?, urls)
}

pub fn write_records_to<W: Write>(writer: W, records: &[LabRecord]) -> Result<(), StorageError> {
    write_rows(
        writer,
        records,
        Some(&["Lab Name", "Sectors", LOCATION_HEADER, "Institution"]),
    )
}

/// Write the intermediate table of extracted records.
pub fn write_records(path: &Path, records: &[LabRecord]) -> Result<(), StorageError> {
    write_records_to(File::create(path)?, records)
}

pub fn read_records_from<R: Read>(reader: R, source: &str) -> Result<Vec<LabRecord>, StorageError> {
    let mut rdr = csv::Reader::from_reader(reader);
    if !rdr.headers()?.iter().any(|h| h == LOCATION_HEADER) {
        return Err(StorageError::MissingLocationColumn(source.to_string()));
    }
    rdr.deserialize::<LabRecord>()
        .map(|row| row.map_err(StorageError::from))
        .collect()
}

/// Read the intermediate table written by [`write_records`].
pub fn read_records(path: &Path) -> Result<Vec<LabRecord>, StorageError> {
    if !path.exists() {
        return Err(StorageError::MissingInput(path.display().to_string()));
    }
    read_records_from(File::open(path)?, &path.display().to_string())
}
