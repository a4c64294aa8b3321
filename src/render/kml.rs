use std::fs;
use std::io::Write;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use tracing::info;

use crate::entities::{Coordinates, GeocodedRecord};
use crate::render::{RenderError, located};

const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// KML document with one placemark per located record.
pub fn render_kml(records: &[GeocodedRecord]) -> Result<String, RenderError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("kml").with_attributes([("xmlns", KML_NAMESPACE)]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("Document")))?;

    for (geocoded, coordinates) in located(records) {
        write_placemark(&mut writer, geocoded, coordinates)?;
    }

    writer.write_event(Event::End(BytesEnd::new("Document")))?;
    writer.write_event(Event::End(BytesEnd::new("kml")))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_placemark<W: Write>(
    writer: &mut Writer<W>,
    geocoded: &GeocodedRecord,
    coordinates: Coordinates,
) -> Result<(), RenderError> {
    let record = &geocoded.record;
    let description = format!(
        "Institution: {}\nSectors: {}",
        record.institution, record.sectors
    );
    // KML orders coordinates longitude first
    let point = format!("{},{},0", coordinates.longitude, coordinates.latitude);

    writer.write_event(Event::Start(BytesStart::new("Placemark")))?;
    text_element(writer, "name", &record.name)?;
    text_element(writer, "description", &description)?;
    writer.write_event(Event::Start(BytesStart::new("Point")))?;
    text_element(writer, "coordinates", &point)?;
    writer.write_event(Event::End(BytesEnd::new("Point")))?;
    writer.write_event(Event::End(BytesEnd::new("Placemark")))?;
    Ok(())
}

fn text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<(), RenderError> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

pub fn write_kml(path: &Path, records: &[GeocodedRecord]) -> Result<(), RenderError> {
    fs::write(path, render_kml(records)?)?;
    info!("KML file saved to: {}", path.display());
    Ok(())
}
