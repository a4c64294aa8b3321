use std::fs;
use std::path::Path;

use html_escape::encode_text;
use serde::Serialize;
use tracing::info;

use crate::config::MapView;
use crate::entities::GeocodedRecord;
use crate::render::{RenderError, located};

const LEAFLET_VERSION: &str = "1.9.4";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapOutcome {
    Written { markers: usize },
    /// Nothing had coordinates; no file was written.
    NoCoordinates,
}

#[derive(Debug, Serialize)]
struct Marker {
    lat: f64,
    lng: f64,
    popup: String,
    tooltip: String,
}

fn markers(records: &[GeocodedRecord]) -> Vec<Marker> {
    located(records)
        .map(|(geocoded, c)| {
            let record = &geocoded.record;
            Marker {
                lat: c.latitude,
                lng: c.longitude,
                popup: format!(
                    "<b>{}</b><br>{}",
                    encode_text(&record.name),
                    encode_text(&record.institution)
                ),
                // Leaflet renders tooltip strings as HTML too
                tooltip: encode_text(&record.name).into_owned(),
            }
        })
        .collect()
}

/// Standalone Leaflet page, or `None` when no record has coordinates.
pub fn render_map(records: &[GeocodedRecord], view: MapView) -> Result<Option<String>, RenderError> {
    let markers = markers(records);
    if markers.is_empty() {
        return Ok(None);
    }

    // Keep "</script>" inside a string from closing the script element
    let data = serde_json::to_string(&markers)?.replace("</", "<\\/");

    Ok(Some(format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Research labs</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@{version}/dist/leaflet.css">
  <script src="https://unpkg.com/leaflet@{version}/dist/leaflet.js"></script>
  <style>
    html, body {{ height: 100%; margin: 0; }}
    #map {{ height: 100%; width: 100%; }}
  </style>
</head>
<body>
  <div id="map"></div>
  <script>
    var map = L.map("map").setView([{lat}, {lng}], {zoom});
    L.tileLayer("https://{{s}}.tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
      maxZoom: 19,
      attribution: "&copy; OpenStreetMap contributors"
    }}).addTo(map);
    var markers = {data};
    markers.forEach(function (m) {{
      L.marker([m.lat, m.lng])
        .bindPopup(m.popup)
        .bindTooltip(m.tooltip)
        .addTo(map);
    }});
  </script>
</body>
</html>
"#,
        version = LEAFLET_VERSION,
        lat = view.latitude,
        lng = view.longitude,
        zoom = view.zoom,
        data = data,
    )))
}

pub fn write_map(
    path: &Path,
    records: &[GeocodedRecord],
    view: MapView,
) -> Result<MapOutcome, RenderError> {
    match render_map(records, view)? {
        Some(html) => {
            fs::write(path, html)?;
            info!("Interactive map saved to: {}", path.display());
            Ok(MapOutcome::Written {
                markers: located(records).count(),
            })
        }
        None => {
            info!("No valid coordinates found to map.");
            Ok(MapOutcome::NoCoordinates)
        }
    }
}
