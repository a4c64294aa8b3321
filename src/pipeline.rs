//! The two stages, each run start to finish by its own binary.

use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use crate::config::Config;
use crate::discovery::discover;
use crate::extractor::extract;
use crate::fetcher::Fetcher;
use crate::geocoder::{Geocoder, geocode_all};
use crate::render::{self, MapOutcome};
use crate::storage;
use crate::throttle::Throttle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlSummary {
    pub discovered: usize,
    pub extracted: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeocodeSummary {
    pub total: usize,
    pub located: usize,
    pub map: MapOutcome,
}

/// Stage 1: discover lab URLs, extract each one and persist the records.
///
/// The URL checkpoint is written before extraction starts. Detail pages that
/// cannot be fetched are left out of the table.
pub async fn crawl(config: &Config, fetcher: &Fetcher, throttle: &dyn Throttle) -> Result<CrawlSummary> {
    fs::create_dir_all(config.data_dir())
        .with_context(|| format!("creating {}", config.data_dir().display()))?;

    info!("Starting link discovery...");
    let lab_urls = discover(config, fetcher, throttle).await;
    storage::write_url_checkpoint(&config.urls_path(), &lab_urls)
        .with_context(|| format!("writing {}", config.urls_path().display()))?;
    info!("Discovery complete. {} labs found.", lab_urls.len());

    let total = lab_urls.len();
    let mut lab_details = Vec::with_capacity(total);
    for (i, url) in lab_urls.iter().enumerate() {
        info!("[{}/{}] Processing: {}", i + 1, total, url);
        if let Some(record) = extract(url, config.root_url(), fetcher).await {
            lab_details.push(record);
        }
        throttle.pause(config.delays().detail_page).await;
    }

    storage::write_records(&config.details_path(), &lab_details)
        .with_context(|| format!("writing {}", config.details_path().display()))?;
    info!("Scraping completed successfully.");

    Ok(CrawlSummary {
        discovered: total,
        extracted: lab_details.len(),
    })
}

/// Stage 2: geocode the persisted records and write the table, KML and map.
pub async fn geocode(config: &Config, geocoder: &Geocoder, throttle: &dyn Throttle) -> Result<GeocodeSummary> {
    let records = storage::read_records(&config.details_path())?;

    info!("Starting geocoding process...");
    let geocoded = geocode_all(geocoder, records, throttle, config.delays().geocode_call).await;

    render::write_geocoded_table(&config.geocoded_csv_path(), &geocoded)
        .with_context(|| format!("writing {}", config.geocoded_csv_path().display()))?;
    info!("Geocoded data saved to: {}", config.geocoded_csv_path().display());

    render::write_kml(&config.kml_path(), &geocoded)
        .with_context(|| format!("writing {}", config.kml_path().display()))?;
    let map = render::write_map(&config.map_path(), &geocoded, config.map_view())
        .with_context(|| format!("writing {}", config.map_path().display()))?;

    info!("All tasks completed successfully.");
    Ok(GeocodeSummary {
        total: geocoded.len(),
        located: render::located(&geocoded).count(),
        map,
    })
}
