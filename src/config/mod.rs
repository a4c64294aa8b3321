//! Run configuration for both pipeline stages.
//!
//! The listing site, page count and geocoding endpoint are fixed constants.
//! Only the API key and the data directory come from the environment, which
//! may be seeded from a `.env` file. The `with_*` builders exist so tests can point the pipeline at mock servers
//! and temporary directories.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

pub const ENV_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_DATA_DIR: &str = "LABMAP_DATA_DIR";

pub const ROOT_URL: &str = "https://navigator.innovation.ca";
pub const SEARCH_PATH: &str = "/en/search?f%5B0%5D=province%3A2100&page=";
pub const TOTAL_SEARCH_PAGES: u32 = 44;
pub const GEOCODE_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

const DEFAULT_DATA_DIR: &str = "data";

const URLS_FILE: &str = "lab_urls.csv";
const DETAILS_FILE: &str = "lab_details.csv";
const GEOCODED_CSV_FILE: &str = "ON_labs_geocoded.csv";
const KML_FILE: &str = "ON_labs_geocoded.kml";
const MAP_FILE: &str = "ON_labs_map.html";

/// Initial view of the interactive map (roughly centered on Ontario).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            latitude: 45.0,
            longitude: -79.0,
            zoom: 6,
        }
    }
}

/// Fixed pauses between remote calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delays {
    pub search_page: Duration,
    pub detail_page: Duration,
    pub geocode_call: Duration,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            search_page: Duration::from_secs(1),
            detail_page: Duration::from_secs(2),
            geocode_call: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    root_url: Url,
    search_path: String,
    page_count: u32,
    geocode_endpoint: Url,
    api_key: Option<String>,
    data_dir: PathBuf,
    map_view: MapView,
    delays: Delays,
}

impl Config {
    /// Seed the environment from a `.env` file in the working directory (or
    /// a parent), then [`Config::from_env`]. Variables already set win.
    pub fn load() -> Result<Self, ConfigError> {
        apply_env_file(dotenvy::dotenv());
        Self::from_env()
    }

    /// Like [`Config::load`] with an explicit `.env` path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        apply_env_file(dotenvy::from_path(path).map(|()| path.to_path_buf()));
        Self::from_env()
    }

    /// Load from environment variables on top of the built-in defaults.
    ///
    /// A missing API key is not an error here; stage 2 asks for it through
    /// [`Config::require_api_key`] so the crawl stage can run without one.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.api_key = env::var(ENV_API_KEY)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());
        if let Ok(dir) = env::var(ENV_DATA_DIR) {
            if dir.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: ENV_DATA_DIR,
                    reason: "must not be empty".to_string(),
                });
            }
            config.data_dir = PathBuf::from(dir);
        }
        Ok(config)
    }

    pub fn with_root_url(mut self, root_url: Url) -> Self {
        self.root_url = root_url;
        self
    }

    pub fn with_page_count(mut self, page_count: u32) -> Self {
        self.page_count = page_count;
        self
    }

    pub fn with_geocode_endpoint(mut self, endpoint: Url) -> Self {
        self.geocode_endpoint = endpoint;
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_delays(mut self, delays: Delays) -> Self {
        self.delays = delays;
        self
    }

    /// Site root every relative link is resolved against.
    pub fn root_url(&self) -> &Url {
        &self.root_url
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Search-results URL for a zero-based page index.
    pub fn search_page_url(&self, page: u32) -> String {
        format!(
            "{}{}{}",
            self.root_url.as_str().trim_end_matches('/'),
            self.search_path,
            page
        )
    }

    pub fn geocode_endpoint(&self) -> &Url {
        &self.geocode_endpoint
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key().ok_or(ConfigError::MissingApiKey(ENV_API_KEY))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn urls_path(&self) -> PathBuf {
        self.data_dir.join(URLS_FILE)
    }

    pub fn details_path(&self) -> PathBuf {
        self.data_dir.join(DETAILS_FILE)
    }

    pub fn geocoded_csv_path(&self) -> PathBuf {
        self.data_dir.join(GEOCODED_CSV_FILE)
    }

    pub fn kml_path(&self) -> PathBuf {
        self.data_dir.join(KML_FILE)
    }

    pub fn map_path(&self) -> PathBuf {
        self.data_dir.join(MAP_FILE)
    }

    pub fn map_view(&self) -> MapView {
        self.map_view
    }

    pub fn delays(&self) -> Delays {
        self.delays
    }
}

// A missing file is normal; a broken one is logged and skipped.
fn apply_env_file(loaded: Result<PathBuf, dotenvy::Error>) {
    match loaded {
        Ok(path) => debug!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "ignoring unreadable environment file"),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_url: Url::parse(ROOT_URL).expect("ROOT_URL is a valid url"),
            search_path: SEARCH_PATH.to_string(),
            page_count: TOTAL_SEARCH_PAGES,
            geocode_endpoint: Url::parse(GEOCODE_ENDPOINT).expect("GEOCODE_ENDPOINT is a valid url"),
            api_key: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            map_view: MapView::default(),
            delays: Delays::default(),
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not found. Check your .env file or environment.")]
    MissingApiKey(&'static str),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
