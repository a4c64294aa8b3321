use crate::document::Document;
use crate::fetcher::{charset::decode_body, errors::FetchError, types::PageResponse};
use once_cell::sync::Lazy;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use tracing::{debug, instrument, warn};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Timeout for listing, detail and contact pages.
pub const PAGE_TIMEOUT: Duration = Duration::from_secs(10);

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .expect("Failed to build HTTP client")
});

/// Shared client, also used by the geocoder.
pub fn get_client() -> &'static Client {
    &HTTP_CLIENT
}

#[instrument(skip_all, fields(url = %url))]
pub async fn fetch(url: &str, timeout: Duration) -> Result<PageResponse, FetchError> {
    let parsed_url = url::Url::parse(url)?;

    let response = HTTP_CLIENT
        .get(parsed_url)
        .timeout(timeout)
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    let status = response.status();
    if status != StatusCode::OK {
        return Err(FetchError::Http(status));
    }

    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let url_final = response.url().clone();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .map(str::to_string);

    let body_bytes = response
        .bytes()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Content-Length may be absent or wrong
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    let (body_utf8, charset) = decode_body(content_type.as_deref(), &body_bytes);
    debug!(%status, charset, bytes = body_bytes.len(), "fetched page");

    Ok(PageResponse {
        url_final,
        status,
        charset,
        body_utf8,
    })
}

/// Page fetcher for the crawl stage.
///
/// Failures never reach the caller: they are logged and reported as `None`.
#[derive(Debug, Clone, Copy)]
pub struct Fetcher {
    timeout: Duration,
}

impl Fetcher {
    pub fn new() -> Self {
        Self {
            timeout: PAGE_TIMEOUT,
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub async fn fetch_document(&self, url: &str) -> Option<Document> {
        match fetch(url, self.timeout).await {
            Ok(page) => Some(page.document()),
            Err(FetchError::Http(status)) => {
                warn!(url, %status, "failed to reach page");
                None
            }
            Err(err) => {
                warn!(url, error = %err, "error fetching page");
                None
            }
        }
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}
