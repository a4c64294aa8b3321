//! Walks the search-result pages and collects one detail-page URL per row.

use tracing::{info, instrument};
use url::Url;

use crate::config::Config;
use crate::document::Document;
use crate::fetcher::Fetcher;
use crate::throttle::Throttle;

const RESULT_ROW: &str = "div.views-row";

/// Links found on one search-results page, resolved against `root`.
///
/// Only the first anchor of each row is looked at; a row whose first anchor
/// has no href contributes nothing. Duplicates are kept.
pub fn links_on_page(doc: &Document, root: &Url) -> Vec<String> {
    doc.first_attr_in_each(RESULT_ROW, "a", "href")
        .into_iter()
        .filter_map(|href| root.join(&href).ok())
        .map(String::from)
        .collect()
}

/// Fetch every search page in order and accumulate their links.
///
/// A page that fails to load contributes nothing; the loop carries on. The
/// configured search-page delay is observed after every page.
#[instrument(skip_all, fields(pages = config.page_count()))]
pub async fn discover(config: &Config, fetcher: &Fetcher, throttle: &dyn Throttle) -> Vec<String> {
    let total = config.page_count();
    let mut all_links = Vec::new();

    for page in 0..total {
        let page_url = config.search_page_url(page);
        if let Some(doc) = fetcher.fetch_document(&page_url).await {
            let links = links_on_page(&doc, config.root_url());
            info!(
                found = links.len(),
                "Discovered links from page {} of {}",
                page + 1,
                total
            );
            all_links.extend(links);
        }
        throttle.pause(config.delays().search_page).await;
    }

    all_links
}
