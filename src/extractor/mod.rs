pub mod fields;

#[cfg(test)]
mod tests;

use tracing::{debug, instrument};
use url::Url;

use crate::document::Document;
use crate::entities::LabRecord;
use crate::fetcher::Fetcher;

/// Build a lab record from a detail page and, when it could be fetched, the
/// facility's contact page.
///
/// Institution and address come from the contact page. When that leaves the
/// location unknown, the detail page's map link is used instead.
pub fn record_from_pages(detail: &Document, contact: Option<&Document>) -> LabRecord {
    let mut record = LabRecord::new(fields::lab_name(detail), &fields::sectors(detail));

    if let Some(contact) = contact {
        if let Some(institution) = fields::institution(contact) {
            record.institution = institution;
        }
        if let Some(address) = fields::address(contact) {
            record.location = address;
        }
    }

    if !record.has_location()
        && let Some(href) = fields::maps_href(detail)
    {
        record.location = href;
    }

    record
}

/// Fetch a detail page (and its contact page) and extract the lab record.
///
/// `None` only when the detail page itself could not be fetched.
#[instrument(skip_all, fields(url = %url))]
pub async fn extract(url: &str, root: &Url, fetcher: &Fetcher) -> Option<LabRecord> {
    let detail = fetcher.fetch_document(url).await?;

    let contact = match fields::contact_href(&detail) {
        Some(href) => match root.join(&href) {
            Ok(contact_url) => fetcher.fetch_document(contact_url.as_str()).await,
            Err(err) => {
                debug!(%href, error = %err, "unusable contact link");
                None
            }
        },
        None => None,
    };

    Some(record_from_pages(&detail, contact.as_ref()))
}
