//! One function per field of a lab record, each a pure query on a page.

use crate::document::Document;
use crate::entities::NOT_AVAILABLE;

pub const CONTACT_LINK_TEXT: &str = "Contact this facility";
pub const MAPS_LINK_TEXT: &str = "Google Maps";

const SECTOR_CONTAINER: &str = "div.field--name-field-sectors-of-application";
const ADDRESS_BLOCK: &str = "p.address";
const ADDRESS_PARTS: [&str; 5] = [
    "span.address-line1",
    "span.locality",
    "span.administrative-area",
    "span.postal-code",
    "span.country",
];

/// Page title, or the placeholder when the page has none.
pub fn lab_name(detail: &Document) -> String {
    detail
        .first_text("title")
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// List items of the first sector container; any later container is ignored.
pub fn sectors(detail: &Document) -> Vec<String> {
    detail.texts_in_first(SECTOR_CONTAINER, "li")
}

/// Relative link to the facility's contact page.
pub fn contact_href(detail: &Document) -> Option<String> {
    detail.anchor_href_by_text(CONTACT_LINK_TEXT)
}

/// First list item after the "Institution" heading of a contact page.
pub fn institution(contact: &Document) -> Option<String> {
    contact.text_after_heading("h2", "Institution", "li")
}

/// Address parts present in the contact page's address block, joined with
/// ", ". A block with no recognised parts gives an empty string.
pub fn address(contact: &Document) -> Option<String> {
    contact
        .field_texts(ADDRESS_BLOCK, &ADDRESS_PARTS)
        .map(|parts| parts.join(", "))
}

/// Map link offered on the detail page, used verbatim.
pub fn maps_href(detail: &Document) -> Option<String> {
    detail.anchor_href_by_text(MAPS_LINK_TEXT)
}
