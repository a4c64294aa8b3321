use std::fs;

use crate::document::Document;
use crate::entities::NOT_AVAILABLE;
use crate::extractor::{fields, record_from_pages};

fn fixture(name: &str) -> Document {
    let html = fs::read_to_string(format!("src/extractor/tests/fixtures/{name}"))
        .expect("Failed to read test fixture");
    Document::parse(&html)
}

#[test]
fn test_detail_and_contact_pages() {
    let detail = fixture("detail.html");
    let contact = fixture("contact.html");

    let record = record_from_pages(&detail, Some(&contact));

    assert_eq!(record.name, "Advanced Materials Characterization Laboratory");
    assert_eq!(
        record.sectors,
        "Advanced manufacturing, Energy, Health and related life sciences"
    );
    assert_eq!(record.institution, "University of Toronto");
    assert_eq!(record.location, "123 Main St, Toronto, ON, M1A1A1, Canada");
}

#[test]
fn test_contact_link_is_found_on_detail_page() {
    let detail = fixture("detail.html");
    assert_eq!(
        fields::contact_href(&detail).as_deref(),
        Some("/en/facility/advanced-materials/contact")
    );
}

#[test]
fn test_maps_fallback_without_contact_page() {
    let detail = fixture("detail_maps_only.html");

    assert_eq!(fields::contact_href(&detail), None);

    let record = record_from_pages(&detail, None);
    assert_eq!(record.name, "Northern Ontario Field Station");
    assert_eq!(record.sectors, "");
    assert_eq!(record.location, "https://maps.google.com/?q=1,2");
    assert_eq!(record.institution, NOT_AVAILABLE);
}

#[test]
fn test_unreachable_contact_page_falls_back_to_maps_link() {
    // Detail page has a contact link, but the contact page could not be fetched.
    let detail = fixture("detail.html");

    let record = record_from_pages(&detail, None);
    assert_eq!(record.location, "https://maps.google.com/?q=43.66,-79.39");
    assert_eq!(record.institution, NOT_AVAILABLE);
}

#[test]
fn test_maps_link_is_read_from_detail_page_only() {
    let detail = Document::parse("<html><head><title>Lab</title></head><body></body></html>");
    let contact = Document::parse(
        r#"<html><body><a href="https://maps.google.com/?q=9,9">Google Maps</a></body></html>"#,
    );

    let record = record_from_pages(&detail, Some(&contact));
    assert_eq!(record.location, NOT_AVAILABLE);
}

#[test]
fn test_contact_without_address_block() {
    let detail = Document::parse("<html><head><title>Lab</title></head><body></body></html>");
    let contact = Document::parse(
        "<html><body><h2>Institution</h2><ul><li>McMaster University</li></ul></body></html>",
    );

    let record = record_from_pages(&detail, Some(&contact));
    assert_eq!(record.institution, "McMaster University");
    assert_eq!(record.location, NOT_AVAILABLE);
}

#[test]
fn test_empty_page_gives_placeholders() {
    let record = record_from_pages(&Document::parse(""), None);
    assert_eq!(record.name, NOT_AVAILABLE);
    assert_eq!(record.sectors, "");
    assert_eq!(record.location, NOT_AVAILABLE);
    assert_eq!(record.institution, NOT_AVAILABLE);
}

#[test]
fn test_extraction_is_repeatable() {
    let first = record_from_pages(&fixture("detail.html"), Some(&fixture("contact.html")));
    let second = record_from_pages(&fixture("detail.html"), Some(&fixture("contact.html")));
    assert_eq!(first, second);
}

#[test]
fn test_malformed_html() {
    let detail = Document::parse(
        "<html><head><title>Broken</title><body><div class=\"field--name-field-sectors-of-application\"><li>Unclosed",
    );

    let record = record_from_pages(&detail, None);
    assert_eq!(record.name, "Broken");
    assert_eq!(record.sectors, "Unclosed");
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_extract_never_panics(detail in ".*", contact in ".*") {
            let detail = Document::parse(&detail);
            let contact = Document::parse(&contact);
            let _ = record_from_pages(&detail, Some(&contact));
        }

        #[test]
        fn test_institution_needs_contact_page(html in ".*") {
            let record = record_from_pages(&Document::parse(&html), None);
            prop_assert_eq!(record.institution, NOT_AVAILABLE);
        }
    }
}
