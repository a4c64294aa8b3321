#![no_main]

use libfuzzer_sys::fuzz_target;

use labmap::document::Document;
use labmap::extractor::record_from_pages;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);
    let mid = html
        .char_indices()
        .map(|(i, _)| i)
        .find(|&i| i >= html.len() / 2)
        .unwrap_or(html.len());
    let (detail, contact) = html.split_at(mid);

    // The first half stands in for the detail page, the rest for the contact page.
    let detail = Document::parse(detail);
    let contact = Document::parse(contact);
    let _ = record_from_pages(&detail, Some(&contact));
    let _ = record_from_pages(&detail, None);
});
