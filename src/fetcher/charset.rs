//! Turning response bytes into UTF-8 text.
//!
//! The encoding is taken from the `Content-Type` header, then from a
//! `<meta>` declaration near the top of the document, and finally guessed
//! with `chardetng`. Undecodable sequences are replaced rather than failing
//! the page.

use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

const SNIFF_WINDOW: usize = 4096;

static HEADER_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>;]+)"#).unwrap());

/// Decode `body` and report which encoding was used.
pub fn decode_body(content_type: Option<&str>, body: &[u8]) -> (String, &'static str) {
    let encoding = content_type
        .and_then(|ct| label_in(&HEADER_CHARSET, ct))
        .or_else(|| {
            let head = String::from_utf8_lossy(&body[..body.len().min(SNIFF_WINDOW)]);
            label_in(&META_CHARSET, &head)
        })
        .unwrap_or_else(|| guess(body));

    let (text, used, had_errors) = encoding.decode(body);
    if had_errors {
        debug!(encoding = used.name(), "replaced malformed sequences while decoding");
    }
    (text.into_owned(), used.name())
}

fn label_in(pattern: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = pattern.captures(haystack)?.get(1)?.as_str();
    Encoding::for_label(label.trim().as_bytes())
}

fn guess(body: &[u8]) -> &'static Encoding {
    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(&body[..body.len().min(SNIFF_WINDOW)], body.len() <= SNIFF_WINDOW);
    detector.guess(None, true)
}
