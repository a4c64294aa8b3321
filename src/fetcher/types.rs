use reqwest::StatusCode;
use url::Url;

use crate::document::Document;

#[derive(Debug)]
pub struct PageResponse {
    pub url_final: Url,
    pub status: StatusCode,
    /// Name of the encoding the body was decoded from.
    pub charset: &'static str,
    pub body_utf8: String,
}

impl PageResponse {
    pub fn document(&self) -> Document {
        Document::parse(&self.body_utf8)
    }
}
