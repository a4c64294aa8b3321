#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use labmap::config::Config;
use labmap::throttle::Throttle;
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

pub fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body.into())
        .insert_header("Content-Type", "text/html; charset=utf-8")
}

/// Config pointed at `server`, with the given number of search pages.
pub fn test_config(server: &MockServer, pages: u32) -> Config {
    Config::default()
        .with_root_url(Url::parse(&server.uri()).unwrap())
        .with_page_count(pages)
}

pub fn search_page(rows: &[&str]) -> String {
    let rows: String = rows
        .iter()
        .map(|href| format!(r#"<div class="views-row"><h3><a href="{href}">Lab</a></h3></div>"#))
        .collect();
    format!("<html><head><title>Search</title></head><body>{rows}</body></html>")
}

pub async fn mount_search_page(server: &MockServer, page: u32, rows: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/en/search"))
        .and(query_param("page", page.to_string()))
        .respond_with(html(search_page(rows)))
        .mount(server)
        .await;
}

pub fn detail_page(name: &str, sectors: &[&str], contact: Option<&str>, maps: Option<&str>) -> String {
    let items: String = sectors.iter().map(|s| format!("<li>{s}</li>")).collect();
    let contact = contact
        .map(|href| format!(r#"<a href="{href}">Contact this facility</a>"#))
        .unwrap_or_default();
    let maps = maps
        .map(|href| format!(r#"<a href="{href}">Google Maps</a>"#))
        .unwrap_or_default();
    format!(
        r#"<html><head><title>{name}</title></head><body>
           <div class="field--name-field-sectors-of-application"><ul>{items}</ul></div>
           {contact}{maps}
           </body></html>"#
    )
}

pub fn contact_page(institution: &str, address: &[(&str, &str)]) -> String {
    let spans: String = address
        .iter()
        .map(|(class, value)| format!(r#"<span class="{class}">{value}</span>"#))
        .collect();
    format!(
        r#"<html><body>
           <h2>Institution</h2><ul><li>{institution}</li></ul>
           <p class="address">{spans}</p>
           </body></html>"#
    )
}

pub async fn mount_page(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(html(body))
        .mount(server)
        .await;
}

/// Remembers every requested pause without sleeping.
#[derive(Debug, Default)]
pub struct RecordingThrottle {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingThrottle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait]
impl Throttle for RecordingThrottle {
    async fn pause(&self, delay: Duration) {
        self.pauses.lock().unwrap().push(delay);
    }
}
