mod helpers;

use std::time::Duration;

use helpers::RecordingThrottle;
use labmap::entities::{Coordinates, LabRecord};
use labmap::geocoder::{GeocodeOutcome, Geocoder, geocode_all};
use serde_json::json;
use url::Url;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

const ADDRESS: &str = "123 Main St, Toronto, ON, M1A1A1, Canada";

fn geocoder_for(server: &MockServer) -> Geocoder {
    Geocoder::new(
        Url::parse(&format!("{}/maps/api/geocode/json", server.uri())).unwrap(),
        "test-key",
    )
}

#[tokio::test]
async fn test_ok_returns_first_result_exactly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/maps/api/geocode/json"))
        .and(query_param("address", ADDRESS))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [
                {"geometry": {"location": {"lat": 43.6532225, "lng": -79.3831843}}},
                {"geometry": {"location": {"lat": 10.0, "lng": 20.0}}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let geocoder = geocoder_for(&server);
    assert_eq!(
        geocoder.lookup(ADDRESS).await,
        GeocodeOutcome::Located(Coordinates {
            latitude: 43.6532225,
            longitude: -79.3831843,
        })
    );
}

#[tokio::test]
async fn test_zero_results_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
        )
        .mount(&server)
        .await;

    let geocoder = geocoder_for(&server);
    assert_eq!(
        geocoder.lookup(ADDRESS).await,
        GeocodeOutcome::Rejected("ZERO_RESULTS".to_string())
    );
    assert_eq!(geocoder.geocode(ADDRESS).await, None);
}

#[tokio::test]
async fn test_ok_without_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "OK", "results": []})))
        .mount(&server)
        .await;

    let geocoder = geocoder_for(&server);
    assert_eq!(geocoder.lookup(ADDRESS).await, GeocodeOutcome::NoResults);
}

#[tokio::test]
async fn test_http_error_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let geocoder = geocoder_for(&server);
    match geocoder.lookup(ADDRESS).await {
        GeocodeOutcome::Http(status) => assert_eq!(status.as_u16(), 500),
        other => panic!("Expected HTTP error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreadable_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let geocoder = geocoder_for(&server);
    assert!(matches!(
        geocoder.lookup(ADDRESS).await,
        GeocodeOutcome::Failed(_)
    ));
}

#[tokio::test]
async fn test_timeout_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"status": "OK", "results": []}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let geocoder = geocoder_for(&server).with_timeout(Duration::from_millis(50));
    assert!(matches!(
        geocoder.lookup(ADDRESS).await,
        GeocodeOutcome::Failed(_)
    ));
}

#[tokio::test]
async fn test_urls_never_reach_the_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let geocoder = geocoder_for(&server);
    for location in [
        "https://maps.google.com/?q=1,2",
        "http://maps.example/place",
        "",
        "N/A",
    ] {
        assert_eq!(geocoder.lookup(location).await, GeocodeOutcome::Skipped);
    }
}

#[tokio::test]
async fn test_geocode_all_keeps_order_and_pauses_after_each() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("address", "1 King St, Waterloo, ON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "results": [{"geometry": {"location": {"lat": 43.46, "lng": -80.52}}}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(query_param("address", "Nowhere"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ZERO_RESULTS", "results": []})),
        )
        .mount(&server)
        .await;

    let mut found = LabRecord::new("Found", &[]);
    found.location = "1 King St, Waterloo, ON".to_string();
    let mut link = LabRecord::new("Link", &[]);
    link.location = "https://maps.google.com/?q=1,2".to_string();
    let mut lost = LabRecord::new("Lost", &[]);
    lost.location = "Nowhere".to_string();

    let throttle = RecordingThrottle::new();
    let geocoder = geocoder_for(&server);
    let geocoded = geocode_all(
        &geocoder,
        vec![found, link, lost],
        &throttle,
        Duration::from_secs(1),
    )
    .await;

    let names: Vec<_> = geocoded.iter().map(|g| g.record.name.as_str()).collect();
    assert_eq!(names, vec!["Found", "Link", "Lost"]);
    assert_eq!(geocoded[0].latitude(), Some(43.46));
    assert_eq!(geocoded[0].longitude(), Some(-80.52));
    assert_eq!(geocoded[1].coordinates, None);
    assert_eq!(geocoded[2].coordinates, None);
    assert_eq!(throttle.pauses(), vec![Duration::from_secs(1); 3]);
}
