//! Crowd client tests against a mock provider.

use std::time::Duration;

use nearmap_core::{AnnotatedRecord, Coordinate, PoiRecord, RetryPolicy};
use nearmap_search_service::group::{group_records, GroupedResults};
use nearmap_search_service::{CrowdClient, CrowdConfig, SearchConfig};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn linked_record(lat: f64, locoguide_id: &str) -> AnnotatedRecord {
    AnnotatedRecord {
        record: PoiRecord {
            poi_type: "cafe".to_string(),
            position: Coordinate::new(lat, 139.0),
            cell_coarse: "872830828ffffff".into(),
            cell_medium: "8828308281fffff".into(),
            cell_fine: "8928308280fffff".into(),
            locoguide_id: Some(locoguide_id.to_string()),
            title: String::new(),
            tel: String::new(),
            address: String::new(),
            image: None,
            facebook: String::new(),
            twitter: String::new(),
            instagram: String::new(),
            homepage: String::new(),
            media: Default::default(),
            xframe_options: String::new(),
            star: None,
        },
        distance_km: 0.1,
    }
}

fn grouped(ids: &[&str]) -> GroupedResults {
    let records = ids
        .iter()
        .enumerate()
        .map(|(i, id)| linked_record(35.0 + i as f64 * 0.1, id))
        .collect();
    group_records(records, "cafe", &SearchConfig::default())
}

fn client(server: &MockServer) -> CrowdClient {
    let config = CrowdConfig::new(format!("{}/crowd", server.uri()), "token-123")
        .with_retry(RetryPolicy::new(2, Duration::ZERO));
    CrowdClient::new(config).unwrap()
}

#[tokio::test]
async fn test_two_page_link_chain_applies_levels() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crowd"))
        .and(query_param("id", "loco-1,loco-2"))
        .and(header("authorization", "Bearer token-123"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "link",
                    format!("<{}/crowd/page2>; rel=\"next\"", server.uri()).as_str(),
                )
                .set_body_json(json!([{"id": "loco-1", "crowd_lamp": {"color": "red"}}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/crowd/page2"))
        .and(header("authorization", "Bearer token-123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "loco-2", "crowd_lamp": {"color": "green"}}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut results = grouped(&["loco-1", "loco-2"]);
    let has_clowd = client(&server)
        .enrich(&mut results.groups, &results.candidates)
        .await;

    assert!(has_clowd);
    assert_eq!(results.groups[0].list[0].crowd_lv, Some(3));
    assert_eq!(results.groups[1].list[0].crowd_lv, Some(1));
}

#[tokio::test]
async fn test_bare_link_header_still_chains_pages() {
    // The provider's Link header carries only the bracketed URL, no rel
    // attribute; the second page must still be fetched.
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crowd"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("link", format!("<{}/crowd/page2>", server.uri()).as_str())
                .set_body_json(json!([{"id": "loco-1", "crowd_lamp": {"color": "red"}}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/crowd/page2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "loco-2", "crowd_lamp": {"color": "green"}}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut results = grouped(&["loco-1", "loco-2"]);
    let has_clowd = client(&server)
        .enrich(&mut results.groups, &results.candidates)
        .await;

    assert!(has_clowd);
    assert_eq!(results.groups[1].list[0].crowd_lv, Some(1));
}

#[tokio::test]
async fn test_provider_failure_degrades_to_unclassified() {
    let server = MockServer::start().await;

    // Both retry attempts see the failure.
    Mock::given(method("GET"))
        .and(path("/crowd"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let mut results = grouped(&["loco-1"]);
    let has_clowd = client(&server)
        .enrich(&mut results.groups, &results.candidates)
        .await;

    assert!(!has_clowd);
    assert_eq!(results.groups[0].list[0].crowd_lv, Some(0));
}

#[tokio::test]
async fn test_null_lamp_leaves_entry_unclassified() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crowd"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "loco-1", "crowd_lamp": null}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut results = grouped(&["loco-1"]);
    let has_clowd = client(&server)
        .enrich(&mut results.groups, &results.candidates)
        .await;

    assert!(!has_clowd);
    assert_eq!(results.groups[0].list[0].crowd_lv, Some(0));
}

#[tokio::test]
async fn test_no_candidates_skips_the_provider() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut groups = Vec::new();
    let has_clowd = client(&server).enrich(&mut groups, &[]).await;
    assert!(!has_clowd);
}

#[tokio::test]
async fn test_transient_failure_recovers_within_retry_budget() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/crowd"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/crowd"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{"id": "loco-1", "crowd_lamp": {"color": "yellow"}}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut results = grouped(&["loco-1"]);
    let has_clowd = client(&server)
        .enrich(&mut results.groups, &results.candidates)
        .await;

    assert!(has_clowd);
    assert_eq!(results.groups[0].list[0].crowd_lv, Some(2));
}
