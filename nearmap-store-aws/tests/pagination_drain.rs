//! Pagination drain tests against a replayed DynamoDB transport.
//!
//! Verifies that a single `query_cell` call concatenates every page the
//! store returns, following `LastEvaluatedKey` until none remains.

use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_dynamodb::{Client, Config};
use aws_smithy_http_client::test_util::{ReplayEvent, StaticReplayClient};
use aws_smithy_types::body::SdkBody;
use nearmap_core::{GridCell, GridStore, ResolutionTier, RetryPolicy};
use nearmap_store_aws::DynamoGridStore;

fn item_json(guid: &str, latlon: &str) -> String {
    format!(
        r#"{{"type":{{"S":"shop"}},"latlon":{{"S":"{latlon}"}},"h3-9":{{"S":"{guid}"}},"title":{{"S":"poi {guid}"}}}}"#
    )
}

fn query_response(items: &[String], last_key: Option<&str>) -> String {
    let items = items.join(",");
    match last_key {
        Some(guid) => format!(
            r#"{{"Count":1,"ScannedCount":1,"Items":[{items}],"LastEvaluatedKey":{{"type":{{"S":"shop"}},"h3-9":{{"S":"{guid}"}}}}}}"#
        ),
        None => format!(r#"{{"Count":1,"ScannedCount":1,"Items":[{items}]}}"#),
    }
}

fn replay_event(response_body: String) -> ReplayEvent {
    ReplayEvent::new(
        http::Request::builder()
            .uri("https://dynamodb.ap-northeast-1.amazonaws.com/")
            .body(SdkBody::empty())
            .unwrap(),
        http::Response::builder()
            .status(200)
            .body(SdkBody::from(response_body))
            .unwrap(),
    )
}

fn store_with_pages(pages: Vec<String>) -> DynamoGridStore {
    let http_client = StaticReplayClient::new(pages.into_iter().map(replay_event).collect());
    let config = Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("ap-northeast-1"))
        .credentials_provider(Credentials::new("akid", "secret", None, None, "test"))
        .http_client(http_client)
        .build();
    DynamoGridStore::from_client(Client::from_conf(config), "nearmap-poi".to_string())
        .with_retry_policy(RetryPolicy::new(1, std::time::Duration::ZERO))
}

#[tokio::test]
async fn query_cell_drains_all_pages() {
    let pages = vec![
        query_response(
            &[
                item_json("8928308280fffff", "35.0,139.0"),
                item_json("8928308280bffff", "35.01,139.01"),
            ],
            Some("8928308280bffff"),
        ),
        query_response(
            &[item_json("89283082807ffff", "35.02,139.02")],
            Some("89283082807ffff"),
        ),
        query_response(&[item_json("89283082803ffff", "35.03,139.03")], None),
    ];
    let store = store_with_pages(pages);

    let records = store
        .query_cell("shop", &GridCell::new("8928308280"), ResolutionTier::Fine)
        .await
        .unwrap();

    // Sum of all pages' item counts, no duplicates, no omissions.
    assert_eq!(records.len(), 4);
    let guids: Vec<&str> = records.iter().map(|r| r.cell_fine.as_str()).collect();
    assert_eq!(
        guids,
        vec![
            "8928308280fffff",
            "8928308280bffff",
            "89283082807ffff",
            "89283082803ffff"
        ]
    );
}

#[tokio::test]
async fn single_page_queries_once() {
    let pages = vec![query_response(
        &[item_json("8828308281fffff", "35.0,139.0")],
        None,
    )];
    let store = store_with_pages(pages);

    let records = store
        .query_cell(
            "shop",
            &GridCell::new("8828308281fffff"),
            ResolutionTier::Medium,
        )
        .await
        .unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title, "poi 8828308281fffff");
}

#[tokio::test]
async fn empty_result_is_ok() {
    let pages = vec![r#"{"Count":0,"ScannedCount":0,"Items":[]}"#.to_string()];
    let store = store_with_pages(pages);

    let records = store
        .query_cell(
            "shop",
            &GridCell::new("872830828ffffff"),
            ResolutionTier::Coarse,
        )
        .await
        .unwrap();
    assert!(records.is_empty());
}
