//! DynamoDB implementation of the `GridStore` trait.
//!
//! Provides `DynamoGridStore`, which answers one-cell POI lookups against
//! the table described in [`crate::schema`]. Fine-tier lookups run a
//! `begins_with` prefix match on the primary sort key; coarse and medium
//! tiers run exact matches against the tier's local secondary index. Every
//! lookup fully drains the `LastEvaluatedKey` continuation cursor and is
//! retried with a fixed delay before an error surfaces to the caller.

use crate::schema::*;
use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::query::{QueryError, QueryOutput};
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use aws_smithy_types::timeout::TimeoutConfig;
use nearmap_core::{
    with_retry, Coordinate, GridCell, GridStore, PoiRecord, ResolutionTier, RetryPolicy, StoreError,
};
use std::collections::HashMap;
use std::time::Duration;

/// DynamoDB grid store configuration.
#[derive(Debug, Clone)]
pub struct DynamoConfig {
    /// DynamoDB table name.
    pub table_name: String,
    /// AWS region (optional, uses SDK default if not specified).
    pub region: Option<String>,
    /// Optional endpoint override (e.g. LocalStack).
    pub endpoint: Option<String>,
    /// Operation timeout in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl Default for DynamoConfig {
    fn default() -> Self {
        Self {
            table_name: DEFAULT_TABLE_NAME.to_string(),
            region: None,
            endpoint: None,
            timeout_ms: None,
        }
    }
}

/// DynamoDB-backed grid store.
///
/// Stateless per-request; the client is constructed once and injected into
/// the pipeline, and may be shared across concurrent searches.
#[derive(Clone)]
pub struct DynamoGridStore {
    client: Client,
    table_name: String,
    retry: RetryPolicy,
}

impl std::fmt::Debug for DynamoGridStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoGridStore")
            .field("table_name", &self.table_name)
            .field("retry", &self.retry)
            .finish()
    }
}

impl DynamoGridStore {
    /// Create a new DynamoDB grid store.
    ///
    /// Configuration:
    /// - `region`: Override SDK region (uses SDK default if not specified)
    /// - `endpoint`: Endpoint override for local testing
    /// - `timeout_ms`: Operation timeout in milliseconds
    pub async fn new(sdk_config: &aws_config::SdkConfig, config: DynamoConfig) -> Self {
        // Build DynamoDB config by inheriting from SdkConfig (preserves HTTP
        // client, retry config, endpoints, sleep impl) then apply overrides
        let mut builder = aws_sdk_dynamodb::config::Builder::from(sdk_config);

        if let Some(region_str) = config.region {
            builder = builder.region(aws_sdk_dynamodb::config::Region::new(region_str));
        }

        if let Some(endpoint) = config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        if let Some(timeout_ms) = config.timeout_ms {
            let timeout_config = TimeoutConfig::builder()
                .operation_timeout(Duration::from_millis(timeout_ms))
                .build();
            builder = builder.timeout_config(timeout_config);
        }

        let client = Client::from_conf(builder.build());

        Self {
            client,
            table_name: config.table_name,
            retry: RetryPolicy::default(),
        }
    }

    /// Create from a pre-built client (for testing).
    pub fn from_client(client: Client, table_name: String) -> Self {
        Self {
            client,
            table_name,
            retry: RetryPolicy::default(),
        }
    }

    /// Override the retry policy.
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Convert a DynamoDB item to a PoiRecord.
    ///
    /// Returns `None` when a required attribute (category, position, fine
    /// cell) is missing or unparseable; such rows are skipped, not fatal.
    fn item_to_record(item: &HashMap<String, AttributeValue>) -> Option<PoiRecord> {
        let poi_type = attr_s(item, ATTR_TYPE)?.to_string();
        let position = Coordinate::parse(attr_s(item, ATTR_LATLON)?)?;
        let cell_fine = GridCell::new(attr_s(item, ResolutionTier::Fine.sort_key())?);

        let cell_coarse = GridCell::new(
            attr_s(item, ResolutionTier::Coarse.sort_key()).unwrap_or_default(),
        );
        let cell_medium = GridCell::new(
            attr_s(item, ResolutionTier::Medium.sort_key()).unwrap_or_default(),
        );

        let mut media: [String; 5] = Default::default();
        for (slot, attr) in media.iter_mut().zip(MEDIA_ATTRS) {
            *slot = attr_string(item, attr);
        }

        let star = item
            .get(ATTR_STAR)
            .and_then(|v| v.as_n().ok())
            .and_then(|s| s.parse().ok());

        Some(PoiRecord {
            poi_type,
            position,
            cell_coarse,
            cell_medium,
            cell_fine,
            locoguide_id: attr_s(item, ATTR_LOCOGUIDE_ID)
                .filter(|s| !s.is_empty())
                .map(String::from),
            title: attr_string(item, ATTR_TITLE),
            tel: attr_string(item, ATTR_TEL),
            address: attr_string(item, ATTR_ADDRESS),
            image: attr_s(item, ATTR_IMAGE)
                .filter(|s| !s.is_empty())
                .map(String::from),
            facebook: attr_string(item, ATTR_FACEBOOK),
            twitter: attr_string(item, ATTR_TWITTER),
            instagram: attr_string(item, ATTR_INSTAGRAM),
            homepage: attr_string(item, ATTR_HOMEPAGE),
            media,
            xframe_options: attr_string(item, ATTR_XFRAME_OPTIONS),
            star,
        })
    }

    /// Issue one page of the query for a cell.
    async fn query_page(
        &self,
        poi_type: &str,
        cell: &GridCell,
        tier: ResolutionTier,
        start_key: Option<HashMap<String, AttributeValue>>,
    ) -> Result<QueryOutput, StoreError> {
        // Fine tier: prefix match on the primary sort key. Coarse/medium:
        // exact match against the tier's LSI.
        let key_condition = if tier.index_name().is_some() {
            "#t = :t AND #cell = :cell"
        } else {
            "#t = :t AND begins_with(#cell, :cell)"
        };

        let mut request = self
            .client
            .query()
            .table_name(&self.table_name)
            .key_condition_expression(key_condition)
            // "type" is a DynamoDB reserved word
            .expression_attribute_names("#t", ATTR_TYPE)
            .expression_attribute_names("#cell", tier.sort_key())
            .expression_attribute_values(":t", AttributeValue::S(poi_type.to_string()))
            .expression_attribute_values(":cell", AttributeValue::S(cell.as_str().to_string()));

        if let Some(index) = tier.index_name() {
            request = request.index_name(index);
        }

        if let Some(key) = start_key {
            request = request.set_exclusive_start_key(Some(key));
        }

        request.send().await.map_err(classify_query_error)
    }

    /// Query a cell, draining all continuation pages.
    async fn query_cell_drained(
        &self,
        poi_type: &str,
        cell: &GridCell,
        tier: ResolutionTier,
    ) -> Result<Vec<PoiRecord>, StoreError> {
        let mut records = Vec::new();
        let mut last_evaluated_key = None;

        loop {
            let response = self
                .query_page(poi_type, cell, tier, last_evaluated_key.take())
                .await?;

            for item in response.items() {
                match Self::item_to_record(item) {
                    Some(record) => records.push(record),
                    None => {
                        tracing::warn!(cell = %cell, "skipping malformed POI row");
                    }
                }
            }

            match response.last_evaluated_key() {
                Some(key) if !key.is_empty() => {
                    last_evaluated_key = Some(key.clone());
                }
                _ => break,
            }
        }

        tracing::debug!(cell = %cell, tier = ?tier, count = records.len(), "cell query drained");
        Ok(records)
    }
}

#[async_trait]
impl GridStore for DynamoGridStore {
    async fn query_cell(
        &self,
        poi_type: &str,
        cell: &GridCell,
        tier: ResolutionTier,
    ) -> Result<Vec<PoiRecord>, StoreError> {
        with_retry(
            self.retry,
            || self.query_cell_drained(poi_type, cell, tier),
            "DynamoDB Query",
        )
        .await
    }
}

fn attr_s<'a>(item: &'a HashMap<String, AttributeValue>, key: &str) -> Option<&'a str> {
    item.get(key).and_then(|v| v.as_s().ok()).map(|s| s.as_str())
}

fn attr_string(item: &HashMap<String, AttributeValue>, key: &str) -> String {
    attr_s(item, key).unwrap_or_default().to_string()
}

fn classify_query_error(err: SdkError<QueryError>) -> StoreError {
    match &err {
        SdkError::ServiceError(service_err)
            if matches!(
                service_err.err(),
                QueryError::ProvisionedThroughputExceededException(_)
            ) =>
        {
            StoreError::throttled(format!("DynamoDB Query throttled: {}", err))
        }
        _ => StoreError::query(format!("DynamoDB Query failed: {}", err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(value: &str) -> AttributeValue {
        AttributeValue::S(value.to_string())
    }

    fn full_item() -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();
        item.insert(ATTR_TYPE.to_string(), s("shop"));
        item.insert(ATTR_LATLON.to_string(), s("35.0,139.0"));
        item.insert("h3-7".to_string(), s("872830828ffffff"));
        item.insert("h3-8".to_string(), s("8828308281fffff"));
        item.insert("h3-9".to_string(), s("8928308280fffff"));
        item.insert(ATTR_LOCOGUIDE_ID.to_string(), s("loco-1"));
        item.insert(ATTR_TITLE.to_string(), s("Blue Bottle"));
        item.insert(ATTR_TEL.to_string(), s("03-0000-0000"));
        item.insert(ATTR_ADDRESS.to_string(), s("Tokyo"));
        item.insert(ATTR_IMAGE.to_string(), s("images/blue.jpg"));
        item.insert(ATTR_FACEBOOK.to_string(), s("fb"));
        item.insert(ATTR_TWITTER.to_string(), s("tw"));
        item.insert(ATTR_INSTAGRAM.to_string(), s("ig"));
        item.insert(ATTR_HOMEPAGE.to_string(), s("https://example.com"));
        item.insert("media1".to_string(), s("https://example.com/m1"));
        item.insert("media5".to_string(), s("https://example.com/m5"));
        item.insert(ATTR_XFRAME_OPTIONS.to_string(), s("1,0,0,0,0,1"));
        item.insert(ATTR_STAR.to_string(), AttributeValue::N("3".to_string()));
        item
    }

    #[test]
    fn test_item_to_record_full() {
        let record = DynamoGridStore::item_to_record(&full_item()).unwrap();
        assert_eq!(record.poi_type, "shop");
        assert_eq!(record.position, Coordinate::new(35.0, 139.0));
        assert_eq!(record.cell_fine.as_str(), "8928308280fffff");
        assert_eq!(record.locoguide_id.as_deref(), Some("loco-1"));
        assert_eq!(record.title, "Blue Bottle");
        assert_eq!(record.image.as_deref(), Some("images/blue.jpg"));
        assert_eq!(record.media[0], "https://example.com/m1");
        assert_eq!(record.media[1], "");
        assert_eq!(record.media[4], "https://example.com/m5");
        assert_eq!(record.xframe_flags(), ["1", "0", "0", "0", "0", "1"]);
        assert_eq!(record.star, Some(3));
    }

    #[test]
    fn test_item_missing_latlon_is_skipped() {
        let mut item = full_item();
        item.remove(ATTR_LATLON);
        assert!(DynamoGridStore::item_to_record(&item).is_none());
    }

    #[test]
    fn test_item_bad_latlon_is_skipped() {
        let mut item = full_item();
        item.insert(ATTR_LATLON.to_string(), s("nowhere"));
        assert!(DynamoGridStore::item_to_record(&item).is_none());
    }

    #[test]
    fn test_item_missing_fine_cell_is_skipped() {
        let mut item = full_item();
        item.remove("h3-9");
        assert!(DynamoGridStore::item_to_record(&item).is_none());
    }

    #[test]
    fn test_item_optional_fields_default() {
        let mut item = HashMap::new();
        item.insert(ATTR_TYPE.to_string(), s("shop"));
        item.insert(ATTR_LATLON.to_string(), s("35.0,139.0"));
        item.insert("h3-9".to_string(), s("8928308280fffff"));

        let record = DynamoGridStore::item_to_record(&item).unwrap();
        assert_eq!(record.locoguide_id, None);
        assert_eq!(record.image, None);
        assert_eq!(record.star, None);
        assert_eq!(record.title, "");
        assert_eq!(record.xframe_flags(), ["0"; 6]);
    }

    #[test]
    fn test_empty_locoguide_id_treated_as_absent() {
        let mut item = full_item();
        item.insert(ATTR_LOCOGUIDE_ID.to_string(), s(""));
        let record = DynamoGridStore::item_to_record(&item).unwrap();
        assert_eq!(record.locoguide_id, None);
    }
}
