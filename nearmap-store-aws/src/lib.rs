//! DynamoDB storage backend for the nearmap POI search service.
//!
//! Implements the `GridStore` trait over a DynamoDB table keyed by POI
//! category and fine-resolution H3 cell, with local secondary indexes for
//! exact-match lookups at the coarse and medium tiers.
//!
//! ## Usage
//!
//! ```ignore
//! use nearmap_store_aws::{DynamoConfig, DynamoGridStore};
//!
//! let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
//! let store = DynamoGridStore::new(&sdk_config, DynamoConfig {
//!     table_name: "nearmap-poi".to_string(),
//!     ..Default::default()
//! })
//! .await;
//! ```

pub mod dynamodb;
pub mod schema;

pub use dynamodb::{DynamoConfig, DynamoGridStore};

// Re-export the trait this crate implements
pub use nearmap_core::{GridStore, StoreError};
