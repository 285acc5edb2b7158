//! Core domain types and service traits for the nearmap POI search service.
//!
//! This crate defines the vocabulary shared by the pipeline, the spatial
//! index, and the storage backend:
//!
//! - [`Coordinate`] and great-circle distance ([`geo`])
//! - [`GridCell`], the opaque spatial-grid cell identifier ([`cell`])
//! - [`ResolutionTier`], the zoom-derived index granularity ([`tier`])
//! - [`PoiRecord`], the stored point-of-interest row ([`record`])
//! - [`GridStore`] and [`Geocoder`], async seams to external collaborators
//! - [`RetryPolicy`], fixed-delay retry for transient failures ([`retry`])
//!
//! Concrete implementations live elsewhere: the H3 grid index in
//! `nearmap-spatial`, the DynamoDB store in `nearmap-store-aws`, and the
//! Google geocoder in `nearmap-search-service`.

pub mod cell;
pub mod geo;
pub mod geocode;
pub mod record;
pub mod retry;
pub mod store;
pub mod tier;

pub use cell::GridCell;
pub use geo::{haversine_distance, Coordinate};
pub use geocode::{GeocodeError, Geocoder};
pub use record::{AnnotatedRecord, PoiRecord};
pub use retry::{with_retry, RetryPolicy};
pub use store::{GridStore, StoreError};
pub use tier::ResolutionTier;
