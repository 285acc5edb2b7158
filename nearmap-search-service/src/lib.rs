//! Proximity POI search pipeline.
//!
//! Answers "what points of interest are near this location" against the
//! grid-indexed store, with best-effort crowd-level enrichment from an
//! external service.
//!
//! # Pipeline
//!
//! ```text
//! zoom ──► ResolutionTier
//!                │
//! coordinate ──► Ring Expander ──► Distance Annotator ──► Result Grouper
//!  (or geocoded   (rings 0..2,      (haversine, stable     (adjacency-only
//!   address)       GridStore per     sort + truncate        coordinate merge,
//!                  cell)             when requested)        crowd candidates)
//!                                                                │
//!                                          Crowd Enrichment ◄────┘
//!                                          (paginated external API,
//!                                           best-effort, in-place)
//! ```
//!
//! A store failure aborts the search; a crowd-enrichment failure degrades
//! to `has_clowd = false` without affecting the rest of the response.
//!
//! # Modules
//!
//! - [`pipeline`]: [`SearchPipeline`], the injected-handle entry point
//! - [`expand`]: expanding-ring store lookup
//! - [`annotate`]: distance annotation, sort and truncation
//! - [`group`]: entry conversion and adjacency grouping
//! - [`crowd`]: crowd service client and level application
//! - [`geocode`]: Google Maps implementation of the `Geocoder` trait
//! - [`config`]: pipeline and client configuration
//! - [`error`]: error types

pub mod annotate;
pub mod config;
pub mod crowd;
pub mod error;
pub mod expand;
pub mod geocode;
pub mod group;
pub mod pipeline;

pub use config::{CrowdConfig, SearchConfig};
pub use crowd::CrowdClient;
pub use error::{Result, ServiceError};
pub use geocode::GoogleGeocoder;
pub use pipeline::SearchPipeline;
