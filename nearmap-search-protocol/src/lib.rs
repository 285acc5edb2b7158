//! Wire contract for the nearmap POI search service.
//!
//! This crate defines the inbound query parameters and the outbound
//! response envelope shared by the HTTP server and the search pipeline.
//!
//! # Response shape
//!
//! ```json
//! {
//!   "list": [
//!     {
//!       "type": "shop",
//!       "position": { "lat": 35.0, "lng": 139.0 },
//!       "list": [ { "guid": "...", "title": "...", ... } ]
//!     }
//!   ],
//!   "has_clowd": false
//! }
//! ```
//!
//! The `has_clowd` spelling is part of the deployed wire contract and is
//! kept as-is for client compatibility.

mod request;
mod response;

pub use request::SearchParams;
pub use response::{MediaRef, PoiEntry, PoiGroup, Position, SearchResponse};

/// Result cap applied when the caller does not send a count.
pub const DEFAULT_RESULT_COUNT: usize = 100;
