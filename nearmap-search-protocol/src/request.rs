//! Inbound search parameters.

use serde::Deserialize;

/// Query-string parameters for `GET /v1/search`.
///
/// `latlon` is required unless `address` is supplied and the geocoding
/// collaborator resolves it. Unset `zoom` and `count` fall back to the
/// crate defaults at pipeline time.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// POI category to search (store partition key).
    #[serde(rename = "type")]
    pub poi_type: String,

    /// Query coordinate as "lat,lng".
    pub latlon: Option<String>,

    /// Free-form address, geocoded when no coordinate was given.
    pub address: Option<String>,

    /// Display zoom level, selects the search resolution tier.
    pub zoom: Option<i32>,

    /// Result cap. 0 disables truncation.
    pub count: Option<usize>,

    /// Sort results by ascending distance and truncate to `count`.
    #[serde(default)]
    pub sort: bool,
}
