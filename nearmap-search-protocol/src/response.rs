//! Search response types.

use serde::{Deserialize, Serialize};

/// Search response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Result groups in traversal order.
    pub list: Vec<PoiGroup>,

    /// True when at least one entry received a crowd classification from
    /// the external service. Spelling is wire-frozen.
    pub has_clowd: bool,
}

/// A coordinate shared by every entry in a group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lng: f64,
}

/// One group of coincident POI entries.
///
/// Entries are appended to the previous group only when their coordinate
/// exactly matches the immediately preceding one; the list is never empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoiGroup {
    /// POI category (echoed from the query).
    #[serde(rename = "type")]
    pub poi_type: String,

    pub position: Position,

    /// Entries at this position, in result order.
    pub list: Vec<PoiEntry>,
}

/// A linked page and whether it may be embedded in a frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub address: String,
    /// Positional flag parsed from the stored comma-separated field.
    pub has_xframe_options: String,
}

/// One point of interest in the response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoiEntry {
    /// Row identifier (the fine-resolution grid cell value).
    pub guid: String,

    pub title: String,
    pub tel: String,
    pub address: String,

    /// Great-circle distance from the query point in kilometers. Present
    /// only when a query coordinate was available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,

    /// Resolved image URL, or empty string when the record has no image.
    pub image: String,

    pub facebook: String,
    pub twitter: String,
    pub instagram: String,

    pub homepage: MediaRef,
    pub media1: MediaRef,
    pub media2: MediaRef,
    pub media3: MediaRef,
    pub media4: MediaRef,
    pub media5: MediaRef,

    /// Star rating, 0 when unrated.
    pub star: i64,

    /// Crowd provider identifier, only for linked records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locoguide_id: Option<String>,

    /// Occupancy level 0-3; 0 means unclassified, not "lowest occupancy".
    /// Only present alongside `locoguide_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crowd_lv: Option<u8>,
}
