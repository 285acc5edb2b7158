//! DynamoDB table schema constants.
//!
//! Defines the attribute names used in the POI table.
//!
//! ## Table Schema
//!
//! ```text
//! Table: nearmap-poi (configurable)
//!
//! Primary Key:
//!   - type (String, Partition Key): POI category, e.g. "shop"
//!   - h3-9 (String, Sort Key): fine-resolution H3 cell, also the row guid
//!
//! Local Secondary Indexes:
//!   - LSI_type_h3-7: (type, h3-7) - coarse-tier exact-match lookups
//!   - LSI_type_h3-8: (type, h3-8) - medium-tier exact-match lookups
//!
//! Attributes:
//!   - latlon: String - "lat,lng" decimal degrees
//!   - h3-7, h3-8: String - cells at the coarser resolutions
//!   - locoguide_id: String (optional) - crowd provider identifier
//!   - title, tel, address: String - display metadata
//!   - image: String (optional) - media path, relative to the media base URL
//!   - facebook, twitter, instagram: String - social links
//!   - homepage, media1..media5: String - link addresses
//!   - has_xframe_options: String - six comma-separated positional flags
//!     (homepage first, then media1..media5)
//!   - star: Number (optional) - rating
//! ```
//!
//! The per-tier sort key and LSI names come from
//! `ResolutionTier::sort_key` / `ResolutionTier::index_name`.

/// Partition key attribute - POI category.
/// Note: "type" is a DynamoDB reserved word, use ExpressionAttributeNames.
pub const ATTR_TYPE: &str = "type";

/// Stored position, "lat,lng" in decimal degrees.
pub const ATTR_LATLON: &str = "latlon";

/// Crowd provider identifier (optional).
pub const ATTR_LOCOGUIDE_ID: &str = "locoguide_id";

/// Display title.
pub const ATTR_TITLE: &str = "title";

/// Phone number.
pub const ATTR_TEL: &str = "tel";

/// Street address.
pub const ATTR_ADDRESS: &str = "address";

/// Media path, relative to the media base URL (optional).
pub const ATTR_IMAGE: &str = "image";

/// Social links.
pub const ATTR_FACEBOOK: &str = "facebook";
pub const ATTR_TWITTER: &str = "twitter";
pub const ATTR_INSTAGRAM: &str = "instagram";

/// Homepage link address.
pub const ATTR_HOMEPAGE: &str = "homepage";

/// media1 through media5 link addresses, in positional order.
pub const MEDIA_ATTRS: [&str; 5] = ["media1", "media2", "media3", "media4", "media5"];

/// Six comma-separated embeddability flags (homepage, media1..media5).
pub const ATTR_XFRAME_OPTIONS: &str = "has_xframe_options";

/// Star rating (optional).
pub const ATTR_STAR: &str = "star";

/// Default table name.
pub const DEFAULT_TABLE_NAME: &str = "nearmap-poi";
