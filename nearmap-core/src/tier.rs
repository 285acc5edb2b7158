//! Resolution tier selection.
//!
//! The store indexes each POI at three H3 resolutions. The caller's map
//! zoom level picks which tier a search runs against; coarser tiers cover
//! more ground per cell and suit zoomed-out views.

/// One of the three spatial-grid granularity levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionTier {
    /// H3 resolution 7, for zoom levels <= 13.
    Coarse,
    /// H3 resolution 8, for zoom levels 14-15.
    Medium,
    /// H3 resolution 9, for zoom levels >= 16 (the default).
    Fine,
}

impl ResolutionTier {
    /// Map a display zoom level to a tier. Total: any zoom (or none) maps
    /// to exactly one tier; an unspecified zoom behaves like 16.
    pub fn from_zoom(zoom: Option<i32>) -> Self {
        match zoom {
            Some(z) if z <= 13 => ResolutionTier::Coarse,
            Some(z) if z <= 15 => ResolutionTier::Medium,
            _ => ResolutionTier::Fine,
        }
    }

    /// H3 resolution number for this tier.
    pub fn h3_resolution(self) -> u8 {
        match self {
            ResolutionTier::Coarse => 7,
            ResolutionTier::Medium => 8,
            ResolutionTier::Fine => 9,
        }
    }

    /// Store attribute holding the cell at this tier's resolution.
    ///
    /// The fine-tier attribute doubles as the table's primary sort key.
    pub fn sort_key(self) -> &'static str {
        match self {
            ResolutionTier::Coarse => "h3-7",
            ResolutionTier::Medium => "h3-8",
            ResolutionTier::Fine => "h3-9",
        }
    }

    /// Secondary index for exact-match lookups at this tier.
    ///
    /// `None` for the fine tier, which is prefix-searchable directly on the
    /// primary sort key.
    pub fn index_name(self) -> Option<&'static str> {
        match self {
            ResolutionTier::Coarse => Some("LSI_type_h3-7"),
            ResolutionTier::Medium => Some("LSI_type_h3-8"),
            ResolutionTier::Fine => None,
        }
    }
}
