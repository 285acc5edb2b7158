//! Stored point-of-interest rows.

use crate::cell::GridCell;
use crate::geo::Coordinate;
use crate::tier::ResolutionTier;

/// One stored point-of-interest row.
///
/// Owned by the store and read-only to the search pipeline. The fine-tier
/// cell doubles as the row's public identifier (`guid` on the wire).
#[derive(Debug, Clone, PartialEq)]
pub struct PoiRecord {
    /// Category, the table partition key (e.g. "shop").
    pub poi_type: String,
    /// Stored position.
    pub position: Coordinate,
    /// Grid cell at H3 resolution 7.
    pub cell_coarse: GridCell,
    /// Grid cell at H3 resolution 8.
    pub cell_medium: GridCell,
    /// Grid cell at H3 resolution 9 (primary sort key, also the guid).
    pub cell_fine: GridCell,
    /// Identifier in the crowd provider's namespace, when linked.
    pub locoguide_id: Option<String>,
    pub title: String,
    pub tel: String,
    pub address: String,
    /// Image path, resolved against the media base URL at output time.
    pub image: Option<String>,
    pub facebook: String,
    pub twitter: String,
    pub instagram: String,
    pub homepage: String,
    /// media1 through media5 link addresses.
    pub media: [String; 5],
    /// Raw comma-separated embeddability flags, positional: homepage first,
    /// then media1..media5.
    pub xframe_options: String,
    pub star: Option<i64>,
}

impl PoiRecord {
    /// Cell identifier at the given tier.
    pub fn cell(&self, tier: ResolutionTier) -> &GridCell {
        match tier {
            ResolutionTier::Coarse => &self.cell_coarse,
            ResolutionTier::Medium => &self.cell_medium,
            ResolutionTier::Fine => &self.cell_fine,
        }
    }

    /// The six positional embeddability flags, padded with "0" when the
    /// stored attribute has fewer entries.
    pub fn xframe_flags(&self) -> [&str; 6] {
        let mut flags = ["0"; 6];
        for (slot, value) in flags.iter_mut().zip(self.xframe_options.split(',')) {
            let value = value.trim();
            if !value.is_empty() {
                *slot = value;
            }
        }
        flags
    }
}

/// A [`PoiRecord`] annotated with its distance from the query point.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedRecord {
    pub record: PoiRecord,
    /// Great-circle distance from the query coordinate, in kilometers.
    pub distance_km: f64,
}
