//! Expanding-ring store lookup.

use crate::error::Result;
use nearmap_core::{Coordinate, GridStore, PoiRecord, ResolutionTier};
use nearmap_spatial::GridIndex;

/// Fixed ring budget: rings 0, 1 and 2 around the query cell, a worst case
/// of 1 + 6 + 12 = 19 cell lookups. A deliberate latency/recall tradeoff;
/// matches just outside the ring-2 boundary are missed.
pub const RING_RADIUS: u32 = 2;

/// Gather records for `poi_type` around `origin`, expanding ring by ring.
///
/// Ring 0 is always queried in full. After each completed ring beyond ring
/// 0 the accumulated count is checked against `desired`, and expansion
/// stops once it is reached; ring 0 alone never triggers the early stop.
/// `desired == 0` disables the check. Exhausting the ring budget returns
/// whatever accumulated. Cells within a ring are queried sequentially in
/// the grid index's ring order.
pub async fn expand_search(
    grid: &dyn GridIndex,
    store: &dyn GridStore,
    poi_type: &str,
    origin: Coordinate,
    tier: ResolutionTier,
    desired: usize,
) -> Result<Vec<PoiRecord>> {
    let center = grid.cell(origin, tier)?;
    let rings = grid.rings(&center, RING_RADIUS)?;

    let mut records = Vec::new();
    for (ring_index, ring) in rings.iter().enumerate() {
        for cell in ring {
            let mut batch = store.query_cell(poi_type, cell, tier).await?;
            records.append(&mut batch);
        }
        tracing::debug!(
            ring = ring_index,
            cells = ring.len(),
            accumulated = records.len(),
            "ring completed"
        );
        if ring_index > 0 && desired > 0 && records.len() >= desired {
            break;
        }
    }

    tracing::debug!(poi_type, count = records.len(), "ring expansion finished");
    Ok(records)
}
