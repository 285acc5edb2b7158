//! Grid index trait.

use crate::error::Result;
use nearmap_core::{Coordinate, GridCell, ResolutionTier};

/// Black-box interface to the hierarchical spatial grid.
///
/// Cell identifiers are deterministic pure functions of (coordinate,
/// resolution); the pipeline never recomputes or inspects them, only
/// compares and queries them.
pub trait GridIndex: Send + Sync {
    /// Cell containing `position` at the tier's resolution.
    fn cell(&self, position: Coordinate, tier: ResolutionTier) -> Result<GridCell>;

    /// Rings of cells around `center`, indexed by ring distance 0..=radius.
    ///
    /// Ring 0 is the center cell itself; ring k holds the cells exactly k
    /// steps away in the grid's adjacency graph, so traversing the returned
    /// rings in order visits cells in non-decreasing spatial distance.
    fn rings(&self, center: &GridCell, radius: u32) -> Result<Vec<Vec<GridCell>>>;
}
