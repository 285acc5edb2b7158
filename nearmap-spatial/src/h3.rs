//! H3-backed grid index.

use crate::error::{Result, SpatialError};
use crate::index::GridIndex;
use h3o::{CellIndex, LatLng, Resolution};
use nearmap_core::{Coordinate, GridCell, ResolutionTier};
use std::str::FromStr;

/// Grid index over the H3 hexagonal hierarchy.
///
/// Stateless; cheap to construct and share.
#[derive(Debug, Clone, Copy, Default)]
pub struct H3GridIndex;

impl H3GridIndex {
    pub fn new() -> Self {
        Self
    }

    fn resolution(tier: ResolutionTier) -> Resolution {
        match tier {
            ResolutionTier::Coarse => Resolution::Seven,
            ResolutionTier::Medium => Resolution::Eight,
            ResolutionTier::Fine => Resolution::Nine,
        }
    }
}

impl GridIndex for H3GridIndex {
    fn cell(&self, position: Coordinate, tier: ResolutionTier) -> Result<GridCell> {
        // h3o wraps out-of-range finite coordinates instead of rejecting
        // them, which would silently search the wrong location.
        if !(-90.0..=90.0).contains(&position.lat) || !(-180.0..=180.0).contains(&position.lng) {
            return Err(SpatialError::InvalidCoordinate {
                lat: position.lat,
                lng: position.lng,
            });
        }
        let latlng =
            LatLng::new(position.lat, position.lng).map_err(|_| SpatialError::InvalidCoordinate {
                lat: position.lat,
                lng: position.lng,
            })?;
        let cell = latlng.to_cell(Self::resolution(tier));
        Ok(GridCell::new(cell.to_string()))
    }

    fn rings(&self, center: &GridCell, radius: u32) -> Result<Vec<Vec<GridCell>>> {
        let cell = CellIndex::from_str(center.as_str())
            .map_err(|_| SpatialError::InvalidCell(center.as_str().to_string()))?;

        let mut rings: Vec<Vec<GridCell>> = vec![Vec::new(); radius as usize + 1];
        for (neighbor, distance) in cell.grid_disk_distances::<Vec<_>>(radius) {
            rings[distance as usize].push(GridCell::new(neighbor.to_string()));
        }
        Ok(rings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKYO: Coordinate = Coordinate {
        lat: 35.6812,
        lng: 139.7671,
    };

    #[test]
    fn test_cell_is_deterministic() {
        let grid = H3GridIndex::new();
        let a = grid.cell(TOKYO, ResolutionTier::Fine).unwrap();
        let b = grid.cell(TOKYO, ResolutionTier::Fine).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_cell_differs_per_tier() {
        let grid = H3GridIndex::new();
        let coarse = grid.cell(TOKYO, ResolutionTier::Coarse).unwrap();
        let medium = grid.cell(TOKYO, ResolutionTier::Medium).unwrap();
        let fine = grid.cell(TOKYO, ResolutionTier::Fine).unwrap();
        assert_ne!(coarse, medium);
        assert_ne!(medium, fine);
        // H3 string indexes encode the resolution in the second digit.
        assert!(coarse.as_str().starts_with('8'));
        assert!(fine.as_str().starts_with('8'));
    }

    #[test]
    fn test_invalid_latitude_rejected() {
        let grid = H3GridIndex::new();
        for lat in [95.0, -95.0, f64::NAN] {
            let err = grid
                .cell(Coordinate::new(lat, 139.0), ResolutionTier::Fine)
                .unwrap_err();
            assert!(matches!(err, SpatialError::InvalidCoordinate { .. }));
        }
    }

    #[test]
    fn test_invalid_longitude_rejected() {
        let grid = H3GridIndex::new();
        let err = grid
            .cell(Coordinate::new(35.0, 181.0), ResolutionTier::Fine)
            .unwrap_err();
        assert!(matches!(err, SpatialError::InvalidCoordinate { .. }));
    }

    #[test]
    fn test_domain_boundaries_accepted() {
        let grid = H3GridIndex::new();
        assert!(grid.cell(Coordinate::new(90.0, 180.0), ResolutionTier::Fine).is_ok());
        assert!(grid.cell(Coordinate::new(-90.0, -180.0), ResolutionTier::Fine).is_ok());
    }

    #[test]
    fn test_ring_sizes_match_hexagonal_budget() {
        let grid = H3GridIndex::new();
        let center = grid.cell(TOKYO, ResolutionTier::Fine).unwrap();
        let rings = grid.rings(&center, 2).unwrap();
        assert_eq!(rings.len(), 3);
        assert_eq!(rings[0].len(), 1);
        assert_eq!(rings[0][0], center);
        assert_eq!(rings[1].len(), 6);
        assert_eq!(rings[2].len(), 12);
    }

    #[test]
    fn test_rings_radius_zero() {
        let grid = H3GridIndex::new();
        let center = grid.cell(TOKYO, ResolutionTier::Coarse).unwrap();
        let rings = grid.rings(&center, 0).unwrap();
        assert_eq!(rings, vec![vec![center]]);
    }

    #[test]
    fn test_rings_rejects_garbage_cell() {
        let grid = H3GridIndex::new();
        let err = grid.rings(&GridCell::new("not-a-cell"), 2).unwrap_err();
        assert!(matches!(err, SpatialError::InvalidCell(_)));
    }
}
