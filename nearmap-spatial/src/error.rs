//! Error types for the spatial grid index.

use thiserror::Error;

/// Spatial grid errors.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// Coordinate outside the valid latitude/longitude domain.
    #[error("invalid coordinate: lat={lat}, lng={lng}")]
    InvalidCoordinate { lat: f64, lng: f64 },

    /// Cell identifier not recognized by the grid index.
    #[error("invalid grid cell: {0}")]
    InvalidCell(String),
}

/// Result type for spatial operations.
pub type Result<T> = std::result::Result<T, SpatialError>;
