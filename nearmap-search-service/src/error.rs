//! Service-level error types for the search pipeline.

use nearmap_core::StoreError;
use nearmap_spatial::SpatialError;
use thiserror::Error;

/// Errors that abort a search request.
///
/// Crowd-enrichment failures never surface here; they are caught inside
/// the pipeline and degrade to "no crowd data".
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No usable query coordinate (absent, unparseable, or the address
    /// did not geocode). Ring expansion cannot run without one.
    #[error("missing query coordinate: {0}")]
    MissingCoordinate(String),

    /// Invalid request parameters.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Store lookup failed after retries.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Grid index rejected the coordinate or a cell.
    #[error("spatial error: {0}")]
    Spatial(#[from] SpatialError),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
