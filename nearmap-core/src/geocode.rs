//! The async seam to the address geocoding collaborator.

use crate::geo::Coordinate;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from the geocoding collaborator.
///
/// The pipeline treats any geocoding error the same as an unresolvable
/// address: it logs and proceeds with no coordinate, which in turn fails
/// the search (ring expansion requires a coordinate).
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("geocoding request failed: {0}")]
    Request(String),

    #[error("malformed geocoding response: {0}")]
    Malformed(String),
}

/// Resolve a free-form address to a coordinate.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Returns `Ok(None)` when the address does not resolve to any location.
    async fn geocode(&self, address: &str) -> Result<Option<Coordinate>, GeocodeError>;
}
