//! Spatial grid indexing for the nearmap POI search service.
//!
//! The search pipeline consumes the hierarchical hexagonal grid as a black
//! box through the [`GridIndex`] trait: encode a coordinate to a cell at a
//! tier's resolution, and enumerate the concentric rings of cells around a
//! center cell. [`H3GridIndex`] implements the trait over the H3 grid,
//! whose cell identifiers are what the store's `h3-7`/`h3-8`/`h3-9`
//! attributes hold.

pub mod error;
mod h3;
mod index;

pub use error::{Result, SpatialError};
pub use h3::H3GridIndex;
pub use index::GridIndex;
