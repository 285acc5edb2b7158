//! The async seam to the geospatially-indexed key-value store.

use crate::cell::GridCell;
use crate::record::PoiRecord;
use crate::tier::ResolutionTier;
use async_trait::async_trait;
use thiserror::Error;

/// Errors from grid store lookups.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Query or network failure, retried by the backend before surfacing.
    #[error("store query failed: {0}")]
    Query(String),

    /// Rate limited by the store.
    #[error("store throttled: {0}")]
    Throttled(String),
}

impl StoreError {
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn throttled(msg: impl Into<String>) -> Self {
        Self::Throttled(msg.into())
    }
}

/// Paginated lookup of POI records for one category and one grid cell.
///
/// Implementations must fully drain the store's continuation cursor: a
/// single `query_cell` call returns every matching record across all pages.
/// Fine-tier lookups are prefix matches on the fine cell attribute (records
/// may be keyed finer than the search resolution); coarse and medium tiers
/// are exact matches against a secondary index.
///
/// An error here is fatal for the enclosing search: the ring expander does
/// not catch it.
#[async_trait]
pub trait GridStore: Send + Sync {
    async fn query_cell(
        &self,
        poi_type: &str,
        cell: &GridCell,
        tier: ResolutionTier,
    ) -> Result<Vec<PoiRecord>, StoreError>;
}
