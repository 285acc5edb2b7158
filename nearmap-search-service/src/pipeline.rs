//! The search pipeline entry point.

use std::sync::Arc;

use nearmap_core::{Coordinate, Geocoder, GridStore, ResolutionTier};
use nearmap_search_protocol::{SearchParams, SearchResponse};
use nearmap_spatial::GridIndex;

use crate::annotate::{annotate, sort_and_truncate};
use crate::config::SearchConfig;
use crate::crowd::CrowdClient;
use crate::error::{Result, ServiceError};
use crate::expand::expand_search;
use crate::group::group_records;

/// One assembled search pipeline with injected collaborators.
///
/// The grid index, store, geocoder and crowd client are constructed once
/// at startup and shared across requests; the pipeline itself holds no
/// per-request state.
pub struct SearchPipeline {
    grid: Arc<dyn GridIndex>,
    store: Arc<dyn GridStore>,
    geocoder: Option<Arc<dyn Geocoder>>,
    crowd: Option<CrowdClient>,
    config: SearchConfig,
}

impl SearchPipeline {
    pub fn new(grid: Arc<dyn GridIndex>, store: Arc<dyn GridStore>, config: SearchConfig) -> Self {
        Self {
            grid,
            store,
            geocoder: None,
            crowd: None,
            config,
        }
    }

    /// Attach an address geocoder. Without one, requests carrying only an
    /// address are rejected.
    pub fn with_geocoder(mut self, geocoder: Arc<dyn Geocoder>) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// Attach a crowd enrichment client. Without one, every response ships
    /// `has_clowd: false`.
    pub fn with_crowd(mut self, crowd: CrowdClient) -> Self {
        self.crowd = Some(crowd);
        self
    }

    /// Run one search: resolve the origin, expand rings, annotate, order,
    /// group and enrich.
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponse> {
        if params.poi_type.is_empty() {
            return Err(ServiceError::InvalidRequest(
                "type must not be empty".to_string(),
            ));
        }

        let origin = self.resolve_origin(params).await?;
        let tier = ResolutionTier::from_zoom(params.zoom);
        let count = params.count.unwrap_or(self.config.default_count);

        let records = expand_search(
            self.grid.as_ref(),
            self.store.as_ref(),
            &params.poi_type,
            origin,
            tier,
            count,
        )
        .await?;
        tracing::info!(
            poi_type = %params.poi_type,
            tier = ?tier,
            found = records.len(),
            "ring expansion complete"
        );

        let annotated = annotate(records, origin);
        let ordered = sort_and_truncate(annotated, params.sort, count);
        let mut grouped = group_records(ordered, &params.poi_type, &self.config);

        let has_clowd = match &self.crowd {
            Some(crowd) => crowd.enrich(&mut grouped.groups, &grouped.candidates).await,
            None => false,
        };

        Ok(SearchResponse {
            list: grouped.groups,
            has_clowd,
        })
    }

    /// Query coordinate: the explicit `latlon` parameter, or the geocoded
    /// address. No resolvable coordinate fails the request.
    async fn resolve_origin(&self, params: &SearchParams) -> Result<Coordinate> {
        if let Some(latlon) = &params.latlon {
            return Coordinate::parse(latlon).ok_or_else(|| {
                ServiceError::InvalidRequest(format!("malformed latlon {latlon:?}"))
            });
        }

        let Some(address) = params.address.as_deref().filter(|a| !a.is_empty()) else {
            return Err(ServiceError::MissingCoordinate(
                "neither latlon nor address given".to_string(),
            ));
        };
        let Some(geocoder) = &self.geocoder else {
            return Err(ServiceError::MissingCoordinate(
                "no geocoder configured for address lookup".to_string(),
            ));
        };

        match geocoder.geocode(address).await {
            Ok(Some(origin)) => Ok(origin),
            Ok(None) => Err(ServiceError::MissingCoordinate(format!(
                "address {address:?} did not resolve"
            ))),
            Err(error) => {
                tracing::warn!(%error, "geocoding failed");
                Err(ServiceError::MissingCoordinate(format!(
                    "address {address:?} could not be geocoded"
                )))
            }
        }
    }
}
