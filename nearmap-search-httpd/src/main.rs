//! Nearmap Search HTTP Server
//!
//! Standalone HTTP front end for the proximity POI search pipeline. Serves
//! "what is near this location" queries against the DynamoDB-backed grid
//! store, with optional address geocoding and crowd-level enrichment.
//!
//! # Endpoints
//!
//! - `GET /v1/search` - Execute a proximity search
//! - `GET /v1/health` - Health check
//!
//! # Example
//!
//! ```bash
//! nearmap-search-httpd \
//!   --table-name nearmap-poi \
//!   --listen 0.0.0.0:8080 \
//!   --crowd-address https://api.example.com/spots
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use clap::Parser;
use nearmap_core::RetryPolicy;
use nearmap_search_protocol::SearchParams;
use nearmap_search_service::{
    CrowdClient, CrowdConfig, GoogleGeocoder, SearchConfig, SearchPipeline, ServiceError,
};
use nearmap_spatial::H3GridIndex;
use nearmap_store_aws::{DynamoConfig, DynamoGridStore};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Nearmap Search HTTP Server
#[derive(Parser, Debug)]
#[command(name = "nearmap-search-httpd")]
#[command(about = "HTTP server for proximity POI search")]
struct Args {
    /// Listen address
    #[arg(long, default_value = "0.0.0.0:8080", env = "NEARMAP_LISTEN")]
    listen: SocketAddr,

    /// DynamoDB table holding the POI index
    #[arg(long, default_value = "nearmap-poi", env = "NEARMAP_TABLE_NAME")]
    table_name: String,

    /// AWS region override (SDK default chain when omitted)
    #[arg(long, env = "NEARMAP_AWS_REGION")]
    aws_region: Option<String>,

    /// DynamoDB endpoint override (e.g. LocalStack)
    #[arg(long, env = "NEARMAP_DYNAMODB_ENDPOINT")]
    dynamodb_endpoint: Option<String>,

    /// DynamoDB operation timeout in milliseconds
    #[arg(long, default_value = "10000", env = "NEARMAP_STORE_TIMEOUT_MS")]
    store_timeout_ms: u64,

    /// Retry attempts per store query and crowd page request
    #[arg(long, default_value = "3", env = "NEARMAP_RETRY_ATTEMPTS")]
    retry_attempts: u32,

    /// Delay between retry attempts in milliseconds
    #[arg(long, default_value = "1000", env = "NEARMAP_RETRY_DELAY_MS")]
    retry_delay_ms: u64,

    /// Base URL for stored image paths
    #[arg(long, env = "NEARMAP_MEDIA_BASE_URL")]
    media_base_url: Option<String>,

    /// Result cap when the request does not send a count
    #[arg(long, default_value = "100", env = "NEARMAP_DEFAULT_COUNT")]
    default_count: usize,

    /// Crowd service endpoint; enrichment is disabled when omitted
    #[arg(long, env = "NEARMAP_CROWD_ADDRESS")]
    crowd_address: Option<String>,

    /// Crowd service bearer token
    #[arg(long, env = "NEARMAP_CROWD_TOKEN", hide_env_values = true)]
    crowd_token: Option<String>,

    /// Google Maps Geocoding API key; address lookup is disabled when omitted
    #[arg(long, env = "NEARMAP_GEOCODE_API_KEY", hide_env_values = true)]
    geocode_api_key: Option<String>,
}

/// Application state shared across handlers.
struct AppState {
    pipeline: SearchPipeline,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("nearmap_search_httpd=info".parse().unwrap())
                .add_directive("nearmap_search_service=info".parse().unwrap())
                .add_directive("tower_http=info".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    info!(
        table_name = %args.table_name,
        listen = %args.listen,
        crowd = args.crowd_address.is_some(),
        geocoder = args.geocode_api_key.is_some(),
        "Starting Nearmap Search HTTP Server"
    );

    let retry = RetryPolicy::new(
        args.retry_attempts,
        Duration::from_millis(args.retry_delay_ms),
    );

    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = DynamoGridStore::new(
        &sdk_config,
        DynamoConfig {
            table_name: args.table_name,
            region: args.aws_region,
            endpoint: args.dynamodb_endpoint,
            timeout_ms: Some(args.store_timeout_ms),
        },
    )
    .await
    .with_retry_policy(retry);

    let search_config = SearchConfig {
        media_base_url: args.media_base_url,
        default_count: args.default_count,
    };
    let mut pipeline = SearchPipeline::new(Arc::new(H3GridIndex), Arc::new(store), search_config);

    if let (Some(address), Some(token)) = (args.crowd_address, args.crowd_token) {
        let crowd_config = CrowdConfig::new(address, token).with_retry(retry);
        match CrowdClient::new(crowd_config) {
            Ok(client) => {
                pipeline = pipeline.with_crowd(client);
                info!("Crowd enrichment enabled");
            }
            Err(e) => error!(error = %e, "Failed to build crowd client, enrichment disabled"),
        }
    }

    if let Some(api_key) = args.geocode_api_key {
        let geocoder = GoogleGeocoder::new(reqwest::Client::new(), api_key).with_retry(retry);
        pipeline = pipeline.with_geocoder(Arc::new(geocoder));
        info!("Address geocoding enabled");
    }

    let app = router(Arc::new(AppState { pipeline }));

    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .expect("Failed to bind address");

    info!(address = %args.listen, "Server listening");

    axum::serve(listener, app).await.expect("Server error");
}

fn router(state: Arc<AppState>) -> Router {
    // Browser clients call this directly; mirror the permissive CORS the
    // previous deployment shipped.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/v1/search", get(handle_search))
        .route("/v1/health", get(handle_health))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Error body for non-2xx responses.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Handle GET /v1/search
async fn handle_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    match state.pipeline.search(&params).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            let status = match &e {
                ServiceError::MissingCoordinate(_) | ServiceError::InvalidRequest(_) => {
                    StatusCode::BAD_REQUEST
                }
                ServiceError::Store(_) | ServiceError::Spatial(_) => {
                    error!(error = %e, "Internal error during search");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            };
            (
                status,
                Json(ErrorBody {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Health check response.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Handle GET /v1/health
async fn handle_health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
