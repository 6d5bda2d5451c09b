use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers::brands::{export_directory, import_bundle, BrandState, SharedBrandState};
use super::handlers::health::{health_check, liveness_check};
use super::handlers::metadata::capability_statement;
use crate::config::Config;
use crate::middleware::{log_request, request_id};

pub fn brand_routes(state: SharedBrandState) -> Router {
    Router::new()
        .route("/brands/$import", post(import_bundle))
        .route("/brands/$export", post(export_directory))
        .with_state(state)
}

pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/live", get(liveness_check))
}

pub fn metadata_routes() -> Router {
    Router::new().route("/metadata", get(capability_statement))
}

/// Full application with middleware
pub fn app(config: Arc<Config>) -> Router {
    let state = Arc::new(BrandState { config });

    Router::new()
        .merge(brand_routes(state))
        .merge(metadata_routes())
        .merge(health_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(from_fn(request_id))
                .layer(from_fn(log_request)),
        )
}
