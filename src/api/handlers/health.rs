use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

/// Health check endpoint. The converter holds no external connections, so
/// a running process is a healthy one.
pub async fn health_check() -> (StatusCode, Json<Value>) {
    tracing::debug!("Health check passed");
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Liveness check endpoint - indicates if server process is alive
pub async fn liveness_check() -> (StatusCode, Json<Value>) {
    tracing::debug!("Liveness check passed");
    (
        StatusCode::OK,
        Json(json!({
            "status": "alive"
        })),
    )
}
