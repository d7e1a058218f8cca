//! Health check endpoints.

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::get;
use serde_json::{Value, json};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(ready))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// Readiness includes a database round trip.
async fn ready(State(state): State<AppState>) -> Json<Value> {
    let db_healthy = perangkat_db::health_check(&state.pool).await.is_ok();
    let status = if db_healthy { "ready" } else { "degraded" };
    Json(json!({ "status": status, "db_healthy": db_healthy }))
}
