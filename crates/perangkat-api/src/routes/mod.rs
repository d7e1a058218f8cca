//! API routes.

pub mod health;
pub mod masters;
pub mod scheduler;

use crate::AppState;
use axum::Router;

/// Build the main API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_router())
        .merge(health::router())
        .with_state(state)
}

fn api_router() -> Router<AppState> {
    Router::new()
        .nest("/scheduler", scheduler::router())
        .nest("/masters", masters::router())
}
