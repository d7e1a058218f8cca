//! Scheduler trigger endpoint.

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::post;

use crate::AppState;
use crate::error::ApiError;
use perangkat_scheduler::PassSummary;

pub fn router() -> Router<AppState> {
    Router::new().route("/run", post(run_pass))
}

/// Run one scheduling pass to completion. Cron hits this once a minute;
/// the response is the pass summary.
async fn run_pass(State(state): State<AppState>) -> Result<Json<PassSummary>, ApiError> {
    let summary = state.scheduler.run_pass().await?;
    Ok(Json(summary))
}
