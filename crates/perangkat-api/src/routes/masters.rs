//! Master generation endpoints.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::AppState;
use crate::error::ApiError;
use perangkat_core::ResourceId;
use perangkat_core::master::GenerationStatus;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/generation", get(list_generation))
        .route("/{id}/generate", post(trigger_generate))
}

#[derive(Debug, Serialize)]
struct GenerationRowResponse {
    id: String,
    jenis: String,
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bab_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bab_nomor: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bab_judul: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    current_step: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_steps: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_path: Option<String>,
}

impl From<GenerationStatus> for GenerationRowResponse {
    fn from(row: GenerationStatus) -> Self {
        Self {
            id: row.id.to_string(),
            jenis: row.jenis.as_str().to_string(),
            status: row.status.as_str().to_string(),
            bab_id: row.bab_id.map(|id| id.to_string()),
            bab_nomor: row.bab.as_ref().map(|bab| bab.nomor),
            bab_judul: row.bab.map(|bab| bab.judul),
            current_step: row.current_step,
            total_steps: row.total_steps,
            file_path: row.file_path,
        }
    }
}

/// List a master's generation bookkeeping rows, chapter info included.
async fn list_generation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<GenerationRowResponse>>, ApiError> {
    let rows = state
        .generation
        .list_for_master(ResourceId::from_uuid(id))
        .await?;
    let response: Vec<GenerationRowResponse> =
        rows.into_iter().map(GenerationRowResponse::from).collect();
    Ok(Json(response))
}

/// Kick off full generation for one master: (re)initialize the bookkeeping
/// rows, then hand the master to the orchestrator.
async fn trigger_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let master_id = ResourceId::from_uuid(id);
    state.masters.get(master_id).await?;
    state.generation.init_for_master(master_id).await?;
    state.orchestrator.orchestrate(master_id).await?;
    Ok(Json(json!({ "success": true, "master_id": master_id })))
}
