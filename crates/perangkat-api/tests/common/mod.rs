//! Shared helpers for the API integration tests.
//!
//! The router is built exactly as `main.rs` builds it, but backed by
//! in-memory fakes and a lazy pool, so no test needs a live database.

// Not every test binary exercises every helper.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tower::ServiceExt;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use perangkat_api::AppState;
use perangkat_api::routes;
use perangkat_core::delegate::{GenerationOrchestrator, StructureGenerator};
use perangkat_core::master::{Bab, GenerationStatus, Master};
use perangkat_core::status::GenerateStatus;
use perangkat_core::store::{GenerationStore, MasterStore};
use perangkat_core::{Error, ResourceId, Result};
use perangkat_scheduler::{Scheduler, SchedulerConfig};

pub struct FakeMasterStore {
    masters: Mutex<Vec<Master>>,
    fail: bool,
}

impl FakeMasterStore {
    pub fn with_masters(masters: Vec<Master>) -> Self {
        Self {
            masters: Mutex::new(masters),
            fail: false,
        }
    }

    /// A store whose every call fails, for surfacing store errors over HTTP.
    pub fn failing() -> Self {
        Self {
            masters: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn master(status: GenerateStatus) -> Master {
        Master {
            id: ResourceId::new(),
            generate_status: status,
            generate_updated_at: Utc::now() - chrono::Duration::minutes(5),
            percobaan: 0,
        }
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            return Err(Error::Store("connection reset by peer".to_string()));
        }
        Ok(())
    }

    fn filtered(&self, limit: i64, predicate: impl Fn(GenerateStatus) -> bool) -> Vec<Master> {
        let mut matched: Vec<Master> = self
            .masters
            .lock()
            .unwrap()
            .iter()
            .filter(|master| predicate(master.generate_status))
            .cloned()
            .collect();
        matched.sort_by_key(|master| master.generate_updated_at);
        matched.truncate(limit.max(0) as usize);
        matched
    }
}

#[async_trait]
impl MasterStore for FakeMasterStore {
    async fn get(&self, id: ResourceId) -> Result<Master> {
        self.check()?;
        self.masters
            .lock()
            .unwrap()
            .iter()
            .find(|master| master.id == id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("master {id}")))
    }

    async fn count_running(&self) -> Result<i64> {
        self.check()?;
        let count = self
            .masters
            .lock()
            .unwrap()
            .iter()
            .filter(|master| master.generate_status.is_running())
            .count();
        Ok(count as i64)
    }

    async fn list_awaiting_sync(&self, limit: i64) -> Result<Vec<Master>> {
        self.check()?;
        Ok(self.filtered(limit, |status| status == GenerateStatus::BelumSiap))
    }

    async fn list_ready_to_orchestrate(&self, limit: i64) -> Result<Vec<Master>> {
        self.check()?;
        Ok(self.filtered(limit, |status| {
            matches!(
                status,
                GenerateStatus::BelumMulai | GenerateStatus::Menunggu
            )
        }))
    }

    async fn list_stale_running(
        &self,
        _older_than: DateTime<Utc>,
        _limit: i64,
    ) -> Result<Vec<Master>> {
        self.check()?;
        Ok(Vec::new())
    }

    async fn transition(
        &self,
        id: ResourceId,
        from: GenerateStatus,
        to: GenerateStatus,
    ) -> Result<()> {
        self.check()?;
        from.validate_transition(to)?;
        let mut masters = self.masters.lock().unwrap();
        let master = masters
            .iter_mut()
            .find(|master| master.id == id)
            .ok_or_else(|| Error::NotFound(format!("master {id}")))?;
        master.generate_status = to;
        master.generate_updated_at = Utc::now();
        Ok(())
    }

    async fn list_babs(&self, _master_id: ResourceId) -> Result<Vec<Bab>> {
        self.check()?;
        Ok(Vec::new())
    }
}

pub struct FakeGenerationStore {
    rows: Vec<GenerationStatus>,
    init_calls: Mutex<Vec<ResourceId>>,
}

impl FakeGenerationStore {
    pub fn with_rows(rows: Vec<GenerationStatus>) -> Self {
        Self {
            rows,
            init_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn init_calls(&self) -> Vec<ResourceId> {
        self.init_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationStore for FakeGenerationStore {
    async fn init_for_master(&self, master_id: ResourceId) -> Result<()> {
        self.init_calls.lock().unwrap().push(master_id);
        Ok(())
    }

    async fn sync_progress(&self, _master_id: ResourceId) -> Result<()> {
        Ok(())
    }

    async fn finalize_after_sync(&self, _master_id: ResourceId) -> Result<()> {
        Ok(())
    }

    async fn list_for_master(&self, master_id: ResourceId) -> Result<Vec<GenerationStatus>> {
        Ok(self
            .rows
            .iter()
            .filter(|row| row.master_id == master_id)
            .cloned()
            .collect())
    }
}

pub struct FakeOrchestrator {
    calls: Mutex<Vec<ResourceId>>,
}

impl FakeOrchestrator {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<ResourceId> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationOrchestrator for FakeOrchestrator {
    async fn orchestrate(&self, master_id: ResourceId) -> Result<()> {
        self.calls.lock().unwrap().push(master_id);
        Ok(())
    }
}

struct FakeStructureGenerator;

#[async_trait]
impl StructureGenerator for FakeStructureGenerator {
    async fn generate_structure(&self, _bab_id: ResourceId) -> Result<()> {
        Ok(())
    }
}

/// Build the application router with the production middleware stack, backed
/// by the given fakes.
pub fn build_test_app(
    masters: Arc<FakeMasterStore>,
    generation: Arc<FakeGenerationStore>,
    orchestrator: Arc<FakeOrchestrator>,
) -> Router {
    let masters: Arc<dyn MasterStore> = masters;
    let generation: Arc<dyn GenerationStore> = generation;
    let orchestrator: Arc<dyn GenerationOrchestrator> = orchestrator;
    let structure: Arc<dyn StructureGenerator> = Arc::new(FakeStructureGenerator);

    let config = SchedulerConfig {
        max_concurrent: 3,
        stuck_threshold_secs: 600,
        orchestrator_url: "http://localhost:9/orchestrate".to_string(),
        structure_url: "http://localhost:9/structure".to_string(),
        service_key: String::new(),
    };
    let scheduler = Arc::new(Scheduler::new(
        masters.clone(),
        generation.clone(),
        orchestrator.clone(),
        structure,
        config,
    ));

    // Lazy pool at a closed port: only /health/ready touches it, and that
    // endpoint must see an unreachable database.
    let pool = PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(PgConnectOptions::new().host("127.0.0.1").port(9));

    let state = AppState {
        pool,
        masters,
        generation,
        orchestrator,
        scheduler,
    };

    routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
