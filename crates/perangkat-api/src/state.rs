//! Application state.

use perangkat_core::delegate::{GenerationOrchestrator, StructureGenerator};
use perangkat_core::store::{GenerationStore, MasterStore};
use perangkat_db::{PgGenerationStore, PgMasterStore};
use perangkat_scheduler::{HttpOrchestrator, HttpStructureGenerator, Scheduler, SchedulerConfig};
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub masters: Arc<dyn MasterStore>,
    pub generation: Arc<dyn GenerationStore>,
    pub orchestrator: Arc<dyn GenerationOrchestrator>,
    pub scheduler: Arc<Scheduler>,
}

impl AppState {
    pub fn new(pool: PgPool, config: SchedulerConfig) -> Self {
        let masters: Arc<dyn MasterStore> = Arc::new(PgMasterStore::new(pool.clone()));
        let generation: Arc<dyn GenerationStore> = Arc::new(PgGenerationStore::new(pool.clone()));
        let orchestrator: Arc<dyn GenerationOrchestrator> = Arc::new(HttpOrchestrator::new(
            config.orchestrator_url.clone(),
            config.service_key.clone(),
        ));
        let structure: Arc<dyn StructureGenerator> = Arc::new(HttpStructureGenerator::new(
            config.structure_url.clone(),
            config.service_key.clone(),
        ));
        let scheduler = Arc::new(Scheduler::new(
            masters.clone(),
            generation.clone(),
            orchestrator.clone(),
            structure,
            config,
        ));

        Self {
            pool,
            masters,
            generation,
            orchestrator,
            scheduler,
        }
    }
}
