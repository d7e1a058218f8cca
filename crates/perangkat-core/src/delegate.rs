//! Traits for the downstream generation services.
//!
//! The actual document generation runs elsewhere: an orchestrator service
//! drives a master's step sequence, and a structure service derives a bab's
//! material ahead of orchestration. Both are opaque HTTP functions to us;
//! the `reqwest` implementations live in `perangkat-scheduler`.

use async_trait::async_trait;

use crate::{ResourceId, Result};

/// Hands a master to the downstream orchestrator, which owns all status
/// transitions from there on.
#[async_trait]
pub trait GenerationOrchestrator: Send + Sync {
    async fn orchestrate(&self, master_id: ResourceId) -> Result<()>;
}

/// Generates the AI structure for a single bab. Called serially per chapter
/// during the sync pipeline.
#[async_trait]
pub trait StructureGenerator: Send + Sync {
    async fn generate_structure(&self, bab_id: ResourceId) -> Result<()>;
}
