//! The sync pipeline.
//!
//! Prepares one master synchronously: claim it, (re)initialize the
//! generation bookkeeping, generate every chapter's structure in teaching
//! order, then reconcile progress and derive the post-sync status. The
//! whole pipeline is all-or-nothing; any failure after the claim rolls the
//! master back to `belum_siap` so a later pass retries from scratch.

use std::sync::Arc;

use tracing::{error, info};

use perangkat_core::delegate::StructureGenerator;
use perangkat_core::status::GenerateStatus;
use perangkat_core::store::{GenerationStore, MasterStore};
use perangkat_core::{ResourceId, Result};

pub struct SyncPipeline {
    masters: Arc<dyn MasterStore>,
    generation: Arc<dyn GenerationStore>,
    structure: Arc<dyn StructureGenerator>,
}

impl SyncPipeline {
    pub fn new(
        masters: Arc<dyn MasterStore>,
        generation: Arc<dyn GenerationStore>,
        structure: Arc<dyn StructureGenerator>,
    ) -> Self {
        Self {
            masters,
            generation,
            structure,
        }
    }

    /// Claim the master and run the pipeline steps.
    ///
    /// On a step failure the claim is undone (back to `belum_siap`) and the
    /// step's error is returned; a failed rollback write is logged but does
    /// not replace that error.
    pub async fn run(&self, master_id: ResourceId) -> Result<()> {
        self.masters
            .transition(
                master_id,
                GenerateStatus::BelumSiap,
                GenerateStatus::SedangJalan,
            )
            .await?;

        if let Err(err) = self.run_steps(master_id).await {
            error!(master_id = %master_id, error = %err, "Sync failed, rolling back");
            if let Err(rollback_err) = self
                .masters
                .transition(
                    master_id,
                    GenerateStatus::SedangJalan,
                    GenerateStatus::BelumSiap,
                )
                .await
            {
                error!(master_id = %master_id, error = %rollback_err, "Rollback failed");
            }
            return Err(err);
        }
        Ok(())
    }

    async fn run_steps(&self, master_id: ResourceId) -> Result<()> {
        self.generation.init_for_master(master_id).await?;

        // A master without babs still syncs; there is just nothing to
        // generate chapter-wise.
        let babs = self.masters.list_babs(master_id).await?;
        info!(master_id = %master_id, babs = babs.len(), "Generating chapter structures");
        for bab in &babs {
            self.structure.generate_structure(bab.id).await?;
        }

        self.generation.sync_progress(master_id).await?;
        self.generation.finalize_after_sync(master_id).await?;
        Ok(())
    }
}
