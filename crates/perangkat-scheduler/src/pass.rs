//! One scheduler pass.
//!
//! A pass is triggered externally (cron hitting the API, or the CLI) and
//! runs to completion: admission check, pool selection, concurrent dispatch
//! of every selected master, then a summary of what happened. Passes do not
//! overlap state with each other; all coordination lives in the store.

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use tracing::{info, warn};

use perangkat_core::delegate::{GenerationOrchestrator, StructureGenerator};
use perangkat_core::store::{GenerationStore, MasterStore};
use perangkat_core::{ResourceId, Result};

use crate::admission::available_slots;
use crate::config::SchedulerConfig;
use crate::selector::{self, Action, Candidate};
use crate::sync::SyncPipeline;

/// Outcome of one dispatched master, in dispatch order.
#[derive(Debug, Clone, Serialize)]
pub struct TaskReport {
    pub id: ResourceId,
    pub action: Action,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Summary of one pass, shaped for the trigger response.
#[derive(Debug, Clone, Serialize)]
pub struct PassSummary {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skipped: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_slots: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<TaskReport>>,
}

impl PassSummary {
    fn quota_full(running: i64) -> Self {
        PassSummary {
            success: true,
            skipped: Some(true),
            message: Some(format!("Quota full: {running} sedang_jalan")),
            processed: None,
            available_slots: None,
            results: None,
        }
    }

    fn no_candidates() -> Self {
        PassSummary {
            success: true,
            skipped: None,
            message: Some("No eligible masters to process".to_string()),
            processed: Some(0),
            available_slots: None,
            results: None,
        }
    }

    fn completed(slots: i64, results: Vec<TaskReport>) -> Self {
        PassSummary {
            success: true,
            skipped: None,
            message: None,
            processed: Some(results.len()),
            available_slots: Some(slots),
            results: Some(results),
        }
    }
}

/// Drives admission-controlled generation passes.
pub struct Scheduler {
    masters: Arc<dyn MasterStore>,
    orchestrator: Arc<dyn GenerationOrchestrator>,
    sync: SyncPipeline,
    config: SchedulerConfig,
}

impl Scheduler {
    pub fn new(
        masters: Arc<dyn MasterStore>,
        generation: Arc<dyn GenerationStore>,
        orchestrator: Arc<dyn GenerationOrchestrator>,
        structure: Arc<dyn StructureGenerator>,
        config: SchedulerConfig,
    ) -> Self {
        let sync = SyncPipeline::new(masters.clone(), generation, structure);
        Self {
            masters,
            orchestrator,
            sync,
            config,
        }
    }

    /// Run one pass to completion.
    ///
    /// Store failures while counting or selecting abort the whole pass;
    /// failures of individual masters only mark their own report entry.
    pub async fn run_pass(&self) -> Result<PassSummary> {
        let running = self.masters.count_running().await?;
        let slots = available_slots(self.config.max_concurrent, running);
        if slots == 0 {
            info!(running, "Concurrency quota full, skipping pass");
            return Ok(PassSummary::quota_full(running));
        }

        let stale_cutoff = Utc::now() - chrono::Duration::seconds(self.config.stuck_threshold_secs);
        let candidates =
            selector::select_candidates(self.masters.as_ref(), slots, stale_cutoff).await?;
        if candidates.is_empty() {
            info!("No eligible masters to process");
            return Ok(PassSummary::no_candidates());
        }

        info!(
            count = candidates.len(),
            available_slots = slots,
            "Dispatching masters"
        );
        let reports = join_all(candidates.iter().map(|c| self.run_candidate(c))).await;

        Ok(PassSummary::completed(slots, reports))
    }

    async fn run_candidate(&self, candidate: &Candidate) -> TaskReport {
        let outcome = match candidate.action {
            Action::Sync => self.sync.run(candidate.master_id).await,
            Action::Orchestrate => {
                info!(
                    master_id = %candidate.master_id,
                    status = ?candidate.generate_status,
                    percobaan = ?candidate.percobaan,
                    "Delegating to orchestrator"
                );
                self.orchestrator.orchestrate(candidate.master_id).await
            }
        };
        match outcome {
            Ok(()) => TaskReport {
                id: candidate.master_id,
                action: candidate.action,
                success: true,
                error: None,
            },
            Err(err) => {
                warn!(
                    master_id = %candidate.master_id,
                    action = ?candidate.action,
                    error = %err,
                    "Master task failed"
                );
                TaskReport {
                    id: candidate.master_id,
                    action: candidate.action,
                    success: false,
                    error: Some(err.to_string()),
                }
            }
        }
    }
}
