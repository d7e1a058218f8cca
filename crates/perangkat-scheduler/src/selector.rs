//! Candidate selection.
//!
//! Three status-disjoint pools feed a pass, drained in strict priority
//! order: masters awaiting sync, masters ready for the orchestrator, and
//! running masters whose last transition went stale. Each pool query is
//! capped at the free slot count and ordered oldest transition first; the
//! merged list is truncated to the same count.

use chrono::{DateTime, Utc};
use serde::Serialize;

use perangkat_core::Result;
use perangkat_core::ResourceId;
use perangkat_core::status::GenerateStatus;
use perangkat_core::store::MasterStore;

/// What the pass will do with a selected master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Run the sync pipeline locally.
    Sync,
    /// Hand the master to the downstream orchestrator.
    Orchestrate,
}

/// One master picked up by a pass.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub master_id: ResourceId,
    pub action: Action,
    /// Status at selection time; carried for ready-to-orchestrate masters.
    pub generate_status: Option<GenerateStatus>,
    /// Attempt count at selection time; carried alongside the status.
    pub percobaan: Option<i32>,
}

/// Merge the per-pool candidate lists: earlier pools win outright, order
/// within a pool is preserved, and the union is truncated to `slots`.
pub fn merge_pools(slots: i64, pools: [Vec<Candidate>; 3]) -> Vec<Candidate> {
    let mut merged = Vec::new();
    for pool in pools {
        for candidate in pool {
            if merged.len() as i64 >= slots {
                return merged;
            }
            merged.push(candidate);
        }
    }
    merged
}

/// Query the three pools and merge them. Pools are skipped entirely once
/// the earlier ones have already filled every slot.
pub async fn select_candidates(
    store: &dyn MasterStore,
    slots: i64,
    stale_cutoff: DateTime<Utc>,
) -> Result<Vec<Candidate>> {
    let awaiting_sync: Vec<Candidate> = store
        .list_awaiting_sync(slots)
        .await?
        .into_iter()
        .map(|m| Candidate {
            master_id: m.id,
            action: Action::Sync,
            generate_status: None,
            percobaan: None,
        })
        .collect();

    let ready: Vec<Candidate> = if (awaiting_sync.len() as i64) < slots {
        store
            .list_ready_to_orchestrate(slots)
            .await?
            .into_iter()
            .map(|m| Candidate {
                master_id: m.id,
                action: Action::Orchestrate,
                generate_status: Some(m.generate_status),
                percobaan: Some(m.percobaan),
            })
            .collect()
    } else {
        Vec::new()
    };

    let stale: Vec<Candidate> = if ((awaiting_sync.len() + ready.len()) as i64) < slots {
        store
            .list_stale_running(stale_cutoff, slots)
            .await?
            .into_iter()
            .map(|m| Candidate {
                master_id: m.id,
                action: Action::Orchestrate,
                generate_status: None,
                percobaan: None,
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(merge_pools(slots, [awaiting_sync, ready, stale]))
}
