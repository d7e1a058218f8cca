//! Store traits for masters and generation bookkeeping.
//!
//! The scheduler only sees these seams; the Postgres implementations live in
//! `perangkat-db`, and tests substitute in-memory fakes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::master::{Bab, GenerationStatus, Master};
use crate::status::GenerateStatus;
use crate::{ResourceId, Result};

/// Access to masters and their chapters.
#[async_trait]
pub trait MasterStore: Send + Sync {
    /// Fetch one master by id.
    async fn get(&self, id: ResourceId) -> Result<Master>;

    /// Number of masters currently in the running state (either spelling).
    async fn count_running(&self) -> Result<i64>;

    /// Masters in `belum_siap`, oldest `generate_updated_at` first,
    /// at most `limit` rows.
    async fn list_awaiting_sync(&self, limit: i64) -> Result<Vec<Master>>;

    /// Masters in `belum_mulai` or `menunggu`, oldest first, at most
    /// `limit` rows.
    async fn list_ready_to_orchestrate(&self, limit: i64) -> Result<Vec<Master>>;

    /// Running masters whose last status change is strictly older than
    /// `older_than`, oldest first, at most `limit` rows.
    async fn list_stale_running(
        &self,
        older_than: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Master>>;

    /// Move a master from `from` to `to`, bumping `generate_updated_at`.
    ///
    /// Implementations must reject edges missing from
    /// [`GenerateStatus::can_transition`] with
    /// [`Error::InvalidTransition`](crate::Error::InvalidTransition) before
    /// touching the store.
    async fn transition(
        &self,
        id: ResourceId,
        from: GenerateStatus,
        to: GenerateStatus,
    ) -> Result<()>;

    /// All babs of a master, ordered by `nomor`.
    async fn list_babs(&self, master_id: ResourceId) -> Result<Vec<Bab>>;
}

/// Access to generation bookkeeping rows and their stored procedures.
#[async_trait]
pub trait GenerationStore: Send + Sync {
    /// Idempotently (re)create the expected row set for a master.
    /// Existing rows are refreshed to `pending` at step 0.
    async fn init_for_master(&self, master_id: ResourceId) -> Result<()>;

    /// Reconcile chapter-scoped rows with the current bab set and recompute
    /// aggregate step counts.
    async fn sync_progress(&self, master_id: ResourceId) -> Result<()>;

    /// Derive the master's post-sync status from its rows (`error` if any
    /// row errored, otherwise ready to orchestrate).
    async fn finalize_after_sync(&self, master_id: ResourceId) -> Result<()>;

    /// All generation rows of a master with chapter info joined in,
    /// ordered by document kind.
    async fn list_for_master(&self, master_id: ResourceId) -> Result<Vec<GenerationStatus>>;
}
