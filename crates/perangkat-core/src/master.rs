//! Masters, babs, and generation bookkeeping rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ResourceId;
use crate::status::{DocKind, DocStatus, GenerateStatus};

/// A master: a teacher/subject/class combination whose document set (prota,
/// prosem, and per-bab rpm/lkpd) is generated as a unit.
///
/// Only the scheduling-relevant fields appear here; descriptive fields live
/// with the surfaces that render them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Master {
    pub id: ResourceId,
    /// Generation lifecycle status.
    pub generate_status: GenerateStatus,
    /// When the status last changed. Staleness detection keys off this.
    pub generate_updated_at: DateTime<Utc>,
    /// How many orchestration attempts this master has consumed.
    pub percobaan: i32,
}

/// One chapter of a master's curriculum, in teaching order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bab {
    pub id: ResourceId,
    pub master_id: ResourceId,
    /// Position within the curriculum, starting at 1.
    pub nomor: i32,
    pub judul: String,
}

/// Chapter summary carried on generation rows for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BabRef {
    pub nomor: i32,
    pub judul: String,
}

/// Bookkeeping row for one document of one master.
///
/// The expected set per master is: one row each for `prota` and `prosem`
/// (no bab), plus one `rpm` and one `lkpd` row per bab. The set is keyed on
/// `(master_id, jenis, bab_id)` and re-initialization is idempotent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationStatus {
    pub id: ResourceId,
    pub master_id: ResourceId,
    pub jenis: DocKind,
    /// Present iff `jenis` is chapter-scoped.
    pub bab_id: Option<ResourceId>,
    pub status: DocStatus,
    pub current_step: Option<i32>,
    pub total_steps: Option<i32>,
    /// Where the finished document landed, once `status` is `done`.
    pub file_path: Option<String>,
    /// Joined chapter info for chapter-scoped rows.
    pub bab: Option<BabRef>,
}
