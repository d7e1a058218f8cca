//! Status vocabularies for masters and generation bookkeeping rows.
//!
//! Statuses travel as snake_case strings (the wire values the rest of the
//! platform already speaks) but are closed enums in code, with explicit
//! transition tables. A transition not present in the table is a bug at the
//! call site, not a storable state.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Legacy wire spelling of the running state. Older rows may still carry it;
/// it parses as [`GenerateStatus::SedangJalan`] and is never written back.
pub const LEGACY_RUNNING_STATUS: &str = "sedang_proses";

/// Lifecycle status of a master's document generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerateStatus {
    /// Source material not yet synced; eligible for the sync pipeline.
    BelumSiap,
    /// Synced and ready for the orchestrator to pick up.
    BelumMulai,
    /// Waiting in the orchestrator's queue (e.g. for a retry).
    Menunggu,
    /// A generation run is in flight (or was, if the row went stale).
    #[serde(alias = "sedang_proses")]
    SedangJalan,
    /// All documents generated.
    Selesai,
    /// Generation failed terminally.
    Error,
}

impl GenerateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerateStatus::BelumSiap => "belum_siap",
            GenerateStatus::BelumMulai => "belum_mulai",
            GenerateStatus::Menunggu => "menunggu",
            GenerateStatus::SedangJalan => "sedang_jalan",
            GenerateStatus::Selesai => "selesai",
            GenerateStatus::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "belum_siap" => Ok(GenerateStatus::BelumSiap),
            "belum_mulai" => Ok(GenerateStatus::BelumMulai),
            "menunggu" => Ok(GenerateStatus::Menunggu),
            "sedang_jalan" | LEGACY_RUNNING_STATUS => Ok(GenerateStatus::SedangJalan),
            "selesai" => Ok(GenerateStatus::Selesai),
            "error" => Ok(GenerateStatus::Error),
            other => Err(Error::InvalidInput(format!(
                "unknown generate_status: {other}"
            ))),
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, GenerateStatus::SedangJalan)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, GenerateStatus::Selesai | GenerateStatus::Error)
    }

    /// Whether `self -> to` is an edge of the status machine.
    ///
    /// Claims move a master into `sedang_jalan`; a running master resolves to
    /// ready (`belum_mulai`), re-queued (`menunggu`), terminal, or back to
    /// `belum_siap` when a failed sync rolls it back.
    pub fn can_transition(&self, to: GenerateStatus) -> bool {
        use GenerateStatus::*;
        matches!(
            (self, to),
            (BelumSiap, SedangJalan)
                | (BelumMulai, SedangJalan)
                | (Menunggu, SedangJalan)
                | (SedangJalan, BelumMulai)
                | (SedangJalan, Menunggu)
                | (SedangJalan, Selesai)
                | (SedangJalan, Error)
                | (SedangJalan, BelumSiap)
        )
    }

    /// Error out unless `self -> to` is a legal edge.
    pub fn validate_transition(&self, to: GenerateStatus) -> Result<(), Error> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(Error::InvalidTransition {
                from: *self,
                to,
            })
        }
    }
}

impl std::fmt::Display for GenerateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of document a generation row tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocKind {
    /// Program tahunan: one per master.
    Prota,
    /// Program semester: one per master.
    Prosem,
    /// Rencana pembelajaran: one per bab.
    Rpm,
    /// Lembar kerja peserta didik: one per bab.
    Lkpd,
}

impl DocKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocKind::Prota => "prota",
            DocKind::Prosem => "prosem",
            DocKind::Rpm => "rpm",
            DocKind::Lkpd => "lkpd",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "prota" => Ok(DocKind::Prota),
            "prosem" => Ok(DocKind::Prosem),
            "rpm" => Ok(DocKind::Rpm),
            "lkpd" => Ok(DocKind::Lkpd),
            other => Err(Error::InvalidInput(format!("unknown jenis: {other}"))),
        }
    }

    /// Chapter-scoped kinds carry a `bab_id`; master-scoped kinds do not.
    pub fn is_chapter_scoped(&self) -> bool {
        matches!(self, DocKind::Rpm | DocKind::Lkpd)
    }
}

impl std::fmt::Display for DocKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Progress status of a single generation row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocStatus {
    Pending,
    Generating,
    GeneratingAi,
    Done,
    Error,
}

impl DocStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocStatus::Pending => "pending",
            DocStatus::Generating => "generating",
            DocStatus::GeneratingAi => "generating_ai",
            DocStatus::Done => "done",
            DocStatus::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Result<Self, Error> {
        match s {
            "pending" => Ok(DocStatus::Pending),
            "generating" => Ok(DocStatus::Generating),
            "generating_ai" => Ok(DocStatus::GeneratingAi),
            "done" => Ok(DocStatus::Done),
            "error" => Ok(DocStatus::Error),
            other => Err(Error::InvalidInput(format!("unknown doc status: {other}"))),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DocStatus::Done | DocStatus::Error)
    }

    /// Edges of the per-document machine. Terminal rows only move again when
    /// re-initialization refreshes them to `pending`.
    pub fn can_transition(&self, to: DocStatus) -> bool {
        use DocStatus::*;
        matches!(
            (self, to),
            (Pending, Generating)
                | (Pending, GeneratingAi)
                | (Generating, GeneratingAi)
                | (Generating, Done)
                | (Generating, Error)
                | (GeneratingAi, Generating)
                | (GeneratingAi, Done)
                | (GeneratingAi, Error)
                | (Done, Pending)
                | (Error, Pending)
        )
    }
}

impl std::fmt::Display for DocStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
