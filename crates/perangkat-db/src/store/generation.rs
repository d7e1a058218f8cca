//! Generation bookkeeping store.
//!
//! The write paths are the stored procedures shipped with our migrations;
//! they keep the row-set arithmetic (expected rows per master, aggregate
//! steps, post-sync master status) next to the data.

use async_trait::async_trait;
use sqlx::PgPool;

use perangkat_core::master::{BabRef, GenerationStatus};
use perangkat_core::status::{DocKind, DocStatus};
use perangkat_core::store::GenerationStore;
use perangkat_core::{ResourceId, Result};

use super::store_err;

#[derive(Debug, Clone, sqlx::FromRow)]
struct GenerationRow {
    id: uuid::Uuid,
    master_id: uuid::Uuid,
    jenis: String,
    bab_id: Option<uuid::Uuid>,
    status: String,
    current_step: Option<i32>,
    total_steps: Option<i32>,
    file_path: Option<String>,
    bab_nomor: Option<i32>,
    bab_judul: Option<String>,
}

impl GenerationRow {
    fn into_domain(self) -> Result<GenerationStatus> {
        let bab = match (self.bab_nomor, self.bab_judul) {
            (Some(nomor), Some(judul)) => Some(BabRef { nomor, judul }),
            _ => None,
        };
        Ok(GenerationStatus {
            id: ResourceId::from_uuid(self.id),
            master_id: ResourceId::from_uuid(self.master_id),
            jenis: DocKind::parse(&self.jenis)?,
            bab_id: self.bab_id.map(ResourceId::from_uuid),
            status: DocStatus::parse(&self.status)?,
            current_step: self.current_step,
            total_steps: self.total_steps,
            file_path: self.file_path,
            bab,
        })
    }
}

/// PostgreSQL implementation of GenerationStore.
pub struct PgGenerationStore {
    pool: PgPool,
}

impl PgGenerationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GenerationStore for PgGenerationStore {
    async fn init_for_master(&self, master_id: ResourceId) -> Result<()> {
        sqlx::query("SELECT init_generation_for_master($1)")
            .bind(master_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn sync_progress(&self, master_id: ResourceId) -> Result<()> {
        sqlx::query("SELECT sync_generation_progress($1)")
            .bind(master_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn finalize_after_sync(&self, master_id: ResourceId) -> Result<()> {
        sqlx::query("SELECT finalize_master_after_sync($1)")
            .bind(master_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(store_err)?;
        Ok(())
    }

    async fn list_for_master(&self, master_id: ResourceId) -> Result<Vec<GenerationStatus>> {
        let rows = sqlx::query_as::<_, GenerationRow>(
            r#"
            SELECT gs.id, gs.master_id, gs.jenis, gs.bab_id, gs.status,
                   gs.current_step, gs.total_steps, gs.file_path,
                   b.nomor AS bab_nomor, b.judul AS bab_judul
            FROM generation_status gs
            LEFT JOIN babs b ON b.id = gs.bab_id
            WHERE gs.master_id = $1
            ORDER BY gs.jenis ASC, b.nomor ASC NULLS FIRST
            "#,
        )
        .bind(master_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;
        rows.into_iter().map(GenerationRow::into_domain).collect()
    }
}
