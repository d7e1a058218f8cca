//! Master store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use perangkat_core::master::{Bab, Master};
use perangkat_core::status::{GenerateStatus, LEGACY_RUNNING_STATUS};
use perangkat_core::store::MasterStore;
use perangkat_core::{Error, ResourceId, Result};

use super::store_err;

/// A master row as stored. Statuses stay strings here and are parsed into
/// the closed enum at the boundary, so legacy spellings surface exactly once.
#[derive(Debug, Clone, sqlx::FromRow)]
struct MasterRow {
    id: uuid::Uuid,
    generate_status: String,
    generate_updated_at: DateTime<Utc>,
    percobaan: i32,
}

impl MasterRow {
    fn into_domain(self) -> Result<Master> {
        Ok(Master {
            id: ResourceId::from_uuid(self.id),
            generate_status: GenerateStatus::parse(&self.generate_status)?,
            generate_updated_at: self.generate_updated_at,
            percobaan: self.percobaan,
        })
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
struct BabRow {
    id: uuid::Uuid,
    master_id: uuid::Uuid,
    nomor: i32,
    judul: String,
}

impl From<BabRow> for Bab {
    fn from(row: BabRow) -> Self {
        Bab {
            id: ResourceId::from_uuid(row.id),
            master_id: ResourceId::from_uuid(row.master_id),
            nomor: row.nomor,
            judul: row.judul,
        }
    }
}

/// PostgreSQL implementation of MasterStore.
pub struct PgMasterStore {
    pool: PgPool,
}

impl PgMasterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MasterStore for PgMasterStore {
    async fn get(&self, id: ResourceId) -> Result<Master> {
        let row = sqlx::query_as::<_, MasterRow>(
            r#"
            SELECT id, generate_status, generate_updated_at, percobaan
            FROM masters
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(store_err)?;
        match row {
            Some(row) => row.into_domain(),
            None => Err(Error::NotFound(format!("master {id}"))),
        }
    }

    async fn count_running(&self) -> Result<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM masters WHERE generate_status IN ($1, $2)")
                .bind(GenerateStatus::SedangJalan.as_str())
                .bind(LEGACY_RUNNING_STATUS)
                .fetch_one(&self.pool)
                .await
                .map_err(store_err)?;
        Ok(count)
    }

    async fn list_awaiting_sync(&self, limit: i64) -> Result<Vec<Master>> {
        let rows = sqlx::query_as::<_, MasterRow>(
            r#"
            SELECT id, generate_status, generate_updated_at, percobaan
            FROM masters
            WHERE generate_status = $1
            ORDER BY generate_updated_at ASC
            LIMIT $2
            "#,
        )
        .bind(GenerateStatus::BelumSiap.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;
        rows.into_iter().map(MasterRow::into_domain).collect()
    }

    async fn list_ready_to_orchestrate(&self, limit: i64) -> Result<Vec<Master>> {
        let rows = sqlx::query_as::<_, MasterRow>(
            r#"
            SELECT id, generate_status, generate_updated_at, percobaan
            FROM masters
            WHERE generate_status IN ($1, $2)
            ORDER BY generate_updated_at ASC
            LIMIT $3
            "#,
        )
        .bind(GenerateStatus::BelumMulai.as_str())
        .bind(GenerateStatus::Menunggu.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;
        rows.into_iter().map(MasterRow::into_domain).collect()
    }

    async fn list_stale_running(
        &self,
        older_than: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Master>> {
        let rows = sqlx::query_as::<_, MasterRow>(
            r#"
            SELECT id, generate_status, generate_updated_at, percobaan
            FROM masters
            WHERE generate_status IN ($1, $2)
              AND generate_updated_at < $3
            ORDER BY generate_updated_at ASC
            LIMIT $4
            "#,
        )
        .bind(GenerateStatus::SedangJalan.as_str())
        .bind(LEGACY_RUNNING_STATUS)
        .bind(older_than)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;
        rows.into_iter().map(MasterRow::into_domain).collect()
    }

    async fn transition(
        &self,
        id: ResourceId,
        from: GenerateStatus,
        to: GenerateStatus,
    ) -> Result<()> {
        from.validate_transition(to)?;
        let result = sqlx::query(
            r#"
            UPDATE masters
            SET generate_status = $2, generate_updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(to.as_str())
        .execute(&self.pool)
        .await
        .map_err(store_err)?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound(format!("master {id}")));
        }
        Ok(())
    }

    async fn list_babs(&self, master_id: ResourceId) -> Result<Vec<Bab>> {
        let rows = sqlx::query_as::<_, BabRow>(
            r#"
            SELECT id, master_id, nomor, judul
            FROM babs
            WHERE master_id = $1
            ORDER BY nomor ASC
            "#,
        )
        .bind(master_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(store_err)?;
        Ok(rows.into_iter().map(Bab::from).collect())
    }
}
