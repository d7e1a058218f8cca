//! Postgres store layer for Perangkat.
//!
//! Implements the store traits from `perangkat-core` and owns the schema
//! migrations, including the generation bookkeeping stored procedures.

pub mod error;
pub mod store;

pub use error::{DbError, DbResult};
pub use store::{PgGenerationStore, PgMasterStore};

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Create a new database connection pool.
pub async fn create_pool(database_url: &str) -> DbResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Run database migrations.
pub async fn run_migrations(pool: &PgPool) -> DbResult<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Check that the database is reachable.
pub async fn health_check(pool: &PgPool) -> DbResult<()> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
