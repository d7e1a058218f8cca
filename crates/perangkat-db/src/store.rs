//! Store trait implementations backed by Postgres.

pub mod generation;
pub mod master;

pub use generation::PgGenerationStore;
pub use master::PgMasterStore;

use perangkat_core::Error;

pub(crate) fn store_err(err: sqlx::Error) -> Error {
    Error::Store(err.to_string())
}
