//! Error types for Perangkat.

use thiserror::Error;

use crate::status::GenerateStatus;

#[derive(Debug, Error)]
pub enum Error {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: GenerateStatus,
        to: GenerateStatus,
    },

    #[error("store error: {0}")]
    Store(String),

    #[error("remote call failed: {0}")]
    Remote(String),

    #[error("internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
