//! Core domain types and traits for the Perangkat generation platform.
//!
//! This crate contains:
//! - Resource identifiers and common types
//! - Status vocabularies and their transition tables
//! - Master, bab, and generation bookkeeping types
//! - Store traits (implemented against Postgres in `perangkat-db`)
//! - Delegate traits for the downstream generation services

pub mod delegate;
pub mod error;
pub mod id;
pub mod master;
pub mod status;
pub mod store;

pub use error::{Error, Result};
pub use id::ResourceId;
