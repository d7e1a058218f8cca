//! API server for Perangkat document generation.
//!
//! Exposes the scheduler trigger and the generation observer endpoints.

pub mod error;
pub mod routes;
pub mod state;

pub use state::AppState;
