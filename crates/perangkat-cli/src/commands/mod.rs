//! CLI command implementations.

pub mod generation;
pub mod schedule;
