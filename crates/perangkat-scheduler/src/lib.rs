//! Admission-controlled generation scheduling for Perangkat.
//!
//! One pass per trigger: count running masters against the concurrency
//! cap, fill the free slots from three priority pools (masters awaiting
//! sync, masters ready to orchestrate, stale running masters), dispatch
//! the whole batch concurrently, and report per-master outcomes.

pub mod admission;
pub mod clients;
pub mod config;
pub mod pass;
pub mod selector;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

pub use clients::{HttpOrchestrator, HttpStructureGenerator};
pub use config::SchedulerConfig;
pub use pass::{PassSummary, Scheduler, TaskReport};
pub use selector::{Action, Candidate};
pub use sync::SyncPipeline;
