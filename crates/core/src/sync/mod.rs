//! Sync orchestration.
//!
//! Ties one reconciliation run together: status transitions, the
//! reconciler pass, the detached inventory worker, and the result
//! summary returned to the caller.

pub mod orchestrator;
pub mod sync_state_model;
pub mod sync_state_traits;

#[cfg(test)]
mod orchestrator_tests;

pub use orchestrator::{SyncOrchestrator, SyncReport};
pub use sync_state_model::{SyncRunStatus, SyncStatusRecord};
pub use sync_state_traits::SyncStateRepositoryTrait;
