//! Crosslist Core - Listing reconciliation and background sync engine.
//!
//! This crate contains the business logic for keeping an internal
//! listing store consistent with external marketplace catalogs. It is
//! database-agnostic and defines repository traits that are implemented
//! by the `storage-sqlite` crate; marketplace transport lives in the
//! `marketplace` crate behind the `CatalogSource` trait.

pub mod constants;
pub mod errors;
pub mod events;
pub mod inventory;
pub mod listings;
pub mod reconcile;
pub mod repricing;
pub mod sync;

// Re-export common types
pub use listings::*;
pub use reconcile::{ReconciliationResult, Reconciler};
pub use sync::{SyncOrchestrator, SyncReport};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
