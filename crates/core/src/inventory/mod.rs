//! Background inventory verification.
//!
//! Re-checks authoritative stock per listing after a reconciliation
//! pass, throttled and detached from the request that triggered it.

pub mod inventory_worker;

#[cfg(test)]
mod inventory_worker_tests;

pub use inventory_worker::InventorySyncWorker;
