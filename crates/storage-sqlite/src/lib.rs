//! SQLite storage implementation for Crosslist.
//!
//! This crate provides all database-related functionality using Diesel
//! ORM with SQLite. It implements the repository traits defined in
//! `crosslist-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for listings and sync state
//! - The SQLite-backed audit sink
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel
//! dependencies exist. All other crates are database-agnostic and work
//! with traits.
//!
//! ```text
//! core (engine)      marketplace (transport)
//!       │
//!       ▼
//! storage-sqlite (this crate)
//!       │
//!       ▼
//!   SQLite DB
//! ```

pub mod audit;
pub mod db;
pub mod errors;
pub mod listings;
pub mod schema;
pub mod sync;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors
pub use errors::StorageError;

// Re-export from crosslist-core for convenience
pub use crosslist_core::errors::{DatabaseError, Error, Result};
