//! Core error types for the Crosslist engine.
//!
//! This module defines database-agnostic error types. Storage-specific
//! errors (from Diesel, SQLite, etc.) are converted to these types by
//! the storage layer; marketplace transport errors arrive as
//! `MarketplaceError` and are wrapped at the boundary.

use thiserror::Error;

use crosslist_marketplace::MarketplaceError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the sync engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Marketplace operation failed: {0}")]
    Marketplace(#[from] MarketplaceError),

    #[error("Listing operation failed: {0}")]
    Listing(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Database-agnostic error type for storage operations.
///
/// This enum uses `String` for all error details, allowing the storage
/// layer to convert storage-specific errors (Diesel, SQLite, etc.) into
/// this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint was violated (e.g., duplicate key).
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// A database transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Database migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),
}

/// Validation errors for engine inputs.
///
/// Validation failures are fatal to the enclosing run and abort before
/// any store writes.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// True when this error must abort a run before any writes happen
    /// (bad credentials, malformed identifiers).
    pub fn is_precondition(&self) -> bool {
        match self {
            Error::Validation(_) => true,
            Error::Marketplace(e) => e.is_precondition(),
            _ => false,
        }
    }
}
