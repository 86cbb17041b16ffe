//! Error types for marketplace catalog access.

use thiserror::Error;

/// Errors that can occur while talking to an external marketplace.
///
/// The sync engine treats [`MissingCredentials`](Self::MissingCredentials)
/// and [`UnknownMarketplace`](Self::UnknownMarketplace) as fatal
/// preconditions; everything else is recoverable at item granularity.
#[derive(Error, Debug)]
pub enum MarketplaceError {
    /// Credentials are absent or incomplete. Fatal - checked before any
    /// request is made.
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// No provider is registered for the requested marketplace id.
    #[error("Unknown marketplace: {0}")]
    UnknownMarketplace(String),

    /// The marketplace rejected our credentials (HTTP 401/403).
    #[error("Unauthorized: {marketplace}")]
    Unauthorized {
        /// The marketplace that rejected the request
        marketplace: String,
    },

    /// The listing does not exist on the marketplace side (HTTP 404).
    #[error("Listing not found: {external_id}")]
    ListingNotFound {
        /// The external listing identifier
        external_id: String,
    },

    /// The marketplace rate limited the request (HTTP 429).
    #[error("Rate limited: {marketplace}")]
    RateLimited {
        /// The marketplace that rate limited the request
        marketplace: String,
    },

    /// The request timed out.
    #[error("Timeout: {marketplace}")]
    Timeout {
        /// The marketplace that timed out
        marketplace: String,
    },

    /// Any other transport or marketplace-side failure.
    #[error("Marketplace error: {marketplace} - {message}")]
    Provider {
        /// The marketplace that returned the error
        marketplace: String,
        /// The error message from the marketplace
        message: String,
    },

    /// The marketplace returned a payload we could not parse.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl MarketplaceError {
    /// True for errors that must abort a run before any store writes.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            MarketplaceError::MissingCredentials(_) | MarketplaceError::UnknownMarketplace(_)
        )
    }
}
