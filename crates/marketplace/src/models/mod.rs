//! Marketplace-agnostic data models.

mod credentials;
mod listing;

pub use credentials::Credentials;
pub use listing::{ExternalListing, ExternalListingStatus, ListingsPage};
