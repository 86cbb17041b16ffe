//! Crosslist Marketplace Crate
//!
//! Marketplace-agnostic access to external listing catalogs.
//!
//! # Overview
//!
//! Each supported marketplace exposes the same three operations behind
//! the [`CatalogSource`] trait:
//! - paginated listing snapshot fetch
//! - per-item authoritative stock read
//! - per-item price write
//!
//! Transport details (auth, payload shapes, endpoints) live behind the
//! trait; the sync engine in `crosslist-core` never sees them.
//!
//! # Core Types
//!
//! - [`ExternalListing`] - one marketplace record as seen in a snapshot
//! - [`ListingsPage`] - one page of a paginated snapshot
//! - [`Credentials`] - per-user marketplace credentials
//! - [`CatalogSource`] - the provider trait
//! - [`CatalogSourceFactory`] - builds a source from credentials

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketplaceError;
pub use models::{Credentials, ExternalListing, ExternalListingStatus, ListingsPage};
pub use provider::{CatalogSource, CatalogSourceFactory, RateLimit};
pub use provider::gateway::{GatewayCatalogSource, GatewayConfig, GatewayFactory};
