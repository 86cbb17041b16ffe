//! Catalog source trait definitions.
//!
//! This module defines the [`CatalogSource`] trait that all marketplace
//! providers must implement, and the [`CatalogSourceFactory`] used to
//! build one per `(marketplace, credentials)` pair at sync time.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::errors::MarketplaceError;
use crate::models::{Credentials, ListingsPage};

use super::capabilities::RateLimit;

/// Trait for marketplace catalog access.
///
/// Implement this trait to add support for a new marketplace. The three
/// operations are the full surface the sync engine consumes:
///
/// - `fetch_listings_page` drives the reconciliation snapshot
/// - `fetch_stock` is the authoritative per-item stock read
/// - `write_price` pushes a repricing correction
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Identifier of the marketplace this source talks to, e.g. "shopmart".
    fn marketplace_id(&self) -> &str;

    /// Rate limiting configuration for this marketplace.
    fn rate_limit(&self) -> RateLimit {
        RateLimit::default()
    }

    /// Fetch one page of the current listing snapshot.
    ///
    /// `page_token` is the opaque continuation token from the previous
    /// page, or `None` for the first page. A returned page with
    /// `next_page_token == None` terminates the snapshot.
    async fn fetch_listings_page(
        &self,
        page_token: Option<&str>,
    ) -> Result<ListingsPage, MarketplaceError>;

    /// Read the current authoritative stock quantity for one listing.
    async fn fetch_stock(&self, external_id: &str) -> Result<i32, MarketplaceError>;

    /// Write a new price for one listing.
    async fn write_price(
        &self,
        external_id: &str,
        price: Decimal,
    ) -> Result<(), MarketplaceError>;
}

/// Builds a [`CatalogSource`] for a `(marketplace, credentials)` pair.
///
/// The sync orchestrator holds a factory rather than a source so each
/// run is constructed from the triggering user's credentials.
pub trait CatalogSourceFactory: Send + Sync {
    fn create(
        &self,
        marketplace_id: &str,
        credentials: &Credentials,
    ) -> Result<Arc<dyn CatalogSource>, MarketplaceError>;
}
