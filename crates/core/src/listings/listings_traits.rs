//! Listing repository trait.

use async_trait::async_trait;

use crate::errors::Result;

use super::listings_model::{
    InventoryUpdate, Listing, NewListing, ReconcilerUpdate, RepriceUpdate, SyncStatus,
};

/// Trait for listing repository operations.
///
/// Writes are partitioned by field owner: each `apply_*` method accepts
/// only the update type of the owning subsystem and must not touch any
/// other column. Reads are synchronous, writes asynchronous, matching
/// the single-writer storage layer.
#[async_trait]
pub trait ListingRepositoryTrait: Send + Sync {
    /// All listings for one `(user, marketplace)` pair.
    fn list_for(&self, user_id: &str, marketplace_id: &str) -> Result<Vec<Listing>>;

    /// Fetch one listing by its local id.
    fn get_by_id(&self, listing_id: &str) -> Result<Listing>;

    /// Insert a newly discovered listing with `sync_status = synced`.
    async fn insert(&self, new_listing: NewListing) -> Result<Listing>;

    /// Overwrite the reconciler-owned fields (title, price, status) and
    /// reset `sync_status` to synced. Never touches stock/availability.
    async fn apply_reconciler_update(
        &self,
        listing_id: &str,
        update: ReconcilerUpdate,
    ) -> Result<()>;

    /// Overwrite the inventory-owned fields (stock, availability).
    /// Never touches title/price/status.
    async fn apply_inventory_update(
        &self,
        listing_id: &str,
        update: InventoryUpdate,
    ) -> Result<()>;

    /// Persist a repricing outcome: the minimum resale price, plus the
    /// pushed price when automation applied one.
    async fn apply_reprice_update(&self, listing_id: &str, update: RepriceUpdate) -> Result<()>;

    /// Flip the reconciliation outcome marker. Used for the soft-delete
    /// (`not_found`) transition; never deletes the record.
    async fn mark_sync_status(&self, listing_id: &str, sync_status: SyncStatus) -> Result<()>;
}
