//! In-memory listing repository test double.
//!
//! Records every write with its update type so tests can assert the
//! field-ownership partition (which subsystem wrote what), and supports
//! per-operation failure injection.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::errors::{DatabaseError, Result};

use super::listings_model::{
    InventoryUpdate, Listing, NewListing, ReconcilerUpdate, RepriceUpdate, SyncStatus,
};
use super::listings_traits::ListingRepositoryTrait;

/// One recorded repository write.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedWrite {
    Insert { external_id: String },
    Reconciler { listing_id: String },
    Inventory { listing_id: String },
    Reprice { listing_id: String },
    MarkStatus { listing_id: String, status: SyncStatus },
}

/// In-memory [`ListingRepositoryTrait`] implementation.
#[derive(Clone, Default)]
pub struct InMemoryListingRepository {
    listings: Arc<Mutex<HashMap<String, Listing>>>,
    writes: Arc<Mutex<Vec<RecordedWrite>>>,
    fail_reconciler_updates: Arc<Mutex<bool>>,
    fail_inserts: Arc<Mutex<bool>>,
    fail_inventory_updates: Arc<Mutex<bool>>,
}

impl InMemoryListingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a stored listing directly, bypassing write recording.
    pub fn seed(&self, listing: Listing) {
        self.listings
            .lock()
            .unwrap()
            .insert(listing.id.clone(), listing);
    }

    pub fn get(&self, listing_id: &str) -> Option<Listing> {
        self.listings.lock().unwrap().get(listing_id).cloned()
    }

    pub fn by_external_id(&self, external_id: &str) -> Option<Listing> {
        self.listings
            .lock()
            .unwrap()
            .values()
            .find(|l| l.external_id == external_id)
            .cloned()
    }

    pub fn all(&self) -> Vec<Listing> {
        self.listings.lock().unwrap().values().cloned().collect()
    }

    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn set_fail_reconciler_updates(&self, fail: bool) {
        *self.fail_reconciler_updates.lock().unwrap() = fail;
    }

    pub fn set_fail_inserts(&self, fail: bool) {
        *self.fail_inserts.lock().unwrap() = fail;
    }

    pub fn set_fail_inventory_updates(&self, fail: bool) {
        *self.fail_inventory_updates.lock().unwrap() = fail;
    }

    fn record(&self, write: RecordedWrite) {
        self.writes.lock().unwrap().push(write);
    }
}

#[async_trait]
impl ListingRepositoryTrait for InMemoryListingRepository {
    fn list_for(&self, user_id: &str, marketplace_id: &str) -> Result<Vec<Listing>> {
        Ok(self
            .listings
            .lock()
            .unwrap()
            .values()
            .filter(|l| l.user_id == user_id && l.marketplace_id == marketplace_id)
            .cloned()
            .collect())
    }

    fn get_by_id(&self, listing_id: &str) -> Result<Listing> {
        self.get(listing_id)
            .ok_or_else(|| DatabaseError::NotFound(listing_id.to_string()).into())
    }

    async fn insert(&self, new_listing: NewListing) -> Result<Listing> {
        if *self.fail_inserts.lock().unwrap() {
            return Err(DatabaseError::QueryFailed("intentional insert failure".into()).into());
        }
        let now = Utc::now();
        let listing = Listing {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: new_listing.user_id,
            marketplace_id: new_listing.marketplace_id,
            external_id: new_listing.external_id,
            sku: new_listing.sku,
            product_id: new_listing.product_id,
            title: new_listing.title,
            price: new_listing.price,
            status: new_listing.status,
            current_stock_level: new_listing.current_stock_level,
            is_available: new_listing.is_available,
            marketplace_fee_percentage: None,
            minimum_resell_price: None,
            sync_status: SyncStatus::Synced,
            created_at: now,
            updated_at: now,
        };
        self.record(RecordedWrite::Insert {
            external_id: listing.external_id.clone(),
        });
        self.listings
            .lock()
            .unwrap()
            .insert(listing.id.clone(), listing.clone());
        Ok(listing)
    }

    async fn apply_reconciler_update(
        &self,
        listing_id: &str,
        update: ReconcilerUpdate,
    ) -> Result<()> {
        if *self.fail_reconciler_updates.lock().unwrap() {
            return Err(DatabaseError::QueryFailed("intentional update failure".into()).into());
        }
        let mut listings = self.listings.lock().unwrap();
        let listing = listings
            .get_mut(listing_id)
            .ok_or_else(|| DatabaseError::NotFound(listing_id.to_string()))?;
        listing.title = update.title;
        listing.price = update.price;
        listing.status = update.status;
        listing.sync_status = SyncStatus::Synced;
        listing.updated_at = Utc::now();
        drop(listings);
        self.record(RecordedWrite::Reconciler {
            listing_id: listing_id.to_string(),
        });
        Ok(())
    }

    async fn apply_inventory_update(
        &self,
        listing_id: &str,
        update: InventoryUpdate,
    ) -> Result<()> {
        if *self.fail_inventory_updates.lock().unwrap() {
            return Err(DatabaseError::QueryFailed("intentional stock failure".into()).into());
        }
        let mut listings = self.listings.lock().unwrap();
        let listing = listings
            .get_mut(listing_id)
            .ok_or_else(|| DatabaseError::NotFound(listing_id.to_string()))?;
        listing.current_stock_level = update.current_stock_level;
        listing.is_available = update.is_available;
        listing.updated_at = Utc::now();
        drop(listings);
        self.record(RecordedWrite::Inventory {
            listing_id: listing_id.to_string(),
        });
        Ok(())
    }

    async fn apply_reprice_update(&self, listing_id: &str, update: RepriceUpdate) -> Result<()> {
        let mut listings = self.listings.lock().unwrap();
        let listing = listings
            .get_mut(listing_id)
            .ok_or_else(|| DatabaseError::NotFound(listing_id.to_string()))?;
        if let Some(price) = update.price {
            listing.price = price;
        }
        listing.minimum_resell_price = Some(update.minimum_resell_price);
        listing.updated_at = Utc::now();
        drop(listings);
        self.record(RecordedWrite::Reprice {
            listing_id: listing_id.to_string(),
        });
        Ok(())
    }

    async fn mark_sync_status(&self, listing_id: &str, sync_status: SyncStatus) -> Result<()> {
        let mut listings = self.listings.lock().unwrap();
        let listing = listings
            .get_mut(listing_id)
            .ok_or_else(|| DatabaseError::NotFound(listing_id.to_string()))?;
        listing.sync_status = sync_status;
        listing.updated_at = Utc::now();
        drop(listings);
        self.record(RecordedWrite::MarkStatus {
            listing_id: listing_id.to_string(),
            status: sync_status,
        });
        Ok(())
    }
}
