//! Diesel-backed listing repository.

use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::DieselErrorExt;
use crate::schema::listings;
use crate::schema::listings::dsl::*;

use crosslist_core::errors::{DatabaseError, Result};
use crosslist_core::listings::{
    InventoryUpdate, Listing, ListingRepositoryTrait, NewListing, ReconcilerUpdate,
    RepriceUpdate, SyncStatus,
};

use super::model::{InventoryChangeset, ListingDB, ReconcilerChangeset, RepriceChangeset};

/// Repository for listing records. Reads go through the pool; writes
/// through the single-writer actor.
pub struct ListingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ListingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn expect_one_row(affected: usize, listing_id: &str) -> Result<()> {
        if affected == 0 {
            return Err(DatabaseError::NotFound(listing_id.to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl ListingRepositoryTrait for ListingRepository {
    fn list_for(&self, user: &str, marketplace: &str) -> Result<Vec<Listing>> {
        let mut conn = get_connection(&self.pool)?;

        let rows = listings::table
            .filter(user_id.eq(user))
            .filter(marketplace_id.eq(marketplace))
            .select(ListingDB::as_select())
            .order(external_id.asc())
            .load::<ListingDB>(&mut conn)
            .map_err(|e| e.into_core_error())?;

        Ok(rows.into_iter().map(Listing::from).collect())
    }

    fn get_by_id(&self, listing_id: &str) -> Result<Listing> {
        let mut conn = get_connection(&self.pool)?;

        let row = listings::table
            .select(ListingDB::as_select())
            .find(listing_id)
            .first::<ListingDB>(&mut conn)
            .map_err(|e| e.into_core_error())?;

        Ok(row.into())
    }

    async fn insert(&self, new_listing: NewListing) -> Result<Listing> {
        self.writer
            .exec(move |conn| {
                let listing_db: ListingDB = new_listing.into();

                diesel::insert_into(listings::table)
                    .values(&listing_db)
                    .execute(conn)
                    .map_err(|e| e.into_core_error())?;

                Ok(listing_db.into())
            })
            .await
    }

    async fn apply_reconciler_update(
        &self,
        listing_id: &str,
        update: ReconcilerUpdate,
    ) -> Result<()> {
        let target = listing_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(listings.find(&target))
                    .set(ReconcilerChangeset::from(update))
                    .execute(conn)
                    .map_err(|e| e.into_core_error())?;
                Self::expect_one_row(affected, &target)
            })
            .await
    }

    async fn apply_inventory_update(
        &self,
        listing_id: &str,
        update: InventoryUpdate,
    ) -> Result<()> {
        let target = listing_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(listings.find(&target))
                    .set(InventoryChangeset::from(update))
                    .execute(conn)
                    .map_err(|e| e.into_core_error())?;
                Self::expect_one_row(affected, &target)
            })
            .await
    }

    async fn apply_reprice_update(&self, listing_id: &str, update: RepriceUpdate) -> Result<()> {
        let target = listing_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(listings.find(&target))
                    .set(RepriceChangeset::from(update))
                    .execute(conn)
                    .map_err(|e| e.into_core_error())?;
                Self::expect_one_row(affected, &target)
            })
            .await
    }

    async fn mark_sync_status(&self, listing_id: &str, new_status: SyncStatus) -> Result<()> {
        let target = listing_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected = diesel::update(listings.find(&target))
                    .set((
                        sync_status.eq(new_status.as_str()),
                        updated_at.eq(chrono::Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(|e| e.into_core_error())?;
                Self::expect_one_row(affected, &target)
            })
            .await
    }
}
