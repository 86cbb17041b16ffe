//! Database models for listings.
//!
//! Field ownership is enforced a second time here: each writing
//! subsystem has its own `AsChangeset` struct scoped to exactly the
//! columns it owns, so a partitioned update can never spill into
//! another owner's columns.

use std::str::FromStr;

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crosslist_core::listings::{
    InventoryUpdate, Listing, ListingStatus, NewListing, ReconcilerUpdate, RepriceUpdate,
    SyncStatus,
};

/// Parses a stored decimal column, falling back to zero on corruption
/// rather than poisoning whole result sets.
fn parse_decimal_column(value: &str, column: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_else(|e| {
        log::error!("corrupt decimal in column {}: '{}' ({})", column, value, e);
        Decimal::ZERO
    })
}

/// Database model for listings.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::listings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ListingDB {
    pub id: String,
    pub user_id: String,
    pub marketplace_id: String,
    pub external_id: String,
    pub sku: Option<String>,
    pub product_id: Option<String>,
    pub title: String,
    pub price: String,
    pub status: String,
    pub current_stock_level: i32,
    pub is_available: bool,
    pub marketplace_fee_percentage: Option<String>,
    pub minimum_resell_price: Option<String>,
    pub sync_status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<ListingDB> for Listing {
    fn from(db: ListingDB) -> Self {
        Self {
            price: parse_decimal_column(&db.price, "price"),
            marketplace_fee_percentage: db
                .marketplace_fee_percentage
                .as_deref()
                .map(|v| parse_decimal_column(v, "marketplace_fee_percentage")),
            minimum_resell_price: db
                .minimum_resell_price
                .as_deref()
                .map(|v| parse_decimal_column(v, "minimum_resell_price")),
            status: ListingStatus::parse(&db.status).unwrap_or(ListingStatus::Inactive),
            sync_status: SyncStatus::parse(&db.sync_status).unwrap_or(SyncStatus::Synced),
            id: db.id,
            user_id: db.user_id,
            marketplace_id: db.marketplace_id,
            external_id: db.external_id,
            sku: db.sku,
            product_id: db.product_id,
            title: db.title,
            current_stock_level: db.current_stock_level,
            is_available: db.is_available,
            created_at: Utc.from_utc_datetime(&db.created_at),
            updated_at: Utc.from_utc_datetime(&db.updated_at),
        }
    }
}

impl From<NewListing> for ListingDB {
    fn from(domain: NewListing) -> Self {
        let now = Utc::now().naive_utc();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: domain.user_id,
            marketplace_id: domain.marketplace_id,
            external_id: domain.external_id,
            sku: domain.sku,
            product_id: domain.product_id,
            title: domain.title,
            price: domain.price.to_string(),
            status: domain.status.as_str().to_string(),
            current_stock_level: domain.current_stock_level,
            is_available: domain.is_available,
            marketplace_fee_percentage: None,
            minimum_resell_price: None,
            sync_status: SyncStatus::Synced.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Changeset for reconciler-owned columns only.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::listings)]
pub struct ReconcilerChangeset {
    pub title: String,
    pub price: String,
    pub status: String,
    pub sync_status: String,
    pub updated_at: NaiveDateTime,
}

impl From<ReconcilerUpdate> for ReconcilerChangeset {
    fn from(update: ReconcilerUpdate) -> Self {
        Self {
            title: update.title,
            price: update.price.to_string(),
            status: update.status.as_str().to_string(),
            sync_status: SyncStatus::Synced.as_str().to_string(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

/// Changeset for inventory-owned columns only.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::listings)]
pub struct InventoryChangeset {
    pub current_stock_level: i32,
    pub is_available: bool,
    pub updated_at: NaiveDateTime,
}

impl From<InventoryUpdate> for InventoryChangeset {
    fn from(update: InventoryUpdate) -> Self {
        Self {
            current_stock_level: update.current_stock_level,
            is_available: update.is_available,
            updated_at: Utc::now().naive_utc(),
        }
    }
}

/// Changeset for repricing writes. `price` is `None` for
/// notification-only updates, which Diesel skips entirely.
#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::listings)]
pub struct RepriceChangeset {
    pub price: Option<String>,
    pub minimum_resell_price: String,
    pub updated_at: NaiveDateTime,
}

impl From<RepriceUpdate> for RepriceChangeset {
    fn from(update: RepriceUpdate) -> Self {
        Self {
            price: update.price.map(|p| p.to_string()),
            minimum_resell_price: update.minimum_resell_price.to_string(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}
