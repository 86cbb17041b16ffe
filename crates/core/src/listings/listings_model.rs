//! Listing domain models.
//!
//! Mutable listing fields are partitioned by owner, and the partition is
//! structural: each writing subsystem has its own update type, and the
//! repository trait only accepts those types. The reconciliation path
//! cannot write stock, and the inventory path cannot write price or
//! title, at compile time.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crosslist_marketplace::{ExternalListing, ExternalListingStatus};

/// Outcome of the last reconciliation pass for a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Present in the latest external snapshot.
    Synced,
    /// Absent from a snapshot that should have contained it. A
    /// soft-delete signal; the record itself is never deleted.
    NotFound,
}

impl SyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Synced => "synced",
            SyncStatus::NotFound => "not_found",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "synced" => Some(SyncStatus::Synced),
            "not_found" => Some(SyncStatus::NotFound),
            _ => None,
        }
    }
}

/// Active/inactive state of a listing, as last reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingStatus {
    Active,
    Inactive,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Inactive => "inactive",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(ListingStatus::Active),
            "inactive" => Some(ListingStatus::Inactive),
            _ => None,
        }
    }
}

impl From<ExternalListingStatus> for ListingStatus {
    fn from(status: ExternalListingStatus) -> Self {
        match status {
            ExternalListingStatus::Active => ListingStatus::Active,
            ExternalListingStatus::Inactive => ListingStatus::Inactive,
        }
    }
}

/// The internal record representing one externally-sold item.
///
/// Identity is `(user_id, marketplace_id, external_id)` and is immutable
/// once created. `sku` is a secondary identifier only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub user_id: String,
    pub marketplace_id: String,
    pub external_id: String,
    pub sku: Option<String>,
    /// Weak reference to an internally sourced product. `None` for
    /// marketplace-only listings.
    pub product_id: Option<String>,
    pub title: String,
    pub price: Decimal,
    pub status: ListingStatus,
    pub current_stock_level: i32,
    pub is_available: bool,
    pub marketplace_fee_percentage: Option<Decimal>,
    pub minimum_resell_price: Option<Decimal>,
    pub sync_status: SyncStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a listing discovered in an external snapshot.
///
/// Stock and availability carry the snapshot values here because no
/// authoritative value exists yet; after creation those fields belong to
/// the inventory worker exclusively.
#[derive(Debug, Clone)]
pub struct NewListing {
    pub user_id: String,
    pub marketplace_id: String,
    pub external_id: String,
    pub sku: Option<String>,
    pub product_id: Option<String>,
    pub title: String,
    pub price: Decimal,
    pub status: ListingStatus,
    pub current_stock_level: i32,
    pub is_available: bool,
}

impl NewListing {
    /// Builds the create payload for a snapshot item with no local
    /// counterpart. `product_id` stays `None` until matching links it.
    pub fn from_snapshot(user_id: &str, marketplace_id: &str, item: &ExternalListing) -> Self {
        Self {
            user_id: user_id.to_string(),
            marketplace_id: marketplace_id.to_string(),
            external_id: item.external_id.clone(),
            sku: item.sku.clone(),
            product_id: None,
            title: item.title.clone(),
            price: item.price,
            status: item.status.into(),
            current_stock_level: item.quantity,
            is_available: item.quantity > 0,
        }
    }
}

/// Fields the reconciler owns. Applying one also returns the listing to
/// `sync_status = synced`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcilerUpdate {
    pub title: String,
    pub price: Decimal,
    pub status: ListingStatus,
}

impl ReconcilerUpdate {
    pub fn from_snapshot(item: &ExternalListing) -> Self {
        Self {
            title: item.title.clone(),
            price: item.price,
            status: item.status.into(),
        }
    }
}

/// Fields the inventory worker owns. No other subsystem may write these
/// once a listing exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InventoryUpdate {
    pub current_stock_level: i32,
    pub is_available: bool,
}

impl InventoryUpdate {
    /// Availability is derived, never reported: in stock means stock > 0.
    pub fn from_stock(stock: i32) -> Self {
        Self {
            current_stock_level: stock,
            is_available: stock > 0,
        }
    }
}

/// Fields the repricing engine writes. `price` is `None` for
/// notification-only updates where automation is disabled.
#[derive(Debug, Clone, PartialEq)]
pub struct RepriceUpdate {
    pub price: Option<Decimal>,
    pub minimum_resell_price: Decimal,
}
