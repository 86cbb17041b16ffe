use rust_decimal_macros::dec;

use crosslist_marketplace::{ExternalListing, ExternalListingStatus};

use super::listings_model::*;

fn snapshot_item(id: &str, quantity: i32) -> ExternalListing {
    ExternalListing {
        external_id: id.to_string(),
        sku: Some(format!("SKU-{id}")),
        title: format!("Item {id}"),
        price: dec!(12.99),
        quantity,
        status: ExternalListingStatus::Active,
    }
}

#[test]
fn new_listing_from_snapshot_has_no_product_link() {
    let listing = NewListing::from_snapshot("u1", "shopmart", &snapshot_item("X1", 4));

    assert_eq!(listing.external_id, "X1");
    assert_eq!(listing.user_id, "u1");
    assert_eq!(listing.marketplace_id, "shopmart");
    assert!(listing.product_id.is_none());
    assert_eq!(listing.current_stock_level, 4);
    assert!(listing.is_available);
}

#[test]
fn new_listing_with_zero_stock_is_unavailable() {
    let listing = NewListing::from_snapshot("u1", "shopmart", &snapshot_item("X1", 0));
    assert!(!listing.is_available);
}

#[test]
fn inventory_update_derives_availability() {
    assert!(InventoryUpdate::from_stock(1).is_available);
    assert!(InventoryUpdate::from_stock(50).is_available);
    assert!(!InventoryUpdate::from_stock(0).is_available);
    assert!(!InventoryUpdate::from_stock(-3).is_available);
}

#[test]
fn reconciler_update_carries_only_owned_fields() {
    let update = ReconcilerUpdate::from_snapshot(&snapshot_item("X1", 9));
    assert_eq!(update.title, "Item X1");
    assert_eq!(update.price, dec!(12.99));
    assert_eq!(update.status, ListingStatus::Active);
}

#[test]
fn sync_status_round_trips_through_strings() {
    for status in [SyncStatus::Synced, SyncStatus::NotFound] {
        assert_eq!(SyncStatus::parse(status.as_str()), Some(status));
    }
    assert_eq!(SyncStatus::parse("deleted"), None);
}

#[test]
fn listing_status_round_trips_through_strings() {
    for status in [ListingStatus::Active, ListingStatus::Inactive] {
        assert_eq!(ListingStatus::parse(status.as_str()), Some(status));
    }
    assert_eq!(ListingStatus::parse(""), None);
}
