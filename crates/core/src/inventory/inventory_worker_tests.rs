use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crosslist_marketplace::{CatalogSource, ListingsPage, MarketplaceError};

use crate::events::{AuditEventKind, MockAuditSink};
use crate::listings::testing::{InMemoryListingRepository, RecordedWrite};
use crate::listings::{Listing, ListingStatus, SyncStatus};

use super::inventory_worker::InventorySyncWorker;

// ── Mock CatalogSource with per-item stock ──────────────────

struct StockCatalog {
    stock: HashMap<String, i32>,
    fail_ids: HashSet<String>,
}

impl StockCatalog {
    fn new(stock: &[(&str, i32)]) -> Self {
        Self {
            stock: stock
                .iter()
                .map(|(id, qty)| (id.to_string(), *qty))
                .collect(),
            fail_ids: HashSet::new(),
        }
    }

    fn failing_for(mut self, external_id: &str) -> Self {
        self.fail_ids.insert(external_id.to_string());
        self
    }
}

#[async_trait]
impl CatalogSource for StockCatalog {
    fn marketplace_id(&self) -> &str {
        "shopmart"
    }

    async fn fetch_listings_page(
        &self,
        _page_token: Option<&str>,
    ) -> Result<ListingsPage, MarketplaceError> {
        Ok(ListingsPage::empty())
    }

    async fn fetch_stock(&self, external_id: &str) -> Result<i32, MarketplaceError> {
        if self.fail_ids.contains(external_id) {
            return Err(MarketplaceError::Timeout {
                marketplace: "shopmart".into(),
            });
        }
        self.stock
            .get(external_id)
            .copied()
            .ok_or_else(|| MarketplaceError::ListingNotFound {
                external_id: external_id.to_string(),
            })
    }

    async fn write_price(
        &self,
        _external_id: &str,
        _price: Decimal,
    ) -> Result<(), MarketplaceError> {
        Ok(())
    }
}

// ── Helpers ─────────────────────────────────────────────────

fn stored(id: &str, external_id: &str, stock: i32) -> Listing {
    let now = Utc::now();
    Listing {
        id: id.to_string(),
        user_id: "u1".to_string(),
        marketplace_id: "shopmart".to_string(),
        external_id: external_id.to_string(),
        sku: None,
        product_id: None,
        title: format!("Item {external_id}"),
        price: dec!(10.00),
        status: ListingStatus::Active,
        current_stock_level: stock,
        is_available: stock > 0,
        marketplace_fee_percentage: None,
        minimum_resell_price: None,
        sync_status: SyncStatus::Synced,
        created_at: now,
        updated_at: now,
    }
}

fn worker(
    catalog: StockCatalog,
    repo: &InMemoryListingRepository,
    audit: &MockAuditSink,
) -> InventorySyncWorker {
    InventorySyncWorker::new(
        Arc::new(catalog),
        Arc::new(repo.clone()),
        Arc::new(audit.clone()),
    )
    .with_delay(Duration::ZERO)
}

fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

// ── Tests ───────────────────────────────────────────────────

#[tokio::test]
async fn writes_stock_and_derived_availability() {
    let repo = InMemoryListingRepository::new();
    let audit = MockAuditSink::new();
    repo.seed(stored("l-1", "X1", 5));
    repo.seed(stored("l-2", "X2", 5));

    let worker = worker(StockCatalog::new(&[("X1", 0), ("X2", 9)]), &repo, &audit);
    let updated = worker
        .sync_inventory("u1", "shopmart", &ids(&["X1", "X2"]))
        .await
        .unwrap();

    assert_eq!(updated, 2);
    let x1 = repo.get("l-1").unwrap();
    assert_eq!(x1.current_stock_level, 0);
    assert!(!x1.is_available);
    let x2 = repo.get("l-2").unwrap();
    assert_eq!(x2.current_stock_level, 9);
    assert!(x2.is_available);
}

#[tokio::test]
async fn never_touches_reconciler_owned_fields() {
    let repo = InMemoryListingRepository::new();
    let audit = MockAuditSink::new();
    repo.seed(stored("l-1", "X1", 5));

    let worker = worker(StockCatalog::new(&[("X1", 2)]), &repo, &audit);
    worker
        .sync_inventory("u1", "shopmart", &ids(&["X1"]))
        .await
        .unwrap();

    let listing = repo.get("l-1").unwrap();
    assert_eq!(listing.title, "Item X1");
    assert_eq!(listing.price, dec!(10.00));
    assert_eq!(listing.status, ListingStatus::Active);

    // Every write the worker performed went through the inventory path.
    assert!(repo
        .writes()
        .iter()
        .all(|w| matches!(w, RecordedWrite::Inventory { .. })));
}

#[tokio::test]
async fn audits_only_successful_writes() {
    let repo = InMemoryListingRepository::new();
    let audit = MockAuditSink::new();
    repo.seed(stored("l-1", "X1", 5));
    repo.set_fail_inventory_updates(true);

    let worker = worker(StockCatalog::new(&[("X1", 2)]), &repo, &audit);
    let updated = worker
        .sync_inventory("u1", "shopmart", &ids(&["X1"]))
        .await
        .unwrap();

    assert_eq!(updated, 0);
    assert!(audit.is_empty(), "a failed write must not be logged as a stock change");
}

#[tokio::test]
async fn stock_updated_event_carries_old_and_new() {
    let repo = InMemoryListingRepository::new();
    let audit = MockAuditSink::new();
    repo.seed(stored("l-1", "X1", 5));

    let worker = worker(StockCatalog::new(&[("X1", 2)]), &repo, &audit);
    worker
        .sync_inventory("u1", "shopmart", &ids(&["X1"]))
        .await
        .unwrap();

    let events = audit.events();
    assert_eq!(events.len(), 1);
    match &events[0].kind {
        AuditEventKind::StockUpdated {
            external_id,
            old_stock,
            new_stock,
        } => {
            assert_eq!(external_id, "X1");
            assert_eq!(*old_stock, 5);
            assert_eq!(*new_stock, 2);
        }
        other => panic!("Expected StockUpdated, got {:?}", other),
    }
}

#[tokio::test]
async fn per_item_fetch_failure_skips_and_continues() {
    let repo = InMemoryListingRepository::new();
    let audit = MockAuditSink::new();
    repo.seed(stored("l-1", "X1", 5));
    repo.seed(stored("l-2", "X2", 5));

    let catalog = StockCatalog::new(&[("X1", 1), ("X2", 7)]).failing_for("X1");
    let worker = worker(catalog, &repo, &audit);
    let updated = worker
        .sync_inventory("u1", "shopmart", &ids(&["X1", "X2"]))
        .await
        .unwrap();

    assert_eq!(updated, 1);
    assert_eq!(repo.get("l-1").unwrap().current_stock_level, 5);
    assert_eq!(repo.get("l-2").unwrap().current_stock_level, 7);
}

#[tokio::test]
async fn unknown_external_ids_are_skipped() {
    let repo = InMemoryListingRepository::new();
    let audit = MockAuditSink::new();
    repo.seed(stored("l-1", "X1", 5));

    let worker = worker(StockCatalog::new(&[("X1", 3), ("GHOST", 1)]), &repo, &audit);
    let updated = worker
        .sync_inventory("u1", "shopmart", &ids(&["GHOST", "X1"]))
        .await
        .unwrap();

    assert_eq!(updated, 1);
}

#[tokio::test]
async fn spawned_worker_completes_detached() {
    let repo = InMemoryListingRepository::new();
    let audit = MockAuditSink::new();
    repo.seed(stored("l-1", "X1", 5));

    let worker = worker(StockCatalog::new(&[("X1", 8)]), &repo, &audit);
    let handle = worker.spawn(
        "u1".to_string(),
        "shopmart".to_string(),
        ids(&["X1"]),
    );

    handle.await.unwrap();
    assert_eq!(repo.get("l-1").unwrap().current_stock_level, 8);
}
