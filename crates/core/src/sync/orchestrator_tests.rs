use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crosslist_marketplace::{
    CatalogSource, CatalogSourceFactory, Credentials, ExternalListing, ExternalListingStatus,
    ListingsPage, MarketplaceError,
};

use crate::errors::Result;
use crate::events::{AuditEventKind, MockAuditSink};
use crate::listings::testing::InMemoryListingRepository;

use super::orchestrator::SyncOrchestrator;
use super::sync_state_model::{SyncRunStatus, SyncStatusRecord};
use super::sync_state_traits::SyncStateRepositoryTrait;

// ── Mock catalog + factory ──────────────────────────────────

struct ScriptedCatalog {
    items: Vec<ExternalListing>,
    stock: i32,
    fail_fetch: bool,
}

#[async_trait]
impl CatalogSource for ScriptedCatalog {
    fn marketplace_id(&self) -> &str {
        "shopmart"
    }

    async fn fetch_listings_page(
        &self,
        _page_token: Option<&str>,
    ) -> std::result::Result<ListingsPage, MarketplaceError> {
        if self.fail_fetch {
            return Err(MarketplaceError::Provider {
                marketplace: "shopmart".into(),
                message: "snapshot unavailable".into(),
            });
        }
        Ok(ListingsPage {
            items: self.items.clone(),
            next_page_token: None,
        })
    }

    async fn fetch_stock(
        &self,
        _external_id: &str,
    ) -> std::result::Result<i32, MarketplaceError> {
        Ok(self.stock)
    }

    async fn write_price(
        &self,
        _external_id: &str,
        _price: Decimal,
    ) -> std::result::Result<(), MarketplaceError> {
        Ok(())
    }
}

struct ScriptedFactory {
    catalog: Arc<dyn CatalogSource>,
}

impl ScriptedFactory {
    fn new(catalog: ScriptedCatalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}

impl CatalogSourceFactory for ScriptedFactory {
    fn create(
        &self,
        _marketplace_id: &str,
        credentials: &Credentials,
    ) -> std::result::Result<Arc<dyn CatalogSource>, MarketplaceError> {
        credentials.validate()?;
        Ok(self.catalog.clone())
    }
}

// ── Mock sync state repository ──────────────────────────────

#[derive(Clone, Default)]
struct InMemorySyncState {
    records: Arc<Mutex<HashMap<(String, String), SyncStatusRecord>>>,
    transitions: Arc<Mutex<Vec<SyncRunStatus>>>,
}

impl InMemorySyncState {
    fn new() -> Self {
        Self::default()
    }

    fn transitions(&self) -> Vec<SyncRunStatus> {
        self.transitions.lock().unwrap().clone()
    }

    fn record(&self, user_id: &str, marketplace_id: &str) -> Option<SyncStatusRecord> {
        self.records
            .lock()
            .unwrap()
            .get(&(user_id.to_string(), marketplace_id.to_string()))
            .cloned()
    }

    fn update<F>(&self, user_id: &str, marketplace_id: &str, status: SyncRunStatus, f: F)
    where
        F: FnOnce(&mut SyncStatusRecord),
    {
        let key = (user_id.to_string(), marketplace_id.to_string());
        let mut records = self.records.lock().unwrap();
        let record = records
            .entry(key)
            .or_insert_with(|| SyncStatusRecord::new(user_id, marketplace_id));
        record.status = status;
        record.updated_at = Utc::now();
        f(record);
        self.transitions.lock().unwrap().push(status);
    }
}

#[async_trait]
impl SyncStateRepositoryTrait for InMemorySyncState {
    fn get(&self, user_id: &str, marketplace_id: &str) -> Result<Option<SyncStatusRecord>> {
        Ok(self.record(user_id, marketplace_id))
    }

    async fn mark_syncing(
        &self,
        user_id: &str,
        marketplace_id: &str,
    ) -> Result<SyncStatusRecord> {
        self.update(user_id, marketplace_id, SyncRunStatus::Syncing, |r| {
            r.error_message = None;
        });
        Ok(self.record(user_id, marketplace_id).unwrap())
    }

    async fn mark_completed(
        &self,
        user_id: &str,
        marketplace_id: &str,
        total_listings: i64,
    ) -> Result<()> {
        self.update(user_id, marketplace_id, SyncRunStatus::Completed, |r| {
            r.total_listings = total_listings;
            r.last_full_sync = Some(Utc::now());
        });
        Ok(())
    }

    async fn mark_error(
        &self,
        user_id: &str,
        marketplace_id: &str,
        message: &str,
    ) -> Result<()> {
        self.update(user_id, marketplace_id, SyncRunStatus::Error, |r| {
            r.error_message = Some(message.to_string());
        });
        Ok(())
    }
}

// ── Helpers ─────────────────────────────────────────────────

fn item(id: &str) -> ExternalListing {
    ExternalListing {
        external_id: id.to_string(),
        sku: None,
        title: format!("Item {id}"),
        price: dec!(9.99),
        quantity: 1,
        status: ExternalListingStatus::Active,
    }
}

fn orchestrator(
    catalog: ScriptedCatalog,
) -> (
    SyncOrchestrator,
    InMemoryListingRepository,
    InMemorySyncState,
    MockAuditSink,
) {
    let repo = InMemoryListingRepository::new();
    let state = InMemorySyncState::new();
    let audit = MockAuditSink::new();
    let orchestrator = SyncOrchestrator::new(
        Arc::new(ScriptedFactory::new(catalog)),
        Arc::new(repo.clone()),
        Arc::new(state.clone()),
        Arc::new(audit.clone()),
    )
    .with_inventory_delay(Duration::ZERO);
    (orchestrator, repo, state, audit)
}

fn credentials() -> Credentials {
    Credentials::new("tok-1", None)
}

async fn wait_for<F: Fn() -> bool>(condition: F) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached within timeout");
}

// ── Tests ───────────────────────────────────────────────────

#[tokio::test]
async fn successful_run_walks_the_status_machine() {
    let catalog = ScriptedCatalog {
        items: vec![item("X1"), item("X2")],
        stock: 4,
        fail_fetch: false,
    };
    let (orchestrator, _repo, state, audit) = orchestrator(catalog);

    let report = orchestrator
        .run_sync("u1", "shopmart", &credentials())
        .await
        .unwrap();

    assert!(report.success);
    assert_eq!(report.added, 2);
    assert_eq!(report.total_synced, 2);

    assert_eq!(
        state.transitions(),
        vec![SyncRunStatus::Syncing, SyncRunStatus::Completed]
    );
    let record = state.record("u1", "shopmart").unwrap();
    assert_eq!(record.total_listings, 2);
    assert!(record.last_full_sync.is_some());
    assert!(record.error_message.is_none());

    assert!(audit
        .events()
        .iter()
        .any(|e| matches!(e.kind, AuditEventKind::SyncCompleted { added: 2, .. })));
}

#[tokio::test]
async fn detached_inventory_worker_runs_after_success() {
    let catalog = ScriptedCatalog {
        items: vec![item("X1")],
        stock: 7,
        fail_fetch: false,
    };
    let (orchestrator, repo, _state, _audit) = orchestrator(catalog);

    orchestrator
        .run_sync("u1", "shopmart", &credentials())
        .await
        .unwrap();

    // The report returned before inventory verification; observe the
    // detached worker's effect through the store.
    wait_for(|| {
        repo.by_external_id("X1")
            .map(|l| l.current_stock_level == 7)
            .unwrap_or(false)
    })
    .await;
}

#[tokio::test]
async fn fetch_failure_marks_error_state() {
    let catalog = ScriptedCatalog {
        items: vec![],
        stock: 0,
        fail_fetch: true,
    };
    let (orchestrator, _repo, state, _audit) = orchestrator(catalog);

    let err = orchestrator
        .run_sync("u1", "shopmart", &credentials())
        .await
        .unwrap_err();
    assert!(matches!(err, crate::Error::Marketplace(_)));

    assert_eq!(
        state.transitions(),
        vec![SyncRunStatus::Syncing, SyncRunStatus::Error]
    );
    let record = state.record("u1", "shopmart").unwrap();
    assert!(record
        .error_message
        .as_deref()
        .unwrap()
        .contains("snapshot unavailable"));
}

#[tokio::test]
async fn missing_credentials_abort_before_any_state_write() {
    let catalog = ScriptedCatalog {
        items: vec![item("X1")],
        stock: 0,
        fail_fetch: false,
    };
    let (orchestrator, repo, state, audit) = orchestrator(catalog);

    let err = orchestrator
        .run_sync("u1", "shopmart", &Credentials::new("", None))
        .await
        .unwrap_err();
    assert!(err.is_precondition());

    assert!(state.transitions().is_empty());
    assert!(state.record("u1", "shopmart").is_none());
    assert!(repo.writes().is_empty());
    assert!(audit.is_empty());
}

#[tokio::test]
async fn rerun_resets_error_message() {
    let failing = ScriptedCatalog {
        items: vec![],
        stock: 0,
        fail_fetch: true,
    };
    let (orchestrator, _repo, state, _audit) = orchestrator(failing);
    orchestrator
        .run_sync("u1", "shopmart", &credentials())
        .await
        .unwrap_err();

    let healthy = ScriptedCatalog {
        items: vec![item("X1")],
        stock: 1,
        fail_fetch: false,
    };
    let retry = SyncOrchestrator::new(
        Arc::new(ScriptedFactory::new(healthy)),
        Arc::new(InMemoryListingRepository::new()),
        Arc::new(state.clone()),
        Arc::new(MockAuditSink::new()),
    )
    .with_inventory_delay(Duration::ZERO);

    retry
        .run_sync("u1", "shopmart", &credentials())
        .await
        .unwrap();

    let record = state.record("u1", "shopmart").unwrap();
    assert_eq!(record.status, SyncRunStatus::Completed);
    assert!(record.error_message.is_none());
}
