//! End-to-end sync runs.

use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use serde::Serialize;

use crosslist_marketplace::{CatalogSourceFactory, Credentials};

use crate::constants::INVENTORY_REQUEST_DELAY;
use crate::errors::Result;
use crate::events::{AuditEvent, AuditEventKind, AuditSink};
use crate::inventory::InventorySyncWorker;
use crate::listings::ListingRepositoryTrait;
use crate::reconcile::{ReconciliationResult, Reconciler};

use super::sync_state_traits::SyncStateRepositoryTrait;

/// What the caller of `run_sync` gets back.
///
/// Partial failure is visible (`results.errors`) but does not clear
/// `success`; only a fetch-phase or precondition failure does, and those
/// surface as `Err` instead.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub success: bool,
    #[serde(skip)]
    pub results: ReconciliationResult,
    pub added: usize,
    pub updated: usize,
    pub not_found: usize,
    pub errors: usize,
    pub total_synced: usize,
}

impl SyncReport {
    fn from_results(results: ReconciliationResult) -> Self {
        Self {
            success: true,
            added: results.added,
            updated: results.updated,
            not_found: results.not_found,
            errors: results.errors,
            total_synced: results.total_synced(),
            results,
        }
    }
}

/// Coordinates one reconciliation run: status transitions, the
/// reconciler pass, and the detached inventory worker.
pub struct SyncOrchestrator {
    catalog_factory: Arc<dyn CatalogSourceFactory>,
    listings: Arc<dyn ListingRepositoryTrait>,
    sync_state: Arc<dyn SyncStateRepositoryTrait>,
    audit: Arc<dyn AuditSink>,
    inventory_delay: Duration,
}

impl SyncOrchestrator {
    pub fn new(
        catalog_factory: Arc<dyn CatalogSourceFactory>,
        listings: Arc<dyn ListingRepositoryTrait>,
        sync_state: Arc<dyn SyncStateRepositoryTrait>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            catalog_factory,
            listings,
            sync_state,
            audit,
            inventory_delay: INVENTORY_REQUEST_DELAY,
        }
    }

    /// Overrides the inventory worker pacing. Tests pass zero.
    pub fn with_inventory_delay(mut self, delay: Duration) -> Self {
        self.inventory_delay = delay;
        self
    }

    /// Runs one sync for `(user, marketplace)`.
    ///
    /// Re-entrancy is the caller's concern: a second invocation while
    /// the pair is already `syncing` starts a duplicate run. The
    /// `syncing` status is set first so callers that want to gate can
    /// observe it.
    pub async fn run_sync(
        &self,
        user_id: &str,
        marketplace_id: &str,
        credentials: &Credentials,
    ) -> Result<SyncReport> {
        // Preconditions resolve before any state is written.
        credentials.validate()?;
        let catalog = self.catalog_factory.create(marketplace_id, credentials)?;

        self.sync_state.mark_syncing(user_id, marketplace_id).await?;
        info!("sync started for {} / {}", user_id, marketplace_id);

        let reconciler = Reconciler::new(
            catalog.clone(),
            self.listings.clone(),
            self.audit.clone(),
        );

        let results = match reconciler.reconcile(user_id, marketplace_id).await {
            Ok(results) => results,
            Err(e) => {
                if let Err(mark_err) = self
                    .sync_state
                    .mark_error(user_id, marketplace_id, &e.to_string())
                    .await
                {
                    warn!("failed to record sync error state: {}", mark_err);
                }
                return Err(e);
            }
        };

        if let Err(e) = self
            .sync_state
            .mark_completed(user_id, marketplace_id, results.total_synced() as i64)
            .await
        {
            // The run itself succeeded; a stale status row is not worth
            // failing it over.
            warn!("failed to record sync completion: {}", e);
        }

        self.audit.emit(AuditEvent::new(
            user_id,
            AuditEventKind::SyncCompleted {
                marketplace_id: marketplace_id.to_string(),
                added: results.added,
                updated: results.updated,
                not_found: results.not_found,
                errors: results.errors,
            },
        ));

        // Inventory verification runs detached; the report does not wait
        // for it.
        let worker = InventorySyncWorker::new(
            catalog,
            self.listings.clone(),
            self.audit.clone(),
        )
        .with_delay(self.inventory_delay);
        worker.spawn(
            user_id.to_string(),
            marketplace_id.to_string(),
            results.synced_external_ids.clone(),
        );

        info!(
            "sync finished for {} / {}: added={} updated={} not_found={} errors={}",
            user_id,
            marketplace_id,
            results.added,
            results.updated,
            results.not_found,
            results.errors
        );
        Ok(SyncReport::from_results(results))
    }
}
