//! Throttled per-item inventory verification.
//!
//! The worker is the only writer of `current_stock_level` and
//! `is_available`. It runs strictly after a reconciliation pass, walks
//! the just-reconciled external ids sequentially (a deliberate
//! single-lane design - the pacing is the rate limit), and tolerates
//! every per-item failure. Observability is solely through the audit
//! sink and subsequent store reads; nothing awaits it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, error, warn};
use tokio::task::JoinHandle;

use crosslist_marketplace::CatalogSource;

use crate::constants::INVENTORY_REQUEST_DELAY;
use crate::errors::Result;
use crate::events::{AuditEvent, AuditEventKind, AuditSink};
use crate::listings::{InventoryUpdate, ListingRepositoryTrait};

pub struct InventorySyncWorker {
    catalog: Arc<dyn CatalogSource>,
    listings: Arc<dyn ListingRepositoryTrait>,
    audit: Arc<dyn AuditSink>,
    delay: Duration,
}

impl InventorySyncWorker {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        listings: Arc<dyn ListingRepositoryTrait>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            catalog,
            listings,
            audit,
            delay: INVENTORY_REQUEST_DELAY,
        }
    }

    /// Overrides the fixed inter-request delay. Tests pass zero.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Runs the verification loop on a detached task.
    ///
    /// The caller receives no synchronous acknowledgment and must not
    /// await the returned handle on any request path; it exists so the
    /// runtime (and tests) can observe task completion.
    pub fn spawn(
        self,
        user_id: String,
        marketplace_id: String,
        external_ids: Vec<String>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            match self
                .sync_inventory(&user_id, &marketplace_id, &external_ids)
                .await
            {
                Ok(updated) => debug!(
                    "inventory pass for {} finished: {}/{} updated",
                    marketplace_id,
                    updated,
                    external_ids.len()
                ),
                Err(e) => error!("inventory pass for {} could not start: {}", marketplace_id, e),
            }
        })
    }

    /// Verifies stock for each external id sequentially.
    ///
    /// Fails only if the initial store load fails; per-item fetch or
    /// write failures are logged and skipped. Returns the number of
    /// listings whose stock was written.
    pub async fn sync_inventory(
        &self,
        user_id: &str,
        marketplace_id: &str,
        external_ids: &[String],
    ) -> Result<usize> {
        let by_external_id: HashMap<String, _> = self
            .listings
            .list_for(user_id, marketplace_id)?
            .into_iter()
            .map(|l| (l.external_id.clone(), l))
            .collect();

        let mut updated = 0;
        for (i, external_id) in external_ids.iter().enumerate() {
            if i > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let Some(listing) = by_external_id.get(external_id) else {
                debug!("skipping {}: no stored listing", external_id);
                continue;
            };

            let stock = match self.catalog.fetch_stock(external_id).await {
                Ok(stock) => stock,
                Err(e) => {
                    warn!("stock read failed for {}: {}", external_id, e);
                    continue;
                }
            };

            let update = InventoryUpdate::from_stock(stock);
            match self
                .listings
                .apply_inventory_update(&listing.id, update)
                .await
            {
                Ok(()) => {
                    updated += 1;
                    // Only a successful store write is logged as a stock
                    // change.
                    self.audit.emit(
                        AuditEvent::new(
                            user_id,
                            AuditEventKind::StockUpdated {
                                external_id: external_id.clone(),
                                old_stock: listing.current_stock_level,
                                new_stock: stock,
                            },
                        )
                        .for_listing(&listing.id, listing.product_id.as_deref()),
                    );
                }
                Err(e) => {
                    warn!("stock write failed for {}: {}", external_id, e);
                }
            }
        }

        Ok(updated)
    }
}
