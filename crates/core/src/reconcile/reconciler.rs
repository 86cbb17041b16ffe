//! Snapshot-to-store reconciliation.
//!
//! One pass walks the paginated external snapshot in order, classifying
//! each record against the stored set:
//!
//! - present locally: Update (reconciler-owned fields only)
//! - unknown: Create (`product_id = None`, `sync_status = synced`)
//! - left over locally after the snapshot is exhausted: MarkMissing
//!
//! Per-item failures are counted and skipped; only the fetch phase (or a
//! failed initial store load) fails the run as a whole.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, warn};

use crosslist_marketplace::{CatalogSource, ExternalListing};

use crate::events::{AuditEvent, AuditEventKind, AuditSink};
use crate::listings::{
    Listing, ListingRepositoryTrait, NewListing, ReconcilerUpdate, SyncStatus,
};

use super::snapshot::SnapshotPages;
use crate::errors::Result;

/// Per-run counts plus the set of external ids confirmed present. The
/// id list feeds the inventory worker; its order is unspecified.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationResult {
    pub added: usize,
    pub updated: usize,
    pub not_found: usize,
    pub errors: usize,
    pub synced_external_ids: Vec<String>,
}

impl ReconciliationResult {
    /// Listings confirmed present in this run.
    pub fn total_synced(&self) -> usize {
        self.synced_external_ids.len()
    }
}

/// Diffs one marketplace snapshot against the listing store.
pub struct Reconciler {
    catalog: Arc<dyn CatalogSource>,
    listings: Arc<dyn ListingRepositoryTrait>,
    audit: Arc<dyn AuditSink>,
}

impl Reconciler {
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        listings: Arc<dyn ListingRepositoryTrait>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        Self {
            catalog,
            listings,
            audit,
        }
    }

    /// Runs one full reconciliation pass for `(user, marketplace)`.
    ///
    /// Fails only on unrecoverable conditions: the initial store load or
    /// a snapshot page fetch. Per-item write failures increment
    /// `errors` and leave the item's prior local state untouched.
    pub async fn reconcile(
        &self,
        user_id: &str,
        marketplace_id: &str,
    ) -> Result<ReconciliationResult> {
        let existing = self.listings.list_for(user_id, marketplace_id)?;
        debug!(
            "reconciling {} against {} stored listings for user {}",
            marketplace_id,
            existing.len(),
            user_id
        );

        let mut unseen: HashMap<String, Listing> = existing
            .into_iter()
            .map(|l| (l.external_id.clone(), l))
            .collect();
        // external_id -> (listing_id, product_id) for everything handled
        // this run; routes duplicate snapshot occurrences to Update.
        let mut seen: HashMap<String, (String, Option<String>)> = HashMap::new();

        let mut result = ReconciliationResult::default();
        let mut pages = SnapshotPages::new(self.catalog.as_ref());

        while let Some(page) = pages.next_page().await? {
            for item in page.items {
                self.apply_item(user_id, marketplace_id, item, &mut unseen, &mut seen, &mut result)
                    .await;
            }
        }

        // Everything not seen in this pass disappeared externally.
        for (external_id, listing) in unseen {
            match self
                .listings
                .mark_sync_status(&listing.id, SyncStatus::NotFound)
                .await
            {
                Ok(()) => {
                    result.not_found += 1;
                    self.audit.emit(
                        AuditEvent::new(
                            user_id,
                            AuditEventKind::ListingMissing {
                                external_id: external_id.clone(),
                            },
                        )
                        .for_listing(&listing.id, listing.product_id.as_deref()),
                    );
                }
                Err(e) => {
                    warn!("failed to mark {} not_found: {}", external_id, e);
                    result.errors += 1;
                }
            }
        }

        result.synced_external_ids = seen.into_keys().collect();
        debug!(
            "reconciled {}: added={} updated={} not_found={} errors={}",
            marketplace_id, result.added, result.updated, result.not_found, result.errors
        );
        Ok(result)
    }

    async fn apply_item(
        &self,
        user_id: &str,
        marketplace_id: &str,
        item: ExternalListing,
        unseen: &mut HashMap<String, Listing>,
        seen: &mut HashMap<String, (String, Option<String>)>,
        result: &mut ReconciliationResult,
    ) {
        let external_id = item.external_id.clone();

        if let Some(current) = unseen.remove(&external_id) {
            // Known listing: refresh reconciler-owned fields. The id is
            // dropped from `unseen` even if the write fails - it was in
            // the snapshot, so flipping it to not_found would be wrong.
            match self
                .listings
                .apply_reconciler_update(&current.id, ReconcilerUpdate::from_snapshot(&item))
                .await
            {
                Ok(()) => {
                    result.updated += 1;
                    seen.insert(
                        external_id.clone(),
                        (current.id.clone(), current.product_id.clone()),
                    );
                    self.audit.emit(
                        AuditEvent::new(user_id, AuditEventKind::ListingSynced { external_id })
                            .for_listing(&current.id, current.product_id.as_deref()),
                    );
                }
                Err(e) => {
                    warn!("failed to update listing {}: {}", external_id, e);
                    result.errors += 1;
                }
            }
        } else if let Some((listing_id, product_id)) = seen.get(&external_id).cloned() {
            // Duplicate within one snapshot (marketplace returned a page
            // twice): last write wins against the just-handled record.
            match self
                .listings
                .apply_reconciler_update(&listing_id, ReconcilerUpdate::from_snapshot(&item))
                .await
            {
                Ok(()) => {
                    result.updated += 1;
                    self.audit.emit(
                        AuditEvent::new(user_id, AuditEventKind::ListingSynced { external_id })
                            .for_listing(&listing_id, product_id.as_deref()),
                    );
                }
                Err(e) => {
                    warn!("failed duplicate update for {}: {}", external_id, e);
                    result.errors += 1;
                }
            }
        } else {
            let new_listing = NewListing::from_snapshot(user_id, marketplace_id, &item);
            match self.listings.insert(new_listing).await {
                Ok(created) => {
                    result.added += 1;
                    seen.insert(
                        external_id.clone(),
                        (created.id.clone(), created.product_id.clone()),
                    );
                    self.audit.emit(
                        AuditEvent::new(user_id, AuditEventKind::ListingCreated { external_id })
                            .for_listing(&created.id, None),
                    );
                }
                Err(e) => {
                    warn!("failed to create listing {}: {}", external_id, e);
                    result.errors += 1;
                }
            }
        }
    }
}
