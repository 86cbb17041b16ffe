//! Price floor computation and enforcement.

use std::sync::Arc;

use log::{debug, error, warn};
use rust_decimal::Decimal;

use crosslist_marketplace::CatalogSource;

use crate::constants::{DEFAULT_MARKETPLACE_FEE_RATE, PRICE_DECIMAL_PRECISION};
use crate::errors::Result;
use crate::events::{AuditEvent, AuditEventKind, AuditSink};
use crate::listings::{Listing, ListingRepositoryTrait, RepriceUpdate};

use super::repricing_model::{
    BatchRepriceSummary, PriceUpdateOutcome, ProfitPolicy, RepriceRequest, RepricingSettings,
};

/// Computes the minimum resale price for one cost structure.
///
/// `total = cost + shipping`; the profit policy raises the base; the
/// marketplace fee (default 15%) is applied last; rounded to cents.
pub fn minimum_price(
    source_cost: Decimal,
    shipping_cost: Decimal,
    profit: Option<&ProfitPolicy>,
    fee_rate: Option<Decimal>,
) -> Decimal {
    let total = source_cost + shipping_cost;
    let base = match profit {
        Some(ProfitPolicy::Dollar(value)) => total + *value,
        Some(ProfitPolicy::Percentage(value)) => {
            total * (Decimal::ONE + *value / Decimal::ONE_HUNDRED)
        }
        None => total,
    };
    let fee = fee_rate.unwrap_or(DEFAULT_MARKETPLACE_FEE_RATE);
    (base * (Decimal::ONE + fee)).round_dp(PRICE_DECIMAL_PRECISION)
}

/// Floor-enforcement engine: raises under-priced listings to their
/// computed minimum, never lowers anything.
pub struct RepricingService {
    catalog: Arc<dyn CatalogSource>,
    listings: Arc<dyn ListingRepositoryTrait>,
    audit: Arc<dyn AuditSink>,
}

impl RepricingService {
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

    /// Applies the repricing decision for one listing after a source
    /// cost change.
    ///
    /// Returns `Err` only for store write failures; an external write
    /// failure is captured in the outcome (and audited) so batch
    /// processing can continue.
    pub async fn reprice(
        &self,
        listing: &Listing,
        new_source_cost: Decimal,
        shipping_cost: Decimal,
        settings: &RepricingSettings,
    ) -> Result<PriceUpdateOutcome> {
        let minimum = minimum_price(
            new_source_cost,
            shipping_cost,
            settings.profit.as_ref(),
            listing.marketplace_fee_percentage,
        );

        let mut outcome = PriceUpdateOutcome {
            listing_id: listing.id.clone(),
            external_id: listing.external_id.clone(),
            applied: false,
            old_price: listing.price,
            new_price: None,
            minimum_price: minimum,
            error: None,
        };

        if listing.price >= minimum {
            // Already at or above the floor - this engine never lowers.
            debug!(
                "listing {} at {} is above floor {}",
                listing.external_id, listing.price, minimum
            );
            return Ok(outcome);
        }

        if !settings.automated {
            // Notification-only: record the floor, touch nothing else.
            self.listings
                .apply_reprice_update(
                    &listing.id,
                    RepriceUpdate {
                        price: None,
                        minimum_resell_price: minimum,
                    },
                )
                .await?;
            return Ok(outcome);
        }

        match self.catalog.write_price(&listing.external_id, minimum).await {
            Ok(()) => {
                self.listings
                    .apply_reprice_update(
                        &listing.id,
                        RepriceUpdate {
                            price: Some(minimum),
                            minimum_resell_price: minimum,
                        },
                    )
                    .await?;

                let difference = minimum - listing.price;
                let percentage = if listing.price.is_zero() {
                    Decimal::ZERO
                } else {
                    (difference / listing.price * Decimal::ONE_HUNDRED)
                        .round_dp(PRICE_DECIMAL_PRECISION)
                };
                self.audit.emit(
                    AuditEvent::new(
                        &listing.user_id,
                        AuditEventKind::RepricingApplied {
                            external_id: listing.external_id.clone(),
                            old_price: listing.price,
                            new_price: minimum,
                            price_difference: difference,
                            percentage_change: percentage,
                        },
                    )
                    .for_listing(&listing.id, listing.product_id.as_deref()),
                );

                outcome.applied = true;
                outcome.new_price = Some(minimum);
            }
            Err(e) => {
                // Stored price stays untouched - no partial update.
                warn!(
                    "price push failed for {}: {}",
                    listing.external_id, e
                );
                self.audit.emit(
                    AuditEvent::new(
                        &listing.user_id,
                        AuditEventKind::PriceUpdateError {
                            external_id: listing.external_id.clone(),
                            message: e.to_string(),
                        },
                    )
                    .for_listing(&listing.id, listing.product_id.as_deref()),
                );
                outcome.error = Some(e.to_string());
            }
        }

        Ok(outcome)
    }

    /// Processes each listing independently; one failure never blocks
    /// the rest. The aggregate is logged as a single audit event.
    pub async fn batch_reprice(
        &self,
        user_id: &str,
        requests: Vec<RepriceRequest>,
        settings: &RepricingSettings,
    ) -> BatchRepriceSummary {
        let mut summary = BatchRepriceSummary::default();

        for request in requests {
            summary.processed += 1;

            let listing = match self.listings.get_by_id(&request.listing_id) {
                Ok(listing) => listing,
                Err(e) => {
                    summary.failed += 1;
                    summary
                        .errors
                        .push(format!("{}: {}", request.listing_id, e));
                    continue;
                }
            };

            match self
                .reprice(
                    &listing,
                    request.new_source_cost,
                    request.shipping_cost,
                    settings,
                )
                .await
            {
                Ok(outcome) => {
                    if outcome.applied {
                        summary.updated += 1;
                    }
                    if let Some(err) = outcome.error {
                        summary.failed += 1;
                        summary.errors.push(format!("{}: {}", outcome.external_id, err));
                    }
                }
                Err(e) => {
                    error!("repricing failed for {}: {}", listing.external_id, e);
                    summary.failed += 1;
                    summary
                        .errors
                        .push(format!("{}: {}", listing.external_id, e));
                }
            }
        }

        self.audit.emit(AuditEvent::new(
            user_id,
            AuditEventKind::BulkRepricing {
                processed: summary.processed,
                updated: summary.updated,
                failed: summary.failed,
            },
        ));

        summary
    }
}
