//! Audit event types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What happened, with the payload that makes the entry useful later.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEventKind {
    /// A snapshot item with no local counterpart was created.
    ListingCreated { external_id: String },

    /// An existing listing was refreshed from a snapshot item.
    ListingSynced { external_id: String },

    /// A listing was absent from a snapshot that should have contained
    /// it and was soft-deleted (`sync_status = not_found`).
    ListingMissing { external_id: String },

    /// The inventory worker wrote a fresh authoritative stock level.
    StockUpdated {
        external_id: String,
        old_stock: i32,
        new_stock: i32,
    },

    /// An automated price correction was pushed and persisted.
    RepricingApplied {
        external_id: String,
        old_price: Decimal,
        new_price: Decimal,
        price_difference: Decimal,
        percentage_change: Decimal,
    },

    /// An external price write failed; the stored price was left alone.
    PriceUpdateError {
        external_id: String,
        message: String,
    },

    /// Aggregate outcome of a batch repricing pass.
    BulkRepricing {
        processed: usize,
        updated: usize,
        failed: usize,
    },

    /// Run-level summary of one reconciliation pass.
    SyncCompleted {
        marketplace_id: String,
        added: usize,
        updated: usize,
        not_found: usize,
        errors: usize,
    },
}

/// One audit log entry: the event plus who and what it concerns.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditEvent {
    pub user_id: String,
    pub listing_id: Option<String>,
    pub product_id: Option<String>,
    pub kind: AuditEventKind,
}

impl AuditEvent {
    pub fn new(user_id: &str, kind: AuditEventKind) -> Self {
        Self {
            user_id: user_id.to_string(),
            listing_id: None,
            product_id: None,
            kind,
        }
    }

    /// Attaches the listing (and its optional product link) the event
    /// concerns.
    pub fn for_listing(mut self, listing_id: &str, product_id: Option<&str>) -> Self {
        self.listing_id = Some(listing_id.to_string());
        self.product_id = product_id.map(str::to_string);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn serializes_with_snake_case_tag() {
        let event = AuditEvent::new(
            "u1",
            AuditEventKind::RepricingApplied {
                external_id: "X1".into(),
                old_price: dec!(15.00),
                new_price: dec!(17.25),
                price_difference: dec!(2.25),
                percentage_change: dec!(15.00),
            },
        )
        .for_listing("l-1", None);

        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("repricing_applied"));
        assert!(json.contains("price_difference"));

        let back: AuditEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.listing_id.as_deref(), Some("l-1"));
        match back.kind {
            AuditEventKind::RepricingApplied {
                price_difference, ..
            } => assert_eq!(price_difference, dec!(2.25)),
            _ => panic!("Expected RepricingApplied"),
        }
    }

    #[test]
    fn listing_attachment_is_optional() {
        let event = AuditEvent::new(
            "u1",
            AuditEventKind::BulkRepricing {
                processed: 3,
                updated: 1,
                failed: 0,
            },
        );
        assert!(event.listing_id.is_none());
        assert!(event.product_id.is_none());
    }
}
