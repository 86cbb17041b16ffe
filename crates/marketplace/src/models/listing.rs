//! External listing snapshot models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Listing state as reported by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExternalListingStatus {
    Active,
    Inactive,
}

impl ExternalListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExternalListingStatus::Active => "active",
            ExternalListingStatus::Inactive => "inactive",
        }
    }

    /// Maps a marketplace status string. Anything not recognized as an
    /// active-like state is treated as inactive.
    pub fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "active" | "live" | "published" => ExternalListingStatus::Active,
            _ => ExternalListingStatus::Inactive,
        }
    }
}

/// One external record from a snapshot fetch cycle.
///
/// Ephemeral - exists only to drive the reconciliation diff, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalListing {
    /// Marketplace-assigned identifier, unique within one marketplace.
    pub external_id: String,
    /// Seller SKU. Secondary identifier, not unique across marketplaces.
    pub sku: Option<String>,
    pub title: String,
    pub price: Decimal,
    pub quantity: i32,
    pub status: ExternalListingStatus,
}

/// One page of a paginated snapshot.
#[derive(Debug, Clone)]
pub struct ListingsPage {
    pub items: Vec<ExternalListing>,
    /// Opaque continuation token. `None` means the snapshot is complete.
    pub next_page_token: Option<String>,
}

impl ListingsPage {
    /// A terminal empty page.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            next_page_token: None,
        }
    }
}
