//! Wire models for the marketplace integration gateway.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{ExternalListing, ExternalListingStatus};

/// Response from the listings endpoint.
#[derive(Debug, Deserialize)]
pub struct GatewayListingsResponse {
    pub items: Vec<GatewayListing>,
    /// Opaque continuation token; absent on the last page.
    #[serde(default)]
    pub next_page_token: Option<String>,
}

/// One listing as returned by the gateway.
#[derive(Debug, Deserialize)]
pub struct GatewayListing {
    pub id: String,
    #[serde(default)]
    pub sku: Option<String>,
    pub title: String,
    pub price: Decimal,
    pub quantity: i32,
    pub status: String,
}

impl From<GatewayListing> for ExternalListing {
    fn from(wire: GatewayListing) -> Self {
        let status = ExternalListingStatus::parse(&wire.status);
        ExternalListing {
            external_id: wire.id,
            sku: wire.sku,
            title: wire.title,
            price: wire.price,
            quantity: wire.quantity,
            status,
        }
    }
}

/// Response from the per-item stock endpoint.
#[derive(Debug, Deserialize)]
pub struct GatewayStockResponse {
    pub quantity: i32,
}

/// Body for the per-item price write.
#[derive(Debug, Serialize)]
pub struct GatewayPriceUpdate {
    pub price: Decimal,
}
