//! Repricing domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Profit margin policy applied on top of total cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ProfitPolicy {
    /// Fixed amount added to total cost.
    Dollar(Decimal),
    /// Percentage markup on total cost.
    Percentage(Decimal),
}

/// Per-user repricing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepricingSettings {
    /// When false, the engine only records the computed floor; no
    /// external write happens.
    pub automated: bool,
    pub profit: Option<ProfitPolicy>,
}

impl RepricingSettings {
    pub fn notification_only(profit: Option<ProfitPolicy>) -> Self {
        Self {
            automated: false,
            profit,
        }
    }

    pub fn automated(profit: Option<ProfitPolicy>) -> Self {
        Self {
            automated: true,
            profit,
        }
    }
}

/// Per-listing result of a repricing decision.
///
/// Consumed by the audit sink and batch summaries; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceUpdateOutcome {
    pub listing_id: String,
    pub external_id: String,
    /// True when a new price was pushed externally and persisted.
    pub applied: bool,
    pub old_price: Decimal,
    pub new_price: Option<Decimal>,
    pub minimum_price: Decimal,
    pub error: Option<String>,
}

/// One listing's input to a batch repricing pass.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepriceRequest {
    pub listing_id: String,
    pub new_source_cost: Decimal,
    pub shipping_cost: Decimal,
}

/// Aggregate outcome of a batch repricing pass.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRepriceSummary {
    pub processed: usize,
    pub updated: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}
