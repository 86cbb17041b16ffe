//! Request DTOs. Responses serialize the core types directly.

use serde::Deserialize;

use crosslist_core::repricing::{ProfitPolicy, RepriceRequest, RepricingSettings};
use crosslist_marketplace::Credentials;

/// Body for `POST /api/sync/{marketplace}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncRequest {
    pub api_token: String,
    #[serde(default)]
    pub seller_id: Option<String>,
}

impl SyncRequest {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.api_token.clone(), self.seller_id.clone())
    }
}

/// Query for `GET /api/listings`.
#[derive(Debug, Deserialize)]
pub struct ListingsQuery {
    pub marketplace: String,
}

/// Body for `POST /api/repricing/batch`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRepriceBody {
    pub marketplace: String,
    pub api_token: String,
    #[serde(default)]
    pub seller_id: Option<String>,
    pub automated: bool,
    #[serde(default)]
    pub profit: Option<ProfitPolicy>,
    pub requests: Vec<RepriceRequest>,
}

impl BatchRepriceBody {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.api_token.clone(), self.seller_id.clone())
    }

    pub fn settings(&self) -> RepricingSettings {
        RepricingSettings {
            automated: self.automated,
            profit: self.profit,
        }
    }
}
