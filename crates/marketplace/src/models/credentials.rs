//! Per-user marketplace credentials.

use serde::{Deserialize, Serialize};

use crate::errors::MarketplaceError;

/// Credentials for one user's marketplace account.
///
/// Token minting/refresh is handled upstream; by the time a sync run
/// starts this holds a ready-to-use API token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Bearer token for the marketplace API.
    pub api_token: String,
    /// Seller account identifier, where the marketplace requires one.
    pub seller_id: Option<String>,
}

impl Credentials {
    pub fn new(api_token: impl Into<String>, seller_id: Option<String>) -> Self {
        Self {
            api_token: api_token.into(),
            seller_id,
        }
    }

    /// Validates that the credentials are usable for API calls.
    pub fn validate(&self) -> Result<(), MarketplaceError> {
        if self.api_token.trim().is_empty() {
            return Err(MarketplaceError::MissingCredentials(
                "api_token is empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_token_is_rejected() {
        let creds = Credentials::new("  ", None);
        assert!(matches!(
            creds.validate(),
            Err(MarketplaceError::MissingCredentials(_))
        ));
    }

    #[test]
    fn present_token_passes() {
        let creds = Credentials::new("tok-123", Some("seller-9".into()));
        assert!(creds.validate().is_ok());
    }
}
