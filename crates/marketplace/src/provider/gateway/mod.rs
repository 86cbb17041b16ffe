//! Marketplace integration gateway provider.
//!
//! Talks to the internal integration gateway, which normalizes each
//! marketplace's native API behind one REST surface. Marketplace-native
//! transports (signing, token refresh, payload quirks) terminate at the
//! gateway; this client only carries a bearer token per user.
//!
//! # API Endpoints
//!
//! - Listings page: `GET {base}/v1/{marketplace}/listings?limit={n}&page_token={t}`
//! - Stock read:    `GET {base}/v1/{marketplace}/listings/{id}/stock`
//! - Price write:   `PUT {base}/v1/{marketplace}/listings/{id}/price`

mod models;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use crate::errors::MarketplaceError;
use crate::models::{Credentials, ListingsPage};
use crate::provider::{CatalogSource, CatalogSourceFactory, RateLimit};

use models::{GatewayListingsResponse, GatewayPriceUpdate, GatewayStockResponse};

/// Default HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Snapshot page size requested from the gateway. The gateway caps this
/// at the marketplace's own limit; treat the response as authoritative.
const PAGE_SIZE: u32 = 100;

/// Configuration for the gateway client.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub marketplace_id: String,
    pub credentials: Credentials,
}

/// Catalog source backed by the marketplace integration gateway.
pub struct GatewayCatalogSource {
    client: Client,
    base_url: String,
    marketplace_id: String,
    api_token: String,
}

impl GatewayCatalogSource {
    pub fn new(config: GatewayConfig) -> Result<Self, MarketplaceError> {
        config.credentials.validate()?;

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            marketplace_id: config.marketplace_id,
            api_token: config.credentials.api_token,
        })
    }

    fn map_status(&self, status: StatusCode, external_id: Option<&str>) -> MarketplaceError {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => MarketplaceError::Unauthorized {
                marketplace: self.marketplace_id.clone(),
            },
            StatusCode::NOT_FOUND => MarketplaceError::ListingNotFound {
                external_id: external_id.unwrap_or("?").to_string(),
            },
            StatusCode::TOO_MANY_REQUESTS => MarketplaceError::RateLimited {
                marketplace: self.marketplace_id.clone(),
            },
            other => MarketplaceError::Provider {
                marketplace: self.marketplace_id.clone(),
                message: format!("HTTP error: {}", other),
            },
        }
    }

    fn map_transport(&self, err: reqwest::Error) -> MarketplaceError {
        if err.is_timeout() {
            MarketplaceError::Timeout {
                marketplace: self.marketplace_id.clone(),
            }
        } else {
            MarketplaceError::Provider {
                marketplace: self.marketplace_id.clone(),
                message: err.to_string(),
            }
        }
    }

    async fn parse_json<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T, MarketplaceError> {
        response
            .json::<T>()
            .await
            .map_err(|e| MarketplaceError::InvalidResponse(e.to_string()))
    }

    async fn get(
        &self,
        url: &str,
        external_id: Option<&str>,
    ) -> Result<Response, MarketplaceError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        if !response.status().is_success() {
            return Err(self.map_status(response.status(), external_id));
        }
        Ok(response)
    }
}

#[async_trait]
impl CatalogSource for GatewayCatalogSource {
    fn marketplace_id(&self) -> &str {
        &self.marketplace_id
    }

    fn rate_limit(&self) -> RateLimit {
        RateLimit::default()
    }

    async fn fetch_listings_page(
        &self,
        page_token: Option<&str>,
    ) -> Result<ListingsPage, MarketplaceError> {
        let mut url = format!(
            "{}/v1/{}/listings?limit={}",
            self.base_url, self.marketplace_id, PAGE_SIZE
        );
        if let Some(token) = page_token {
            url.push_str("&page_token=");
            url.push_str(&urlencoding::encode(token));
        }

        debug!("fetching listings page from {}", self.marketplace_id);
        let response = self.get(&url, None).await?;
        let body: GatewayListingsResponse = self.parse_json(response).await?;

        Ok(ListingsPage {
            items: body.items.into_iter().map(Into::into).collect(),
            next_page_token: body.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    async fn fetch_stock(&self, external_id: &str) -> Result<i32, MarketplaceError> {
        let url = format!(
            "{}/v1/{}/listings/{}/stock",
            self.base_url,
            self.marketplace_id,
            urlencoding::encode(external_id)
        );

        let response = self.get(&url, Some(external_id)).await?;
        let body: GatewayStockResponse = self.parse_json(response).await?;
        Ok(body.quantity)
    }

    async fn write_price(
        &self,
        external_id: &str,
        price: Decimal,
    ) -> Result<(), MarketplaceError> {
        let url = format!(
            "{}/v1/{}/listings/{}/price",
            self.base_url,
            self.marketplace_id,
            urlencoding::encode(external_id)
        );

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.api_token)
            .json(&GatewayPriceUpdate { price })
            .send()
            .await
            .map_err(|e| self.map_transport(e))?;

        if !response.status().is_success() {
            return Err(self.map_status(response.status(), Some(external_id)));
        }
        Ok(())
    }
}

/// Factory building gateway-backed sources per `(marketplace, credentials)`.
pub struct GatewayFactory {
    base_url: String,
}

impl GatewayFactory {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl CatalogSourceFactory for GatewayFactory {
    fn create(
        &self,
        marketplace_id: &str,
        credentials: &Credentials,
    ) -> Result<Arc<dyn CatalogSource>, MarketplaceError> {
        if marketplace_id.trim().is_empty() {
            return Err(MarketplaceError::UnknownMarketplace(
                marketplace_id.to_string(),
            ));
        }
        let source = GatewayCatalogSource::new(GatewayConfig {
            base_url: self.base_url.clone(),
            marketplace_id: marketplace_id.to_string(),
            credentials: credentials.clone(),
        })?;
        Ok(Arc::new(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExternalListingStatus;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_source(base_url: &str) -> GatewayCatalogSource {
        GatewayCatalogSource::new(GatewayConfig {
            base_url: base_url.to_string(),
            marketplace_id: "shopmart".to_string(),
            credentials: Credentials::new("test-token", None),
        })
        .unwrap()
    }

    fn listing_json(id: &str, price: &str) -> serde_json::Value {
        json!({
            "id": id,
            "sku": format!("SKU-{id}"),
            "title": format!("Item {id}"),
            "price": price.parse::<f64>().unwrap(),
            "quantity": 3,
            "status": "active"
        })
    }

    #[tokio::test]
    async fn fetches_paginated_snapshot() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/shopmart/listings"))
            .and(query_param("page_token", "p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [listing_json("B1", "5.50")],
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1/shopmart/listings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "items": [listing_json("A1", "12.99")],
                "next_page_token": "p2"
            })))
            .mount(&server)
            .await;

        let source = test_source(&server.uri());

        let first = source.fetch_listings_page(None).await.unwrap();
        assert_eq!(first.items.len(), 1);
        assert_eq!(first.items[0].external_id, "A1");
        assert_eq!(first.items[0].status, ExternalListingStatus::Active);
        assert_eq!(first.next_page_token.as_deref(), Some("p2"));

        let second = source.fetch_listings_page(Some("p2")).await.unwrap();
        assert_eq!(second.items[0].external_id, "B1");
        assert!(second.next_page_token.is_none());
    }

    #[tokio::test]
    async fn maps_rate_limit_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/shopmart/listings"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let source = test_source(&server.uri());
        let err = source.fetch_listings_page(None).await.unwrap_err();
        assert!(matches!(err, MarketplaceError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn maps_unauthorized_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/shopmart/listings/X1/stock"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let source = test_source(&server.uri());
        let err = source.fetch_stock("X1").await.unwrap_err();
        assert!(matches!(err, MarketplaceError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn reads_stock_quantity() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/shopmart/listings/X1/stock"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "quantity": 7 })))
            .mount(&server)
            .await;

        let source = test_source(&server.uri());
        assert_eq!(source.fetch_stock("X1").await.unwrap(), 7);
    }

    #[tokio::test]
    async fn writes_price() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/shopmart/listings/X1/price"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let source = test_source(&server.uri());
        source.write_price("X1", dec!(17.25)).await.unwrap();
    }

    #[tokio::test]
    async fn write_price_surfaces_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/v1/shopmart/listings/GONE/price"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = test_source(&server.uri());
        let err = source.write_price("GONE", dec!(1.00)).await.unwrap_err();
        assert!(matches!(
            err,
            MarketplaceError::ListingNotFound { ref external_id } if external_id == "GONE"
        ));
    }

    #[test]
    fn factory_rejects_blank_marketplace() {
        let factory = GatewayFactory::new("http://gateway.local");
        let err = factory
            .create("", &Credentials::new("tok", None))
            .err()
            .unwrap();
        assert!(matches!(err, MarketplaceError::UnknownMarketplace(_)));
    }

    #[test]
    fn factory_rejects_empty_credentials() {
        let factory = GatewayFactory::new("http://gateway.local");
        let err = factory
            .create("shopmart", &Credentials::new("", None))
            .err()
            .unwrap();
        assert!(matches!(err, MarketplaceError::MissingCredentials(_)));
    }
}
