//! HTTP route handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::error;

use crosslist_core::errors::{DatabaseError, Error};
use crosslist_core::repricing::RepricingService;
use crosslist_core::sync::{SyncReport, SyncStatusRecord};
use crosslist_core::Listing;

use crate::models::{BatchRepriceBody, ListingsQuery, SyncRequest};
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/sync/{marketplace}", post(run_sync))
        .route("/api/sync/{marketplace}/status", get(sync_status))
        .route("/api/listings", get(list_listings))
        .route("/api/repricing/batch", post(batch_reprice))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Error mapping ───────────────────────────────────────────

struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = if err.is_precondition() {
            StatusCode::BAD_REQUEST
        } else {
            match &err {
                Error::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
                Error::Marketplace(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            }
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("request failed: {}", err);
        }
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// The authenticated user id. Authentication itself terminates at the
/// edge proxy; only the forwarded header reaches this service.
fn user_id(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::bad_request("missing x-user-id header"))
}

// ── Handlers ────────────────────────────────────────────────

async fn run_sync(
    State(state): State<Arc<AppState>>,
    Path(marketplace): Path<String>,
    headers: HeaderMap,
    Json(body): Json<SyncRequest>,
) -> Result<Json<SyncReport>, ApiError> {
    let user = user_id(&headers)?;
    let report = state
        .orchestrator
        .run_sync(&user, &marketplace, &body.credentials())
        .await?;
    Ok(Json(report))
}

async fn sync_status(
    State(state): State<Arc<AppState>>,
    Path(marketplace): Path<String>,
    headers: HeaderMap,
) -> Result<Json<SyncStatusRecord>, ApiError> {
    let user = user_id(&headers)?;
    state
        .sync_state
        .get(&user, &marketplace)?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("no sync has run for this marketplace"))
}

async fn list_listings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListingsQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<Listing>>, ApiError> {
    let user = user_id(&headers)?;
    let listings = state.listings.list_for(&user, &query.marketplace)?;
    Ok(Json(listings))
}

async fn batch_reprice(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<BatchRepriceBody>,
) -> Result<Response, ApiError> {
    let user = user_id(&headers)?;
    let catalog = state
        .catalog_factory
        .create(&body.marketplace, &body.credentials())
        .map_err(Error::from)?;

    let service = RepricingService::new(catalog, state.listings.clone(), state.audit.clone());
    let summary = service
        .batch_reprice(&user, body.requests.clone(), &body.settings())
        .await;

    Ok(Json(summary).into_response())
}
