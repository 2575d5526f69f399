//! HTTP surface of the backend
//!
//! Open by design for a local personal tool: no auth on these endpoints,
//! permissive CORS, optional static frontend at the router fallback.

pub mod auth;
pub mod holdings;
pub mod portfolio;
pub mod transactions;

use crate::core::price::PriceProvider;
use crate::core::sync::SyncRunner;
use crate::providers::fold::FoldClient;
use crate::store::holdings::HoldingsStore;
use crate::store::session::SessionStore;
use crate::store::transactions::TransactionLog;
use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

/// Shared application state. Collaborators sit behind trait objects so
/// tests can substitute fakes for the sync tool and the price feed.
#[derive(Clone)]
pub struct AppState {
    pub holdings: Arc<HoldingsStore>,
    pub session: Arc<SessionStore>,
    pub fold: Arc<FoldClient>,
    pub prices: Arc<dyn PriceProvider>,
    pub transactions: Arc<TransactionLog>,
    pub sync: Arc<dyn SyncRunner>,
}

/// Error reported to the caller from the fail-loud endpoints.
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn bad_request(detail: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "detail": self.detail }))).into_response()
    }
}

pub fn build_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let api_routes = Router::new()
        .route("/fold/login", post(auth::login))
        .route("/fold/verify", post(auth::verify))
        .route("/fold/status", get(auth::status))
        .route(
            "/holdings",
            get(holdings::get_holdings).post(holdings::set_holdings),
        )
        .route("/transactions", get(transactions::get_transactions))
        .route("/sync", post(transactions::trigger_sync))
        .route("/portfolio", get(portfolio::get_portfolio))
        .with_state(state);

    let mut app = Router::new().nest("/api", api_routes);
    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }
    app.layer(CorsLayer::permissive())
}
