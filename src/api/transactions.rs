use super::{ApiError, AppState};
use crate::store::transactions::{RECENT_LIMIT, Transaction};
use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use tracing::error;

pub async fn get_transactions(State(state): State<AppState>) -> Json<Vec<Transaction>> {
    Json(state.transactions.recent(RECENT_LIMIT).await)
}

/// Explicit, user-initiated sync. Unlike the opportunistic sync inside the
/// transaction reader, a failure here is reported to the caller.
pub async fn trigger_sync(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    match state.sync.sync().await {
        Ok(()) => Ok(Json(json!({ "status": "success" }))),
        Err(e) => {
            error!(error = %e, "Explicit sync failed");
            Err(ApiError::internal(
                "Failed to sync. Ensure you are logged in.",
            ))
        }
    }
}
