use super::{ApiError, AppState};
use crate::store::holdings::Holding;
use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

pub async fn get_holdings(State(state): State<AppState>) -> Json<Vec<Holding>> {
    Json(state.holdings.load())
}

pub async fn set_holdings(
    State(state): State<AppState>,
    Json(holdings): Json<Vec<Holding>>,
) -> Result<Json<Value>, ApiError> {
    state
        .holdings
        .save(&holdings)
        .map_err(|e| ApiError::internal(e.to_string()))?;
    Ok(Json(json!({ "status": "updated" })))
}
