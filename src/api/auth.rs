use super::{ApiError, AppState};
use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub phone: String,
    pub otp: String,
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    state
        .fold
        .request_otp(&req.phone)
        .await
        .map_err(|e| ApiError::bad_request(e.to_string()))?;
    Ok(Json(json!({ "status": "otp_sent" })))
}

pub async fn verify(
    State(state): State<AppState>,
    Json(req): Json<VerifyRequest>,
) -> Result<Json<Value>, ApiError> {
    let verified = state
        .fold
        .verify_otp(&req.phone, &req.otp)
        .await
        .map_err(|e| ApiError::bad_request(format!("Verification failed: {e}")))?;

    state
        .session
        .save(
            &verified.access_token,
            &verified.refresh_token,
            &verified.user_uuid,
        )
        .map_err(|e| ApiError::internal(e.to_string()))?;
    info!("Fold session stored");

    Ok(Json(json!({ "status": "success" })))
}

pub async fn status(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "logged_in": state.session.is_logged_in() }))
}
