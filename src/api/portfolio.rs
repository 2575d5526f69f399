use super::AppState;
use crate::core::portfolio::{self, PortfolioValuation};
use axum::Json;
use axum::extract::State;

/// Values the stored holdings against the live NAV feed. Holdings whose
/// lookup fails are skipped by the valuator, so this endpoint never errors.
pub async fn get_portfolio(State(state): State<AppState>) -> Json<PortfolioValuation> {
    let holdings = state.holdings.load();
    Json(portfolio::valuate(&holdings, state.prices.as_ref()).await)
}
