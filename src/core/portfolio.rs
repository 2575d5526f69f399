//! Portfolio valuation over stored holdings

use crate::core::price::PriceProvider;
use crate::store::holdings::Holding;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize)]
pub struct PricedHolding {
    pub scheme_code: String,
    pub scheme_name: String,
    pub units: f64,
    pub nav: f64,
    pub current_value: f64,
}

#[derive(Debug, Serialize)]
pub struct PortfolioValuation {
    pub portfolio: Vec<PricedHolding>,
    pub total_value: f64,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Prices every holding against the NAV feed and sums the result.
///
/// A holding whose lookup fails is excluded from both the list and the
/// total; one bad fund must not blank the whole portfolio. Input order is
/// preserved for the holdings that priced successfully.
pub async fn valuate(holdings: &[Holding], provider: &dyn PriceProvider) -> PortfolioValuation {
    let mut total_value = 0.0;
    let mut portfolio = Vec::new();

    for holding in holdings {
        match provider.fetch_nav(&holding.scheme_code).await {
            Ok(quote) => {
                let value = holding.units * quote.nav;
                total_value += value;
                portfolio.push(PricedHolding {
                    scheme_code: holding.scheme_code.clone(),
                    scheme_name: quote.scheme_name,
                    units: holding.units,
                    nav: quote.nav,
                    current_value: round2(value),
                });
                debug!(
                    "Priced {}: {} units at nav {}",
                    holding.scheme_code, holding.units, quote.nav
                );
            }
            Err(e) => {
                warn!(
                    scheme_code = %holding.scheme_code,
                    error = %e,
                    "NAV lookup failed, excluding holding from valuation"
                );
            }
        }
    }

    PortfolioValuation {
        portfolio,
        total_value: round2(total_value),
    }
}
