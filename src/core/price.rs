//! Pricing abstractions and core types

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Latest published price point for a mutual fund scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundQuote {
    pub nav: f64,
    pub scheme_name: String,
}

#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn fetch_nav(&self, scheme_code: &str) -> Result<FundQuote>;
}
