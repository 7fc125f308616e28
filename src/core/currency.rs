//! Provides exchange-rate lookups for the conversion workflow.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;

use super::conversion::ConversionError;

/// Payload returned by a rate provider for one lookup.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RateQuote {
    /// Currency code mapped to the converted amount (not the unit rate).
    pub rates: HashMap<String, f64>,
    #[serde(default)]
    pub date: Option<String>,
}

#[async_trait]
pub trait CurrencyRateProvider: Send + Sync {
    /// Converts `amount` of `base` into `symbol`. Issued once per submission.
    async fn fetch_quote(
        &self,
        base: &str,
        amount: f64,
        symbol: &str,
    ) -> Result<RateQuote, ConversionError>;
}
