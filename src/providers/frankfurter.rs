use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::conversion::ConversionError;
use crate::core::currency::{CurrencyRateProvider, RateQuote};

const LATEST_ENDPOINT: &str = "/v1/latest";

/// Frankfurter (ECB reference rates) implementation of [`CurrencyRateProvider`].
pub struct FrankfurterProvider {
    base_url: String,
    client: reqwest::Client,
}

impl FrankfurterProvider {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("convertor/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(FrankfurterProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn latest_url(&self, base: &str, amount: f64, symbol: &str) -> Result<Url, ConversionError> {
        let amount = amount.to_string();
        Url::parse_with_params(
            &format!("{}{}", self.base_url, LATEST_ENDPOINT),
            [("base", base), ("amount", amount.as_str()), ("symbols", symbol)],
        )
        .map_err(|e| ConversionError::ServiceError(format!("Invalid provider URL: {e}")))
    }
}

#[async_trait]
impl CurrencyRateProvider for FrankfurterProvider {
    #[instrument(name = "FrankfurterFetch", skip(self))]
    async fn fetch_quote(
        &self,
        base: &str,
        amount: f64,
        symbol: &str,
    ) -> Result<RateQuote, ConversionError> {
        let url = self.latest_url(base, amount, symbol)?;
        debug!("Requesting rate from {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            ConversionError::ServiceError(format!("Request error: {e} for {base}->{symbol}"))
        })?;

        if !response.status().is_success() {
            return Err(ConversionError::ServiceError(format!(
                "HTTP error: {} for {base}->{symbol}",
                response.status()
            )));
        }

        let text = response.text().await.map_err(|e| {
            ConversionError::ServiceError(format!("Failed to read response body: {e}"))
        })?;
        debug!(body = %text, "Received Frankfurter response");

        serde_json::from_str::<RateQuote>(&text).map_err(|e| {
            ConversionError::MalformedResponse(format!(
                "Failed to parse JSON response for {base}->{symbol}: {e}"
            ))
        })
    }
}
