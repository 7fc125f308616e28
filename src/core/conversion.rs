//! Conversion workflow: form validation, the rate call and result shaping

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use super::currency::CurrencyRateProvider;

/// Longest amount input accepted, in characters. Longer input is rejected
/// rather than cut, so the converted amount is always the one typed.
pub const MAX_AMOUNT_LEN: usize = 15;

/// Number of fractional digits kept on a converted amount.
pub const RESULT_PRECISION: i32 = 4;

/// User-facing message for an amount that does not validate.
pub const INVALID_AMOUNT_MESSAGE: &str = "Enter a valid amount (number > 0).";
/// User-facing message for a currency code that does not validate.
pub const INVALID_CODE_MESSAGE: &str = "Currency codes must be 3 letters (e.g. USD, EUR).";
/// User-facing message for any failure after validation passed.
pub const FETCH_FAILED_MESSAGE: &str =
    "Could not fetch the rate. Try again or check your connection.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),
    #[error("invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),
}

impl ValidationError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::InvalidAmount(_) => INVALID_AMOUNT_MESSAGE,
            ValidationError::InvalidCurrencyCode(_) => INVALID_CODE_MESSAGE,
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ConversionError {
    /// Transport failure, timeout or a non-2xx status.
    #[error("rate service error: {0}")]
    ServiceError(String),
    /// The payload decoded but cannot answer the request.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ConversionError {
    /// Every fetch failure collapses into the same message for the user.
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }
}

/// A validated conversion request. Only [`validate`] builds one.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    amount: f64,
    from: String,
    to: String,
}

impl ConversionRequest {
    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionResult {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub converted: f64,
    pub rate_date: Option<String>,
}

fn parse_amount(raw: &str) -> Option<f64> {
    if raw.chars().count() > MAX_AMOUNT_LEN {
        return None;
    }
    let normalized = raw.trim().replacen(',', ".", 1);
    normalized
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value > 0.0)
}

/// Exactly three ASCII letters, any case.
pub fn is_currency_code(raw: &str) -> bool {
    raw.len() == 3 && raw.bytes().all(|b| b.is_ascii_alphabetic())
}

/// Validates raw form input and normalizes it into a [`ConversionRequest`].
///
/// The amount accepts either a dot or a comma as decimal separator. The
/// amount is checked first, then the source code, then the target code.
pub fn validate(
    raw_amount: &str,
    raw_from: &str,
    raw_to: &str,
) -> Result<ConversionRequest, ValidationError> {
    let amount = parse_amount(raw_amount)
        .ok_or_else(|| ValidationError::InvalidAmount(raw_amount.to_string()))?;

    for code in [raw_from, raw_to] {
        if !is_currency_code(code) {
            return Err(ValidationError::InvalidCurrencyCode(code.to_string()));
        }
    }

    Ok(ConversionRequest {
        amount,
        from: raw_from.to_ascii_uppercase(),
        to: raw_to.to_ascii_uppercase(),
    })
}

/// Rounds half away from zero at `digits` fractional places.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round() / scale
}

/// Runs one conversion against `provider`. No retries.
#[instrument(name = "Convert", skip(provider), fields(from = %request.from, to = %request.to))]
pub async fn convert(
    provider: &dyn CurrencyRateProvider,
    request: &ConversionRequest,
) -> Result<ConversionResult, ConversionError> {
    let quote = provider
        .fetch_quote(&request.from, request.amount, &request.to)
        .await?;
    debug!(?quote, "Received rate quote");

    let converted = quote.rates.get(&request.to).copied().ok_or_else(|| {
        ConversionError::MalformedResponse(format!("no rate for {} in response", request.to))
    })?;

    Ok(ConversionResult {
        amount: request.amount,
        from: request.from.clone(),
        to: request.to.clone(),
        converted: round_to(converted, RESULT_PRECISION),
        rate_date: quote.date,
    })
}
