//! Form state and status for one converter widget

use std::sync::Arc;
use tracing::{debug, error, warn};

use super::conversion::{self, ConversionError, ConversionRequest, ConversionResult};
use super::currency::CurrencyRateProvider;

/// Longest currency input kept, in characters. Amounts are kept whole and
/// length-checked by validation instead.
pub const MAX_CURRENCY_LEN: usize = 5;

/// Raw form fields exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionForm {
    pub amount: String,
    pub from: String,
    pub to: String,
}

impl ConversionForm {
    pub fn new(amount: &str, from: &str, to: &str) -> Self {
        Self {
            amount: amount.to_string(),
            from: truncate(from, MAX_CURRENCY_LEN),
            to: truncate(to, MAX_CURRENCY_LEN),
        }
    }
}

impl Default for ConversionForm {
    fn default() -> Self {
        Self::new("", "USD", "EUR")
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiStatus {
    #[default]
    Idle,
    Loading,
    Success(ConversionResult),
    Error(String),
}

fn truncate(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// Owns the form and status of a single converter. Not shared; every
/// mutation goes through `&mut self`.
pub struct ConversionController {
    form: ConversionForm,
    status: UiStatus,
    provider: Arc<dyn CurrencyRateProvider>,
}

impl ConversionController {
    pub fn new(provider: Arc<dyn CurrencyRateProvider>) -> Self {
        Self::with_form(provider, ConversionForm::default())
    }

    pub fn with_form(provider: Arc<dyn CurrencyRateProvider>, form: ConversionForm) -> Self {
        Self {
            form,
            status: UiStatus::Idle,
            provider,
        }
    }

    pub fn form(&self) -> &ConversionForm {
        &self.form
    }

    pub fn status(&self) -> &UiStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == UiStatus::Loading
    }

    pub fn set_amount(&mut self, amount: &str) {
        self.form.amount = amount.to_string();
        self.clear_outcome();
    }

    pub fn set_source(&mut self, from: &str) {
        self.form.from = truncate(from, MAX_CURRENCY_LEN);
        self.clear_outcome();
    }

    pub fn set_target(&mut self, to: &str) {
        self.form.to = truncate(to, MAX_CURRENCY_LEN);
        self.clear_outcome();
    }

    /// Exchanges source and target. Does not convert.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.form.from, &mut self.form.to);
        self.clear_outcome();
    }

    // A request in flight keeps Loading until it settles.
    fn clear_outcome(&mut self) {
        if matches!(self.status, UiStatus::Success(_) | UiStatus::Error(_)) {
            self.status = UiStatus::Idle;
        }
    }

    /// Validates the form and enters Loading.
    ///
    /// Returns `None` when a request is already in flight or the form does
    /// not validate; in the latter case the status carries the message.
    pub fn begin_submit(&mut self) -> Option<ConversionRequest> {
        if self.is_loading() {
            debug!("Submit ignored while a conversion is in flight");
            return None;
        }

        match conversion::validate(&self.form.amount, &self.form.from, &self.form.to) {
            Ok(request) => {
                self.status = UiStatus::Loading;
                Some(request)
            }
            Err(e) => {
                warn!(error = %e, "Form validation failed");
                self.status = UiStatus::Error(e.user_message().to_string());
                None
            }
        }
    }

    /// Settles a request started by [`Self::begin_submit`].
    pub fn complete(&mut self, outcome: Result<ConversionResult, ConversionError>) {
        if !self.is_loading() {
            debug!("Dropping outcome received outside Loading");
            return;
        }

        self.status = match outcome {
            Ok(result) => UiStatus::Success(result),
            Err(e) => {
                error!(error = %e, "Conversion failed");
                UiStatus::Error(e.user_message().to_string())
            }
        };
    }

    /// Runs a full submission and returns the settled status.
    pub async fn submit(&mut self) -> &UiStatus {
        if let Some(request) = self.begin_submit() {
            let provider = Arc::clone(&self.provider);
            let outcome = conversion::convert(provider.as_ref(), &request).await;
            self.complete(outcome);
        }
        &self.status
    }
}
