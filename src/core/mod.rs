//! Core business logic abstractions

pub mod config;
pub mod controller;
pub mod conversion;
pub mod currency;
pub mod log;
pub mod reveal;

// Re-export main types for cleaner imports
pub use controller::{ConversionController, ConversionForm, UiStatus};
pub use conversion::{
    ConversionError, ConversionRequest, ConversionResult, ValidationError, convert, validate,
};
pub use currency::{CurrencyRateProvider, RateQuote};
pub use reveal::RevealOnce;
