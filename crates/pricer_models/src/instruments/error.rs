//! Instrument error types.
//!
//! Structured errors for leg, bundle and market-context construction.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `InvalidStrike`: option strike is non-positive or missing
/// - `InvalidPremium`: premium (or stock basis) is negative
/// - `InvalidQuantity`: quantity is negative
/// - `InvalidParameter`: general parameter validation failure
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidStrike { strike: -100.0 };
/// assert!(format!("{}", err).contains("-100"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Invalid strike price (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Negative premium or stock basis.
    #[error("Invalid premium: p = {premium}")]
    InvalidPremium {
        /// The invalid premium value
        premium: f64,
    },

    /// Negative quantity.
    #[error("Invalid quantity: qty = {quantity}")]
    InvalidQuantity {
        /// The invalid quantity value
        quantity: f64,
    },

    /// Invalid parameter (general validation failure).
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the parameter error
        message: String,
    },
}

impl InstrumentError {
    pub(crate) fn non_finite(name: &str, value: f64) -> Self {
        InstrumentError::InvalidParameter {
            message: format!("{} must be finite, got {}", name, value),
        }
    }
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
