//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: domain violations rejected by the BSM pricer, the
//!   implied volatility solver and the expected-value analytics

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// Every variant is a structurally invalid input. Degenerate but valid
/// inputs (zero expiry, zero volatility) are priced through an explicit
/// intrinsic-value branch and never reach this type.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Spot price not strictly positive.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Strike not strictly positive.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Negative volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Negative time to expiry.
    #[error("Invalid expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid expiry value
        expiry: f64,
    },

    /// Negative option price or premium.
    #[error("Invalid price: {price}")]
    InvalidPrice {
        /// The invalid price value
        price: f64,
    },

    /// A parameter was NaN or infinite.
    #[error("Non-finite {name}: {value}")]
    NonFinite {
        /// Parameter name
        name: &'static str,
        /// The offending value
        value: f64,
    },
}

impl AnalyticalError {
    /// Rejects NaN and infinities for the named parameter.
    pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(AnalyticalError::NonFinite { name, value })
        }
    }
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
