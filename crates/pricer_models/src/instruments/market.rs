//! Market context shared by pricing and expected-value analytics.

use super::error::InstrumentError;
use crate::analytical::{AnalyticalError, BlackScholes};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Drift used for the real-world terminal distribution.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum DriftMode {
    /// μ = r − q
    #[default]
    RiskNeutral,
    /// μ from a CAPM expected return; falls back to risk-neutral when absent
    Capm {
        /// Annual CAPM expected return of the underlying
        #[cfg_attr(feature = "serde", serde(default))]
        expected_return: Option<f64>,
    },
}

/// Spot, volatility, tenor, rates and drift for one evaluation.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{DriftMode, MarketContext};
///
/// let market = MarketContext::new(100.0, 0.2, 0.5, 0.05, 0.01)
///     .unwrap()
///     .with_drift(DriftMode::Capm { expected_return: Some(0.08) });
/// assert_eq!(market.spot(), 100.0);
/// assert!(MarketContext::new(0.0, 0.2, 0.5, 0.05, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "MarketSpec", into = "MarketSpec"))]
pub struct MarketContext {
    spot: f64,
    volatility: f64,
    expiry: f64,
    rate: f64,
    dividend_yield: f64,
    drift: DriftMode,
}

impl MarketContext {
    /// Creates a validated context with risk-neutral drift.
    ///
    /// # Errors
    /// `InstrumentError::InvalidParameter` if spot <= 0, volatility < 0,
    /// expiry < 0 or any value is non-finite.
    pub fn new(
        spot: f64,
        volatility: f64,
        expiry: f64,
        rate: f64,
        dividend_yield: f64,
    ) -> Result<Self, InstrumentError> {
        for (name, value) in [
            ("spot", spot),
            ("volatility", volatility),
            ("expiry", expiry),
            ("rate", rate),
            ("dividend yield", dividend_yield),
        ] {
            if !value.is_finite() {
                return Err(InstrumentError::non_finite(name, value));
            }
        }
        if spot <= 0.0 {
            return Err(InstrumentError::InvalidParameter {
                message: format!("spot must be positive, got {}", spot),
            });
        }
        if volatility < 0.0 {
            return Err(InstrumentError::InvalidParameter {
                message: format!("volatility must be non-negative, got {}", volatility),
            });
        }
        if expiry < 0.0 {
            return Err(InstrumentError::InvalidParameter {
                message: format!("expiry must be non-negative, got {}", expiry),
            });
        }

        Ok(Self {
            spot,
            volatility,
            expiry,
            rate,
            dividend_yield,
            drift: DriftMode::RiskNeutral,
        })
    }

    /// Same context with a different drift mode.
    pub fn with_drift(mut self, drift: DriftMode) -> Self {
        self.drift = drift;
        self
    }

    /// Spot price S₀.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Annualised volatility σ.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Time to expiry T in years.
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Risk-free rate r.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Continuous dividend / borrow yield q.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Drift mode.
    #[inline]
    pub fn drift(&self) -> DriftMode {
        self.drift
    }

    /// Black-Scholes-Merton model for this market.
    pub fn model(&self) -> Result<BlackScholes, AnalyticalError> {
        BlackScholes::new(self.spot, self.rate, self.dividend_yield, self.volatility)
    }
}

#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct MarketSpec {
    spot: f64,
    volatility: f64,
    expiry: f64,
    rate: f64,
    #[serde(default)]
    dividend_yield: f64,
    #[serde(default)]
    drift: DriftMode,
}

#[cfg(feature = "serde")]
impl TryFrom<MarketSpec> for MarketContext {
    type Error = InstrumentError;

    fn try_from(spec: MarketSpec) -> Result<Self, Self::Error> {
        Ok(MarketContext::new(
            spec.spot,
            spec.volatility,
            spec.expiry,
            spec.rate,
            spec.dividend_yield,
        )?
        .with_drift(spec.drift))
    }
}

#[cfg(feature = "serde")]
impl From<MarketContext> for MarketSpec {
    fn from(market: MarketContext) -> Self {
        MarketSpec {
            spot: market.spot,
            volatility: market.volatility,
            expiry: market.expiry,
            rate: market.rate,
            dividend_yield: market.dividend_yield,
            drift: market.drift,
        }
    }
}
