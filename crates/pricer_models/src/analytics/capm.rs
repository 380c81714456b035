//! Capital Asset Pricing Model helpers and drift selection.
//!
//! CAPM: E[R] = r_f + β·ERP, where the equity risk premium is either quoted
//! directly or implied by an expected market return (ERP = E[R_m] − r_f).
//!
//! [`drift_from_mode`] is where an externally supplied expected return enters
//! the expected-value analytics.

use pricer_core::types::PricingError;
use thiserror::Error;

use crate::instruments::{DriftMode, MarketContext};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// CAPM input errors.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CapmError {
    /// Neither an equity risk premium nor a market return was supplied.
    #[error("CAPM needs an equity risk premium or an expected market return")]
    MissingRiskPremium,

    /// A parameter was NaN or infinite.
    #[error("Non-finite {name}: {value}")]
    NonFinite {
        /// Parameter name
        name: &'static str,
        /// The offending value
        value: f64,
    },
}

impl From<CapmError> for PricingError {
    fn from(err: CapmError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

fn ensure_finite(name: &'static str, value: f64) -> Result<f64, CapmError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CapmError::NonFinite { name, value })
    }
}

/// Inputs for a CAPM expected return.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CapmInput {
    /// Risk-free rate r_f
    pub risk_free: f64,
    /// Asset beta
    pub beta: f64,
    /// Quoted equity risk premium; takes precedence over `market_return`
    pub equity_risk_premium: Option<f64>,
    /// Expected market return E[R_m]
    pub market_return: Option<f64>,
}

impl CapmInput {
    /// Equity risk premium: the quoted one, else E[R_m] − r_f.
    pub fn risk_premium(&self) -> Result<f64, CapmError> {
        let risk_free = ensure_finite("risk-free rate", self.risk_free)?;
        match (self.equity_risk_premium, self.market_return) {
            (Some(erp), _) => ensure_finite("equity risk premium", erp),
            (None, Some(market)) => Ok(ensure_finite("market return", market)? - risk_free),
            (None, None) => Err(CapmError::MissingRiskPremium),
        }
    }
}

/// CAPM expected return r_f + β·ERP.
///
/// # Examples
/// ```
/// use pricer_models::analytics::{capm_expected_return, CapmInput};
///
/// let input = CapmInput {
///     risk_free: 0.04,
///     beta: 1.2,
///     equity_risk_premium: Some(0.05),
///     market_return: None,
/// };
/// assert!((capm_expected_return(&input).unwrap() - 0.10).abs() < 1e-12);
/// ```
pub fn capm_expected_return(input: &CapmInput) -> Result<f64, CapmError> {
    let beta = ensure_finite("beta", input.beta)?;
    Ok(input.risk_free + beta * input.risk_premium()?)
}

/// Realised return in excess of the CAPM expectation (Jensen's alpha).
pub fn capm_alpha(realized_return: f64, input: &CapmInput) -> Result<f64, CapmError> {
    let realized = ensure_finite("realized return", realized_return)?;
    Ok(realized - capm_expected_return(input)?)
}

/// β = Cov(asset, market) / Var(market); `None` for a zero or non-finite
/// variance.
pub fn beta_from_cov_var(covariance: f64, market_variance: f64) -> Option<f64> {
    if market_variance == 0.0 || !market_variance.is_finite() || !covariance.is_finite() {
        return None;
    }
    Some(covariance / market_variance)
}

/// β = ρ·σ_asset/σ_market; `None` for a zero or non-finite market volatility.
pub fn beta_from_corr(correlation: f64, asset_vol: f64, market_vol: f64) -> Option<f64> {
    if market_vol == 0.0 || !market_vol.is_finite() {
        return None;
    }
    let beta = correlation * asset_vol / market_vol;
    beta.is_finite().then_some(beta)
}

/// Annual price drift μ of the underlying for the given mode.
///
/// Risk-neutral: r − q. CAPM: μ_CAPM − q, since the CAPM return includes
/// the yield the price itself does not earn. A CAPM mode without an expected
/// return falls back to risk-neutral.
///
/// # Examples
/// ```
/// use pricer_models::analytics::drift_from_mode;
/// use pricer_models::instruments::DriftMode;
///
/// assert_eq!(drift_from_mode(DriftMode::RiskNeutral, 0.05, 0.01), 0.05 - 0.01);
/// let capm = DriftMode::Capm { expected_return: Some(0.09) };
/// assert_eq!(drift_from_mode(capm, 0.05, 0.01), 0.09 - 0.01);
/// ```
pub fn drift_from_mode(mode: DriftMode, rate: f64, dividend_yield: f64) -> f64 {
    match mode {
        DriftMode::RiskNeutral => rate - dividend_yield,
        DriftMode::Capm {
            expected_return: Some(mu),
        } if mu.is_finite() => mu - dividend_yield,
        DriftMode::Capm { expected_return } => {
            tracing::warn!(
                ?expected_return,
                "CAPM drift requested without a usable expected return, using risk-neutral drift"
            );
            rate - dividend_yield
        }
    }
}

/// [`drift_from_mode`] for a market context.
pub fn market_drift(market: &MarketContext) -> f64 {
    drift_from_mode(market.drift(), market.rate(), market.dividend_yield())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn input(erp: Option<f64>, market: Option<f64>) -> CapmInput {
        CapmInput {
            risk_free: 0.03,
            beta: 1.5,
            equity_risk_premium: erp,
            market_return: market,
        }
    }

    #[test]
    fn test_expected_return_with_erp() {
        assert_relative_eq!(
            capm_expected_return(&input(Some(0.06), None)).unwrap(),
            0.12,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_erp_takes_precedence_over_market_return() {
        assert_eq!(
            capm_expected_return(&input(Some(0.06), Some(0.50))).unwrap(),
            capm_expected_return(&input(Some(0.06), None)).unwrap()
        );
    }

    #[test]
    fn test_expected_return_from_market_return() {
        // ERP = 0.08 − 0.03
        assert_relative_eq!(
            capm_expected_return(&input(None, Some(0.08))).unwrap(),
            0.105,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_missing_premium() {
        assert_eq!(
            capm_expected_return(&input(None, None)),
            Err(CapmError::MissingRiskPremium)
        );
    }

    #[test]
    fn test_non_finite_beta() {
        let mut bad = input(Some(0.05), None);
        bad.beta = f64::NAN;
        assert!(matches!(
            capm_expected_return(&bad),
            Err(CapmError::NonFinite { name: "beta", .. })
        ));
    }

    #[test]
    fn test_alpha() {
        let alpha = capm_alpha(0.15, &input(Some(0.06), None)).unwrap();
        assert_relative_eq!(alpha, 0.03, epsilon = 1e-12);
    }

    #[test]
    fn test_beta_conversions() {
        assert_eq!(beta_from_cov_var(0.02, 0.04), Some(0.5));
        assert_eq!(beta_from_cov_var(0.02, 0.0), None);
        assert_relative_eq!(beta_from_corr(0.8, 0.3, 0.2).unwrap(), 1.2, epsilon = 1e-12);
        assert_eq!(beta_from_corr(0.8, 0.3, 0.0), None);
    }

    #[test]
    fn test_drift_modes() {
        assert_relative_eq!(
            drift_from_mode(DriftMode::RiskNeutral, 0.05, 0.02),
            0.03,
            epsilon = 1e-15
        );
        assert_relative_eq!(
            drift_from_mode(
                DriftMode::Capm {
                    expected_return: Some(0.10)
                },
                0.05,
                0.02
            ),
            0.08,
            epsilon = 1e-15
        );
        // Missing CAPM return falls back to risk-neutral
        assert_relative_eq!(
            drift_from_mode(
                DriftMode::Capm {
                    expected_return: None
                },
                0.05,
                0.02
            ),
            0.03,
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_market_drift() {
        let market = MarketContext::new(100.0, 0.2, 1.0, 0.04, 0.01)
            .unwrap()
            .with_drift(DriftMode::Capm {
                expected_return: Some(0.07),
            });
        assert_relative_eq!(market_drift(&market), 0.06, epsilon = 1e-15);
    }

    #[test]
    fn test_error_converts_to_invalid_input() {
        let err: PricingError = CapmError::MissingRiskPremium.into();
        assert!(matches!(err, PricingError::InvalidInput(_)));
    }
}
