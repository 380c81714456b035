//! Black-Scholes-Merton pricing with continuous carry.
//!
//! This module provides European call/put prices and Greeks for a long
//! position of one unit. Side and quantity scaling happen when legs are
//! aggregated, never here.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(−qT)·N(d₁) − K·e^(−rT)·N(d₂)
//! **Put Price**: P = K·e^(−rT)·N(−d₂) − S·e^(−qT)·N(−d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r − q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ − σ√T
//!
//! ## Greek Conventions
//!
//! - vega is per 1 vol-point (∂V/∂σ ÷ 100)
//! - theta is per calendar day (−∂V/∂T ÷ 365)
//! - rho is per unit of rate (∂V/∂r)
//!
//! ## Degenerate Inputs
//!
//! When σ√T vanishes (T = 0 or σ = 0) the terminal price is deterministic and
//! the option is worth its discounted intrinsic value
//! max(±(S·e^(−qT) − K·e^(−rT)), 0). Greeks follow from that expression.

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// σ√T below this is treated as zero.
const MIN_TOTAL_VOL: f64 = 1e-12;

/// Scaling from ∂V/∂σ to "per vol-point".
const VEGA_SCALE: f64 = 100.0;

/// Scaling from annual theta to "per calendar day".
const THETA_DAYS: f64 = 365.0;

/// European option type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy at the strike
    Call,
    /// Right to sell at the strike
    Put,
}

impl OptionType {
    /// +1 for calls, −1 for puts.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Intrinsic value max(±(S − K), 0).
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        (self.sign() * (spot - strike)).max(0.0)
    }
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

/// Option sensitivities for a long position of one unit.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ per vol-point
    pub vega: f64,
    /// Time decay per calendar day
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

impl Greeks {
    /// Multiplies every sensitivity by `factor` (signed quantity).
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            vega: self.vega * factor,
            theta: self.theta * factor,
            rho: self.rho * factor,
        }
    }
}

impl std::ops::Add for Greeks {
    type Output = Greeks;

    fn add(self, other: Greeks) -> Greeks {
        Greeks {
            delta: self.delta + other.delta,
            gamma: self.gamma + other.gamma,
            vega: self.vega + other.vega,
            theta: self.theta + other.theta,
            rho: self.rho + other.rho,
        }
    }
}

impl std::iter::Sum for Greeks {
    fn sum<I: Iterator<Item = Greeks>>(iter: I) -> Self {
        iter.fold(Greeks::default(), |acc, g| acc + g)
    }
}

/// Price together with its Greeks.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PricingResult {
    /// Theoretical value
    pub price: f64,
    /// Sensitivities
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub greeks: Greeks,
}

/// d₁ for a lognormal terminal price with drift `carry`.
///
/// With `carry = r − q` this is the BSM d₁; with a real-world drift μ it is
/// the d̄ used by the expected-value analytics. `total_vol` is σ√T and must
/// be positive.
#[inline]
pub fn d1_with_drift(spot: f64, strike: f64, carry: f64, volatility: f64, expiry: f64) -> f64 {
    let total_vol = volatility * expiry.sqrt();
    ((spot / strike).ln() + (carry + 0.5 * volatility * volatility) * expiry) / total_vol
}

/// Black-Scholes-Merton model for European option pricing.
///
/// Holds the market side of the calculation (spot, rates, volatility);
/// contract terms are passed per call.
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0).unwrap();
/// let put = bs.price_put(100.0, 1.0).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    spot: f64,
    rate: f64,
    dividend_yield: f64,
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new model.
    ///
    /// # Errors
    /// - `AnalyticalError::NonFinite` for NaN or infinite inputs
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility < 0
    pub fn new(
        spot: f64,
        rate: f64,
        dividend_yield: f64,
        volatility: f64,
    ) -> Result<Self, AnalyticalError> {
        AnalyticalError::ensure_finite("spot", spot)?;
        AnalyticalError::ensure_finite("rate", rate)?;
        AnalyticalError::ensure_finite("dividend yield", dividend_yield)?;
        AnalyticalError::ensure_finite("volatility", volatility)?;

        if spot <= 0.0 {
            return Err(AnalyticalError::InvalidSpot { spot });
        }
        if volatility < 0.0 {
            return Err(AnalyticalError::InvalidVolatility { volatility });
        }

        Ok(Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the continuous dividend / borrow yield.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Same market with a different volatility.
    pub fn with_volatility(&self, volatility: f64) -> Result<Self, AnalyticalError> {
        Self::new(self.spot, self.rate, self.dividend_yield, volatility)
    }

    fn check_contract(strike: f64, expiry: f64) -> Result<(), AnalyticalError> {
        AnalyticalError::ensure_finite("strike", strike)?;
        AnalyticalError::ensure_finite("expiry", expiry)?;
        if strike <= 0.0 {
            return Err(AnalyticalError::InvalidStrike { strike });
        }
        if expiry < 0.0 {
            return Err(AnalyticalError::InvalidExpiry { expiry });
        }
        Ok(())
    }

    /// True when σ√T is too small for the lognormal formulas.
    #[inline]
    pub fn is_degenerate(&self, expiry: f64) -> bool {
        self.volatility * expiry.sqrt() < MIN_TOTAL_VOL
    }

    /// Discounted spot S·e^(−qT) and discounted strike K·e^(−rT).
    #[inline]
    fn discounted(&self, strike: f64, expiry: f64) -> (f64, f64) {
        (
            self.spot * (-self.dividend_yield * expiry).exp(),
            strike * (-self.rate * expiry).exp(),
        )
    }

    /// The d₁ term. Infinite with the sign of the discounted moneyness in the
    /// degenerate case.
    pub fn d1(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        Self::check_contract(strike, expiry)?;
        if self.is_degenerate(expiry) {
            let (fwd_spot, fwd_strike) = self.discounted(strike, expiry);
            return Ok(if fwd_spot > fwd_strike {
                f64::INFINITY
            } else if fwd_spot < fwd_strike {
                f64::NEG_INFINITY
            } else {
                0.0
            });
        }
        Ok(d1_with_drift(
            self.spot,
            strike,
            self.rate - self.dividend_yield,
            self.volatility,
            expiry,
        ))
    }

    /// The d₂ term, d₁ − σ√T.
    pub fn d2(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        let d1 = self.d1(strike, expiry)?;
        Ok(d1 - self.volatility * expiry.sqrt())
    }

    /// European option price.
    ///
    /// # Errors
    /// `AnalyticalError` for a non-positive strike, negative expiry or
    /// non-finite terms.
    pub fn price(
        &self,
        option_type: OptionType,
        strike: f64,
        expiry: f64,
    ) -> Result<f64, AnalyticalError> {
        Self::check_contract(strike, expiry)?;
        let (fwd_spot, fwd_strike) = self.discounted(strike, expiry);

        if self.is_degenerate(expiry) {
            return Ok(option_type.intrinsic(fwd_spot, fwd_strike));
        }

        let d1 = self.d1(strike, expiry)?;
        let d2 = d1 - self.volatility * expiry.sqrt();

        let price = match option_type {
            OptionType::Call => fwd_spot * norm_cdf(d1) - fwd_strike * norm_cdf(d2),
            OptionType::Put => fwd_strike * norm_cdf(-d2) - fwd_spot * norm_cdf(-d1),
        };
        Ok(price)
    }

    /// European call price.
    pub fn price_call(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        self.price(OptionType::Call, strike, expiry)
    }

    /// European put price.
    pub fn price_put(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        self.price(OptionType::Put, strike, expiry)
    }

    /// Unscaled vega ∂V/∂σ = S·e^(−qT)·φ(d₁)·√T, identical for calls and puts.
    ///
    /// Zero in the degenerate case.
    pub fn vega_raw(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        Self::check_contract(strike, expiry)?;
        if self.is_degenerate(expiry) {
            return Ok(0.0);
        }
        let d1 = self.d1(strike, expiry)?;
        let (fwd_spot, _) = self.discounted(strike, expiry);
        Ok(fwd_spot * norm_pdf(d1) * expiry.sqrt())
    }

    /// Price and Greeks for a long position of one unit.
    ///
    /// # Examples
    /// ```
    /// use pricer_models::analytical::{BlackScholes, OptionType};
    ///
    /// let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.2).unwrap();
    /// let result = bs.greeks(OptionType::Call, 100.0, 1.0).unwrap();
    ///
    /// assert!(result.greeks.delta > 0.5 && result.greeks.delta < 1.0);
    /// assert!(result.greeks.theta < 0.0);
    /// ```
    pub fn greeks(
        &self,
        option_type: OptionType,
        strike: f64,
        expiry: f64,
    ) -> Result<PricingResult, AnalyticalError> {
        let price = self.price(option_type, strike, expiry)?;
        let (fwd_spot, fwd_strike) = self.discounted(strike, expiry);
        let q = self.dividend_yield;
        let r = self.rate;

        if self.is_degenerate(expiry) {
            return Ok(PricingResult {
                price,
                greeks: self.degenerate_greeks(option_type, fwd_spot, fwd_strike, expiry),
            });
        }

        let sqrt_t = expiry.sqrt();
        let d1 = self.d1(strike, expiry)?;
        let d2 = d1 - self.volatility * sqrt_t;
        let pdf_d1 = norm_pdf(d1);

        let gamma = fwd_spot * pdf_d1 / (self.spot * self.spot * self.volatility * sqrt_t);
        let vega = fwd_spot * pdf_d1 * sqrt_t;
        let decay = -fwd_spot * pdf_d1 * self.volatility / (2.0 * sqrt_t);

        let (delta, theta, rho) = match option_type {
            OptionType::Call => (
                fwd_spot / self.spot * norm_cdf(d1),
                decay - r * fwd_strike * norm_cdf(d2) + q * fwd_spot * norm_cdf(d1),
                expiry * fwd_strike * norm_cdf(d2),
            ),
            OptionType::Put => (
                fwd_spot / self.spot * (norm_cdf(d1) - 1.0),
                decay + r * fwd_strike * norm_cdf(-d2) - q * fwd_spot * norm_cdf(-d1),
                -expiry * fwd_strike * norm_cdf(-d2),
            ),
        };

        Ok(PricingResult {
            price,
            greeks: Greeks {
                delta,
                gamma,
                vega: vega / VEGA_SCALE,
                theta: theta / THETA_DAYS,
                rho,
            },
        })
    }

    /// Greeks of max(±(S·e^(−qT) − K·e^(−rT)), 0).
    fn degenerate_greeks(
        &self,
        option_type: OptionType,
        fwd_spot: f64,
        fwd_strike: f64,
        expiry: f64,
    ) -> Greeks {
        let in_the_money = option_type.sign() * (fwd_spot - fwd_strike) > 0.0;
        if !in_the_money {
            return Greeks::default();
        }

        let sign = option_type.sign();
        let annual_theta = sign * (self.dividend_yield * fwd_spot - self.rate * fwd_strike);
        Greeks {
            delta: sign * fwd_spot / self.spot,
            gamma: 0.0,
            vega: 0.0,
            theta: annual_theta / THETA_DAYS,
            rho: sign * expiry * fwd_strike,
        }
    }
}

/// Inputs for the free pricing functions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BsmParams {
    /// Spot price S₀ > 0
    pub spot: f64,
    /// Strike K > 0
    pub strike: f64,
    /// Time to expiry T ≥ 0 in years
    pub expiry: f64,
    /// Annualised volatility σ ≥ 0
    pub volatility: f64,
    /// Continuously compounded risk-free rate r
    pub rate: f64,
    /// Continuous dividend / borrow yield q
    #[cfg_attr(feature = "serde", serde(default))]
    pub dividend_yield: f64,
}

impl BsmParams {
    fn model(&self) -> Result<BlackScholes, AnalyticalError> {
        BlackScholes::new(self.spot, self.rate, self.dividend_yield, self.volatility)
    }
}

/// European call price.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{call_price, BsmParams};
///
/// let params = BsmParams {
///     spot: 100.0, strike: 100.0, expiry: 1.0,
///     volatility: 0.2, rate: 0.05, dividend_yield: 0.0,
/// };
/// let price = call_price(&params).unwrap();
/// assert!((price - 10.4506).abs() < 1e-3);
/// ```
pub fn call_price(params: &BsmParams) -> Result<f64, AnalyticalError> {
    params.model()?.price_call(params.strike, params.expiry)
}

/// European put price.
pub fn put_price(params: &BsmParams) -> Result<f64, AnalyticalError> {
    params.model()?.price_put(params.strike, params.expiry)
}

/// European call price and Greeks.
pub fn call_greeks(params: &BsmParams) -> Result<PricingResult, AnalyticalError> {
    params
        .model()?
        .greeks(OptionType::Call, params.strike, params.expiry)
}

/// European put price and Greeks.
pub fn put_greeks(params: &BsmParams) -> Result<PricingResult, AnalyticalError> {
    params
        .model()?
        .greeks(OptionType::Put, params.strike, params.expiry)
}
