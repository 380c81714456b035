//! Implied volatility by Newton-Raphson with a bisection fallback.
//!
//! Newton converges in a handful of steps near the money but stalls where
//! vega vanishes (deep ITM/OTM, short tenors). Once Newton gives up, the
//! solver brackets the root by growing the upper volatility geometrically and
//! bisects, which always converges inside a bracket.
//!
//! "No solution" (price outside the no-arbitrage band, no bracket) is
//! reported as `Ok(None)`. Only structurally invalid inputs are errors.

use pricer_core::math::solvers::{BisectionSolver, BracketConfig, NewtonRaphsonSolver, SolverConfig};

use super::black_scholes::{BlackScholes, OptionType};
use super::error::AnalyticalError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunables for [`ImpliedVolSolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ImpliedVolConfig {
    /// Starting volatility when the input carries none.
    pub initial_vol: f64,
    /// Price tolerance for both phases.
    pub tolerance: f64,
    /// Newton iteration budget.
    pub max_newton_iterations: usize,
    /// Lower volatility clamp.
    pub min_vol: f64,
    /// Upper volatility clamp and bracket cap.
    pub max_vol: f64,
    /// Vega below this hands over to bisection.
    pub vega_floor: f64,
    /// Geometric growth of the bracket upper bound.
    pub bracket_growth: f64,
    /// Number of bracket expansions.
    pub max_expansions: usize,
    /// Bisection iteration budget.
    pub max_bisection_iterations: usize,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            initial_vol: 0.2,
            tolerance: 1e-8,
            max_newton_iterations: 50,
            min_vol: 1e-6,
            max_vol: 5.0,
            vega_floor: 1e-10,
            bracket_growth: 1.6,
            max_expansions: 25,
            max_bisection_iterations: 80,
        }
    }
}

/// A quoted option to invert.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImpliedVolInput {
    /// Call or put
    pub option_type: OptionType,
    /// Observed mid price (≥ 0)
    pub price: f64,
    /// Spot S₀
    pub spot: f64,
    /// Strike K
    pub strike: f64,
    /// Time to expiry in years
    pub expiry: f64,
    /// Risk-free rate
    pub rate: f64,
    /// Continuous dividend / borrow yield
    #[cfg_attr(feature = "serde", serde(default))]
    pub dividend_yield: f64,
    /// Starting guess, overriding [`ImpliedVolConfig::initial_vol`]
    #[cfg_attr(feature = "serde", serde(default))]
    pub initial_vol: Option<f64>,
}

/// Implied volatility solver.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{
///     BlackScholes, ImpliedVolInput, ImpliedVolSolver, OptionType,
/// };
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.0, 0.35).unwrap();
/// let price = bs.price_call(110.0, 0.5).unwrap();
///
/// let input = ImpliedVolInput {
///     option_type: OptionType::Call,
///     price,
///     spot: 100.0,
///     strike: 110.0,
///     expiry: 0.5,
///     rate: 0.05,
///     dividend_yield: 0.0,
///     initial_vol: None,
/// };
/// let vol = ImpliedVolSolver::default().solve(&input).unwrap().unwrap();
/// assert!((vol - 0.35).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImpliedVolSolver {
    config: ImpliedVolConfig,
}

impl ImpliedVolSolver {
    /// Creates a solver with the given tunables.
    pub fn new(config: ImpliedVolConfig) -> Self {
        Self { config }
    }

    /// Returns the solver tunables.
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    /// Solves for σ such that the model price matches `input.price`.
    ///
    /// # Returns
    /// - `Ok(Some(σ))` on convergence
    /// - `Ok(None)` if the price violates no-arbitrage bounds, or no
    ///   bracket exists inside `[min_vol, max_vol]`
    ///
    /// # Errors
    /// `AnalyticalError` for non-finite inputs, negative price, non-positive
    /// spot/strike/initial volatility or negative expiry.
    pub fn solve(&self, input: &ImpliedVolInput) -> Result<Option<f64>, AnalyticalError> {
        let cfg = &self.config;
        let price = AnalyticalError::ensure_finite("price", input.price)?;
        if price < 0.0 {
            return Err(AnalyticalError::InvalidPrice { price });
        }
        let initial_vol = input.initial_vol.unwrap_or(cfg.initial_vol);
        AnalyticalError::ensure_finite("initial volatility", initial_vol)?;
        if initial_vol <= 0.0 {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: initial_vol,
            });
        }

        let model = BlackScholes::new(input.spot, input.rate, input.dividend_yield, initial_vol)?;
        let (option_type, strike, expiry) = (input.option_type, input.strike, input.expiry);

        // Validates strike and expiry as a side effect.
        let (lower_bound, upper_bound) = no_arbitrage_bounds(&model, option_type, strike, expiry)?;

        if expiry == 0.0 {
            let intrinsic = option_type.intrinsic(input.spot, strike);
            return Ok(((price - intrinsic).abs() <= cfg.tolerance).then_some(0.0));
        }

        if price < lower_bound - cfg.tolerance || price > upper_bound + cfg.tolerance {
            tracing::debug!(
                price,
                lower_bound,
                upper_bound,
                "price outside no-arbitrage bounds"
            );
            return Ok(None);
        }

        let objective = |vol: f64| {
            model
                .with_volatility(vol)
                .and_then(|m| m.price(option_type, strike, expiry))
                .map_or(f64::NAN, |p| p - price)
        };
        let vega = |vol: f64| {
            model
                .with_volatility(vol)
                .and_then(|m| m.vega_raw(strike, expiry))
                .map_or(f64::NAN, |v| v)
        };

        let newton = NewtonRaphsonSolver::new(SolverConfig::new(
            cfg.tolerance.max(f64::EPSILON),
            cfg.max_newton_iterations.max(1),
        ))
        .with_derivative_floor(cfg.vega_floor);

        let start = initial_vol.clamp(cfg.min_vol, cfg.max_vol);
        match newton.find_root_bounded(objective, vega, start, cfg.min_vol, cfg.max_vol) {
            Ok(vol) => return Ok(Some(vol)),
            Err(err) => tracing::debug!(%err, "Newton failed, falling back to bisection"),
        }

        let bisection = BisectionSolver::new(SolverConfig::new(
            cfg.tolerance.max(f64::EPSILON),
            cfg.max_bisection_iterations.max(1),
        ));
        let bracket = BracketConfig {
            growth: cfg.bracket_growth,
            max_expansions: cfg.max_expansions,
            cap: cfg.max_vol,
        };

        let (lo, hi) = match bisection.expand_upper(objective, cfg.min_vol, start, bracket) {
            Ok(bounds) => bounds,
            Err(err) => {
                tracing::debug!(%err, "implied volatility could not be bracketed");
                return Ok(None);
            }
        };

        match bisection.find_root(objective, lo, hi) {
            Ok(vol) => Ok(Some(vol)),
            Err(err) => {
                tracing::debug!(%err, "bisection did not converge");
                Ok(None)
            }
        }
    }
}

/// Implied volatility with the default configuration.
///
/// See [`ImpliedVolSolver::solve`].
pub fn implied_vol(input: &ImpliedVolInput) -> Result<Option<f64>, AnalyticalError> {
    ImpliedVolSolver::default().solve(input)
}

/// Model-free price band for a European option.
///
/// Call: [max(0, S·e^(−qT) − K·e^(−rT)), S·e^(−qT)]
/// Put: [max(0, K·e^(−rT) − S·e^(−qT)), K·e^(−rT)]
pub fn no_arbitrage_bounds(
    model: &BlackScholes,
    option_type: OptionType,
    strike: f64,
    expiry: f64,
) -> Result<(f64, f64), AnalyticalError> {
    // Zero volatility prices the discounted intrinsic, i.e. the lower bound.
    let lower = model.with_volatility(0.0)?.price(option_type, strike, expiry)?;
    let upper = match option_type {
        OptionType::Call => model.spot() * (-model.dividend_yield() * expiry).exp(),
        OptionType::Put => strike * (-model.rate() * expiry).exp(),
    };
    Ok((lower, upper))
}
