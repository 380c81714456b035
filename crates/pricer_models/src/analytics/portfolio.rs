//! Strategy-level aggregation over a [`MarketContext`].
//!
//! Option legs contribute signed quantity × per-unit BSM value and Greeks;
//! stock legs contribute ±quantity × spot and a delta of ±quantity.

use pricer_core::types::PricingError;

use super::capm::market_drift;
use super::expected_value::{expected_profit, lognormal_prob_below, ExpectedValueInput};
use crate::analytical::{Greeks, PricingResult};
use crate::instruments::{payoff_at, LegKind, MarketContext, OptionLeg, StrategyBundle};
use crate::strategy::BreakEvenSolver;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Theoretical value and Greeks of a whole strategy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StrategyValuation {
    /// Σ signed quantity × model value
    pub value: f64,
    /// Net premium paid for the option legs (positive is a debit)
    pub net_premium: f64,
    /// Aggregate Greeks
    pub greeks: Greeks,
    /// Per-leg contributions, in leg order, already scaled by signed quantity
    pub legs: Vec<PricingResult>,
}

fn value_leg(leg: &OptionLeg, market: &MarketContext) -> Result<PricingResult, PricingError> {
    let qty = leg.signed_quantity();
    match leg.kind() {
        LegKind::Stock => Ok(PricingResult {
            price: qty * market.spot(),
            greeks: Greeks {
                delta: qty,
                ..Greeks::default()
            },
        }),
        LegKind::Call { strike } | LegKind::Put { strike } => {
            let option_type = leg
                .option_type()
                .ok_or_else(|| PricingError::InvalidInput("option leg without a type".to_string()))?;
            let unit = market
                .model()?
                .greeks(option_type, strike, market.expiry())?;
            Ok(PricingResult {
                price: qty * unit.price,
                greeks: unit.greeks.scale(qty),
            })
        }
    }
}

/// Values every leg of `bundle` and sums the results.
///
/// # Examples
/// ```
/// use pricer_models::analytics::value_strategy;
/// use pricer_models::instruments::{MarketContext, OptionLeg, Side, StrategyBundle};
///
/// let market = MarketContext::new(100.0, 0.2, 1.0, 0.05, 0.0).unwrap();
/// let straddle = StrategyBundle::new(vec![
///     OptionLeg::call(Side::Long, 100.0, 10.45).unwrap(),
///     OptionLeg::put(Side::Long, 100.0, 5.57).unwrap(),
/// ]);
/// let valuation = value_strategy(&straddle, &market).unwrap();
/// assert!((valuation.value - 16.0241).abs() < 1e-3);
/// assert!(valuation.greeks.gamma > 0.0);
/// ```
pub fn value_strategy(
    bundle: &StrategyBundle,
    market: &MarketContext,
) -> Result<StrategyValuation, PricingError> {
    let legs = bundle
        .iter()
        .map(|leg| value_leg(leg, market))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StrategyValuation {
        value: legs.iter().map(|l| l.price).sum(),
        net_premium: bundle.net_premium(),
        greeks: legs.iter().map(|l| l.greeks).sum(),
        legs,
    })
}

/// Aggregate expected profit at expiry under the market's drift.
///
/// Stock legs contribute ±quantity × (S₀e^(μT) − basis).
pub fn strategy_expected_profit(
    bundle: &StrategyBundle,
    market: &MarketContext,
) -> Result<f64, PricingError> {
    let drift = market_drift(market);
    let forward = market.spot() * (drift * market.expiry()).exp();

    bundle.iter().try_fold(0.0, |total, leg| {
        let contribution = match (leg.kind(), leg.option_type()) {
            (LegKind::Stock, _) => leg.signed_quantity() * (forward - leg.premium()),
            (_, Some(option_type)) => {
                let strike = leg.strike().unwrap_or_default();
                let input = ExpectedValueInput {
                    option_type,
                    side: leg.side(),
                    strike,
                    premium: leg.premium(),
                    spot: market.spot(),
                    volatility: market.volatility(),
                    expiry: market.expiry(),
                    drift,
                };
                leg.quantity() * expected_profit(&input)?
            }
            (_, None) => 0.0,
        };
        Ok::<f64, PricingError>(total + contribution)
    })
}

/// Probability that the whole strategy finishes with a positive payoff.
///
/// The positive half-line is cut at the numeric break-even roots; each
/// interval is profitable or not according to the payoff at an interior
/// point, and the profitable intervals' lognormal probabilities are summed.
///
/// # Examples
/// ```
/// use pricer_models::analytics::strategy_prob_of_profit;
/// use pricer_models::instruments::{MarketContext, OptionLeg, Side, StrategyBundle};
///
/// let market = MarketContext::new(100.0, 0.2, 0.25, 0.03, 0.0).unwrap();
/// let condor = StrategyBundle::new(vec![
///     OptionLeg::put(Side::Long, 85.0, 0.5).unwrap(),
///     OptionLeg::put(Side::Short, 90.0, 1.5).unwrap(),
///     OptionLeg::call(Side::Short, 110.0, 1.4).unwrap(),
///     OptionLeg::call(Side::Long, 115.0, 0.4).unwrap(),
/// ]);
/// let pop = strategy_prob_of_profit(&condor, &market).unwrap();
/// assert!(pop > 0.5 && pop < 1.0);
/// ```
pub fn strategy_prob_of_profit(
    bundle: &StrategyBundle,
    market: &MarketContext,
) -> Result<f64, PricingError> {
    if bundle.is_empty() {
        return Ok(0.0);
    }
    let drift = market_drift(market);
    let cdf = |x: f64| {
        lognormal_prob_below(market.spot(), drift, market.volatility(), market.expiry(), x)
    };

    let roots = BreakEvenSolver::default()
        .numeric(bundle, Some(market.spot()))
        .unwrap_or_default();
    if roots.is_empty() {
        let profitable = payoff_at(market.spot(), bundle) > 0.0;
        tracing::debug!(profitable, "no break-even, payoff sign is constant");
        return Ok(if profitable { 1.0 } else { 0.0 });
    }

    let mut edges = Vec::with_capacity(roots.len() + 2);
    edges.push(0.0);
    edges.extend_from_slice(&roots);
    edges.push(f64::INFINITY);

    let probability = edges
        .windows(2)
        .filter(|w| {
            let probe = match (w[0], w[1]) {
                (lo, hi) if lo == 0.0 => hi / 2.0,
                (lo, hi) if hi.is_infinite() => lo * 2.0,
                (lo, hi) => 0.5 * (lo + hi),
            };
            payoff_at(probe, bundle) > 0.0
        })
        .map(|w| cdf(w[1]) - cdf(w[0]))
        .sum::<f64>();

    Ok(probability.clamp(0.0, 1.0))
}
