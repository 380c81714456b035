//! Expiry payoff of legs and strategy bundles.
//!
//! Payoffs here are profit and loss at expiry net of premium: a long call
//! bought for p pays max(S − K, 0) − p per unit. All functions are piecewise
//! linear in S with kinks at the option strikes.

use super::bundle::StrategyBundle;
use super::error::InstrumentError;
use super::leg::{LegKind, OptionLeg};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fractional margin added around the reference prices by [`suggest_bounds`].
pub const BOUND_MARGIN: f64 = 0.5;

/// Terminal slopes smaller than this are treated as flat.
const SLOPE_TOLERANCE: f64 = 1e-12;

/// Strikes closer than this are one breakpoint.
const STRIKE_TOLERANCE: f64 = 1e-12;

/// Profit and loss of one leg at terminal price `spot`.
///
/// intrinsic = max(S − K, 0) for calls, max(K − S, 0) for puts, S for stock;
/// payoff = qty · (intrinsic − premium) long, qty · (premium − intrinsic)
/// short.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{leg_payoff_at, OptionLeg, Side};
///
/// let long_call = OptionLeg::call(Side::Long, 100.0, 5.0).unwrap();
/// assert_eq!(leg_payoff_at(110.0, &long_call), 5.0);
/// assert_eq!(leg_payoff_at(90.0, &long_call), -5.0);
///
/// let short_stock = OptionLeg::stock(Side::Short, 50.0).unwrap();
/// assert_eq!(leg_payoff_at(45.0, &short_stock), 5.0);
/// ```
#[inline]
pub fn leg_payoff_at(spot: f64, leg: &OptionLeg) -> f64 {
    let intrinsic = match leg.kind() {
        LegKind::Call { strike } => (spot - strike).max(0.0),
        LegKind::Put { strike } => (strike - spot).max(0.0),
        LegKind::Stock => spot,
    };
    leg.signed_quantity() * (intrinsic - leg.premium())
}

/// Total profit and loss of the bundle at terminal price `spot`.
#[inline]
pub fn payoff_at(spot: f64, bundle: &StrategyBundle) -> f64 {
    bundle.iter().map(|leg| leg_payoff_at(spot, leg)).sum()
}

/// Sorted unique option strikes.
pub fn breakpoints(bundle: &StrategyBundle) -> Vec<f64> {
    let mut strikes = bundle.strikes();
    strikes.dedup_by(|a, b| (*a - *b).abs() <= STRIKE_TOLERANCE);
    strikes
}

/// Price interval covering every strike, stock basis and the spot with a
/// [`BOUND_MARGIN`] margin on either side.
///
/// Falls back to `(0, 1)` when there is no reference price at all.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{suggest_bounds, OptionLeg, Side, StrategyBundle};
///
/// let bundle = StrategyBundle::new(vec![
///     OptionLeg::call(Side::Long, 100.0, 5.0).unwrap(),
///     OptionLeg::call(Side::Short, 120.0, 1.0).unwrap(),
/// ]);
/// let (lo, hi) = suggest_bounds(&bundle, Some(90.0));
/// assert!(lo < 90.0 && hi > 120.0);
/// ```
pub fn suggest_bounds(bundle: &StrategyBundle, spot: Option<f64>) -> (f64, f64) {
    let references = bundle
        .iter()
        .map(|leg| leg.strike().unwrap_or_else(|| leg.premium()))
        .chain(spot)
        .filter(|x| x.is_finite() && *x > 0.0);

    let (min, max) = references.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
        (lo.min(x), hi.max(x))
    });

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    (min * (1.0 - BOUND_MARGIN), max * (1.0 + BOUND_MARGIN))
}

/// One sample of a payoff diagram.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PayoffPoint {
    /// Terminal price
    pub spot: f64,
    /// Bundle profit and loss
    pub total: f64,
    /// Per-leg profit and loss, in bundle order
    pub legs: Vec<f64>,
}

/// Samples the payoff on `samples` evenly spaced prices over `[lo, hi]`.
///
/// # Errors
/// `InstrumentError::InvalidParameter` if fewer than two samples are
/// requested or the range is empty or non-finite.
pub fn payoff_curve(
    bundle: &StrategyBundle,
    lo: f64,
    hi: f64,
    samples: usize,
) -> Result<Vec<PayoffPoint>, InstrumentError> {
    if samples < 2 {
        return Err(InstrumentError::InvalidParameter {
            message: format!("payoff curve needs at least 2 samples, got {}", samples),
        });
    }
    if !lo.is_finite() || !hi.is_finite() || lo >= hi {
        return Err(InstrumentError::InvalidParameter {
            message: format!("invalid payoff range [{}, {}]", lo, hi),
        });
    }

    let step = (hi - lo) / (samples - 1) as f64;
    let points = (0..samples)
        .map(|i| {
            let spot = if i == samples - 1 { hi } else { lo + step * i as f64 };
            let legs: Vec<f64> = bundle.iter().map(|leg| leg_payoff_at(spot, leg)).collect();
            PayoffPoint {
                spot,
                total: legs.iter().sum(),
                legs,
            }
        })
        .collect();
    Ok(points)
}

/// Best and worst outcome at expiry over S ∈ [0, ∞).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PayoffExtremes {
    /// Largest payoff; `None` when unlimited
    pub max_profit: Option<f64>,
    /// Smallest (signed) payoff; `None` when unlimited
    pub max_loss: Option<f64>,
    /// dPayoff/dS beyond the highest strike
    pub terminal_slope: f64,
}

/// Exact payoff extremes from the piecewise-linear structure.
///
/// The payoff is linear between strikes, so the extremes over a bounded
/// range sit at S = 0 or at a strike. Above the highest strike the slope
/// decides whether the payoff grows without bound.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{payoff_extremes, OptionLeg, Side, StrategyBundle};
///
/// let long_call = StrategyBundle::new(vec![OptionLeg::call(Side::Long, 100.0, 5.0).unwrap()]);
/// let extremes = payoff_extremes(&long_call);
/// assert_eq!(extremes.max_profit, None);
/// assert_eq!(extremes.max_loss, Some(-5.0));
/// ```
pub fn payoff_extremes(bundle: &StrategyBundle) -> PayoffExtremes {
    let terminal_slope = terminal_slope(bundle);

    let (lowest, highest) = std::iter::once(0.0)
        .chain(breakpoints(bundle))
        .map(|s| payoff_at(s, bundle))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    PayoffExtremes {
        max_profit: (terminal_slope <= SLOPE_TOLERANCE).then_some(highest),
        max_loss: (terminal_slope >= -SLOPE_TOLERANCE).then_some(lowest),
        terminal_slope,
    }
}

/// Slope of the payoff above every strike: calls and stock contribute ±qty.
fn terminal_slope(bundle: &StrategyBundle) -> f64 {
    bundle
        .iter()
        .map(|leg| match leg.kind() {
            LegKind::Call { .. } | LegKind::Stock => leg.signed_quantity(),
            LegKind::Put { .. } => 0.0,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::Side;
    use approx::assert_relative_eq;

    fn bull_call_spread() -> StrategyBundle {
        StrategyBundle::new(vec![
            OptionLeg::call(Side::Long, 100.0, 5.0).unwrap(),
            OptionLeg::call(Side::Short, 110.0, 2.0).unwrap(),
        ])
    }

    #[test]
    fn test_leg_payoffs() {
        let short_put = OptionLeg::put(Side::Short, 100.0, 3.0)
            .unwrap()
            .with_quantity(2.0)
            .unwrap();
        assert_eq!(leg_payoff_at(120.0, &short_put), 6.0);
        assert_eq!(leg_payoff_at(90.0, &short_put), -14.0);

        let long_stock = OptionLeg::stock(Side::Long, 50.0).unwrap();
        assert_eq!(leg_payoff_at(55.0, &long_stock), 5.0);
    }

    #[test]
    fn test_bundle_payoff() {
        let bundle = bull_call_spread();
        assert_eq!(payoff_at(90.0, &bundle), -3.0);
        assert_eq!(payoff_at(103.0, &bundle), 0.0);
        assert_eq!(payoff_at(130.0, &bundle), 7.0);
    }

    #[test]
    fn test_breakpoints_dedup() {
        let straddle = StrategyBundle::new(vec![
            OptionLeg::call(Side::Short, 100.0, 4.0).unwrap(),
            OptionLeg::put(Side::Short, 100.0, 3.0).unwrap(),
            OptionLeg::call(Side::Long, 90.0, 12.0).unwrap(),
        ]);
        assert_eq!(breakpoints(&straddle), vec![90.0, 100.0]);
    }

    #[test]
    fn test_suggest_bounds_margin() {
        let (lo, hi) = suggest_bounds(&bull_call_spread(), Some(105.0));
        assert_relative_eq!(lo, 50.0, epsilon = 1e-12);
        assert_relative_eq!(hi, 165.0, epsilon = 1e-12);

        let (lo, hi) = suggest_bounds(&bull_call_spread(), Some(200.0));
        assert_relative_eq!(lo, 50.0, epsilon = 1e-12);
        assert_relative_eq!(hi, 300.0, epsilon = 1e-12);
    }

    #[test]
    fn test_suggest_bounds_without_references() {
        assert_eq!(suggest_bounds(&StrategyBundle::default(), None), (0.0, 1.0));
    }

    #[test]
    fn test_payoff_curve() {
        let curve = payoff_curve(&bull_call_spread(), 90.0, 120.0, 4).unwrap();
        assert_eq!(curve.len(), 4);
        assert_eq!(curve[0].spot, 90.0);
        assert_eq!(curve[3].spot, 120.0);
        assert_eq!(curve[1].legs, vec![-5.0, 2.0]);
        assert_eq!(curve[3].total, 7.0);
    }

    #[test]
    fn test_payoff_curve_rejects_bad_ranges() {
        let bundle = bull_call_spread();
        assert!(payoff_curve(&bundle, 90.0, 120.0, 1).is_err());
        assert!(payoff_curve(&bundle, 120.0, 90.0, 10).is_err());
        assert!(payoff_curve(&bundle, f64::NAN, 90.0, 10).is_err());
    }

    #[test]
    fn test_extremes_bounded_spread() {
        let extremes = payoff_extremes(&bull_call_spread());
        assert_eq!(extremes.max_profit, Some(7.0));
        assert_eq!(extremes.max_loss, Some(-3.0));
        assert_eq!(extremes.terminal_slope, 0.0);
    }

    #[test]
    fn test_extremes_unlimited_loss() {
        let short_call = StrategyBundle::new(vec![OptionLeg::call(Side::Short, 100.0, 4.0).unwrap()]);
        let extremes = payoff_extremes(&short_call);
        assert_eq!(extremes.max_profit, Some(4.0));
        assert_eq!(extremes.max_loss, None);
    }

    #[test]
    fn test_extremes_long_put_bounded_at_zero() {
        let long_put = StrategyBundle::new(vec![OptionLeg::put(Side::Long, 100.0, 6.0).unwrap()]);
        let extremes = payoff_extremes(&long_put);
        assert_eq!(extremes.max_profit, Some(94.0));
        assert_eq!(extremes.max_loss, Some(-6.0));
    }

    #[test]
    fn test_mirrored_negates_payoff() {
        let bundle = bull_call_spread();
        let mirror = bundle.mirrored();
        for s in [80.0, 100.0, 104.5, 115.0] {
            assert_eq!(payoff_at(s, &mirror), -payoff_at(s, &bundle));
        }
    }
}
