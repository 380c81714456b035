//! Break-even prices of a strategy at expiry.
//!
//! Resolution order:
//! 1. explicit strategy name → closed form
//! 2. inferred strategy → closed form
//! 3. numeric scan of the payoff over [`suggest_bounds`], widened up to
//!    twice when nothing is found or the payoff still crosses zero outside
//!    the scanned range
//!
//! Closed forms apply only when every leg carries the same quantity, the
//! legs match the key's shape and each root really zeroes the payoff;
//! anything else goes to the numeric path. Both paths drop non-positive
//! roots, and an empty root set is reported as `None` (no break-even), which
//! is distinct from an error.

use pricer_core::math::solvers::{BisectionSolver, SolverConfig};

use super::classifier::{classify, STRIKE_TOLERANCE};
use super::key::{Provenance, StrategyKey, StrategyLabel};
use crate::analytical::OptionType;
use crate::instruments::{payoff_at, suggest_bounds, OptionLeg, Side, StrategyBundle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunables for the numeric break-even search.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BreakEvenConfig {
    /// Number of payoff samples per scan (at least 2).
    pub samples: usize,
    /// Successive widenings, as fractions of the initial bound width.
    pub widen_factors: Vec<f64>,
    /// Bisection tolerance used to polish each crossing.
    pub tolerance: f64,
    /// Bisection iteration budget per crossing.
    pub max_polish_iterations: usize,
}

impl Default for BreakEvenConfig {
    fn default() -> Self {
        Self {
            samples: 2001,
            widen_factors: vec![0.5, 1.0],
            tolerance: 1e-10,
            max_polish_iterations: 200,
        }
    }
}

/// Which path produced the roots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BreakEvenMethod {
    /// Formula keyed by the strategy
    ClosedForm,
    /// Sampled payoff scan with bisection polishing
    Numeric,
}

impl std::fmt::Display for BreakEvenMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BreakEvenMethod::ClosedForm => write!(f, "closed_form"),
            BreakEvenMethod::Numeric => write!(f, "numeric"),
        }
    }
}

/// How a break-even result was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BreakEvenMeta {
    /// Strategy key in effect, if any
    pub used: Option<StrategyKey>,
    /// How the key was obtained
    pub resolved_by: Option<Provenance>,
    /// Closed form or numeric
    pub method: BreakEvenMethod,
}

/// Break-even prices with provenance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BreakEvenResult {
    /// Sorted positive roots; `None` when the payoff never crosses zero
    pub be: Option<Vec<f64>>,
    /// Resolution metadata
    pub meta: BreakEvenMeta,
}

/// Break-even solver.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionLeg, Side, StrategyBundle};
/// use pricer_models::strategy::{BreakEvenMethod, BreakEvenSolver, StrategyKey};
///
/// let bundle = StrategyBundle::new(vec![
///     OptionLeg::call(Side::Long, 100.0, 5.0).unwrap(),
///     OptionLeg::call(Side::Short, 110.0, 2.0).unwrap(),
/// ]);
/// let result = BreakEvenSolver::default().solve(&bundle, None, None);
///
/// assert_eq!(result.be, Some(vec![103.0]));
/// assert_eq!(result.meta.used, Some(StrategyKey::BullCallSpread));
/// assert_eq!(result.meta.method, BreakEvenMethod::ClosedForm);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BreakEvenSolver {
    config: BreakEvenConfig,
}

impl BreakEvenSolver {
    /// Creates a solver with the given tunables.
    pub fn new(config: BreakEvenConfig) -> Self {
        Self { config }
    }

    /// Returns the solver tunables.
    pub fn config(&self) -> &BreakEvenConfig {
        &self.config
    }

    /// Break-even prices of `bundle`.
    ///
    /// `explicit` is a free-form strategy name; `spot` widens the numeric
    /// search range to include the current price.
    pub fn solve(
        &self,
        bundle: &StrategyBundle,
        explicit: Option<&str>,
        spot: Option<f64>,
    ) -> BreakEvenResult {
        let label = classify(bundle, explicit);

        if let Some(StrategyLabel { key, provenance }) = label {
            if let Some(roots) = closed_form(key, bundle) {
                tracing::debug!(%key, %provenance, "break-even from closed form");
                return BreakEvenResult {
                    be: finalize(roots),
                    meta: BreakEvenMeta {
                        used: Some(key),
                        resolved_by: Some(provenance),
                        method: BreakEvenMethod::ClosedForm,
                    },
                };
            }
            tracing::debug!(%key, "no closed form for these legs, scanning numerically");
        }

        BreakEvenResult {
            be: self.numeric(bundle, spot),
            meta: BreakEvenMeta {
                used: label.map(|l| l.key),
                resolved_by: label.map(|l| l.provenance),
                method: BreakEvenMethod::Numeric,
            },
        }
    }

    /// Numeric path only, bypassing classification.
    pub fn numeric(&self, bundle: &StrategyBundle, spot: Option<f64>) -> Option<Vec<f64>> {
        if bundle.is_empty() {
            return None;
        }
        let (lo, hi) = suggest_bounds(bundle, spot);
        let width = hi - lo;

        let mut roots = Vec::new();
        for widen in std::iter::once(0.0).chain(self.config.widen_factors.iter().copied()) {
            let lower = (lo - widen * width).max(0.0);
            let upper = hi + widen * width;
            roots = self.scan(bundle, lower, upper);
            if !roots.is_empty() && !crossing_outside(bundle, lower, upper) {
                break;
            }
            tracing::debug!(lower, upper, found = roots.len(), "widening break-even search");
        }
        finalize(roots)
    }

    /// Zero crossings of the payoff over `[lower, upper]`.
    fn scan(&self, bundle: &StrategyBundle, lower: f64, upper: f64) -> Vec<f64> {
        let n = self.config.samples.max(2);
        let step = (upper - lower) / (n - 1) as f64;
        let xs: Vec<f64> = (0..n)
            .map(|i| if i == n - 1 { upper } else { lower + step * i as f64 })
            .collect();
        let ys: Vec<f64> = xs.iter().map(|&x| payoff_at(x, bundle)).collect();

        let bisection = BisectionSolver::new(SolverConfig::new(
            self.config.tolerance.max(f64::EPSILON),
            self.config.max_polish_iterations.max(1),
        ));
        let payoff = |s: f64| payoff_at(s, bundle);

        let mut roots = Vec::new();
        for i in 0..n {
            if ys[i] == 0.0 {
                // Exact zero on the grid; skip flat zero stretches.
                let next_to_nonzero = (i > 0 && ys[i - 1] != 0.0) || (i + 1 < n && ys[i + 1] != 0.0);
                if next_to_nonzero {
                    roots.push(xs[i]);
                }
                continue;
            }
            if i + 1 < n && ys[i + 1] != 0.0 && ys[i].signum() != ys[i + 1].signum() {
                let (x0, x1, y0, y1) = (xs[i], xs[i + 1], ys[i], ys[i + 1]);
                let root = bisection
                    .find_root(payoff, x0, x1)
                    .unwrap_or_else(|_| x0 - y0 * (x1 - x0) / (y1 - y0));
                roots.push(root);
            }
        }
        roots
    }
}

/// Break-even prices with the default configuration.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionLeg, Side, StrategyBundle};
/// use pricer_models::strategy::compute_break_even;
///
/// let bundle = StrategyBundle::new(vec![
///     OptionLeg::call(Side::Short, 100.0, 4.0).unwrap(),
///     OptionLeg::put(Side::Short, 100.0, 3.0).unwrap(),
/// ]);
/// let result = compute_break_even(&bundle, Some("short_straddle"));
/// assert_eq!(result.be, Some(vec![93.0, 107.0]));
/// ```
pub fn compute_break_even(bundle: &StrategyBundle, explicit: Option<&str>) -> BreakEvenResult {
    BreakEvenSolver::default().solve(bundle, explicit, None)
}

/// Whether the payoff, linear outside the scanned range, crosses zero
/// below `lower` or above `upper`.
fn crossing_outside(bundle: &StrategyBundle, lower: f64, upper: f64) -> bool {
    let at_lower = payoff_at(lower, bundle);
    let below = lower > 0.0 && payoff_at(0.0, bundle) * at_lower < 0.0;

    let at_upper = payoff_at(upper, bundle);
    let slope = payoff_at(upper + 1.0, bundle) - at_upper;
    let above = at_upper * slope < 0.0;

    below || above
}

/// Positive, finite, sorted, de-duplicated roots; `None` if nothing is left.
fn finalize(mut roots: Vec<f64>) -> Option<Vec<f64>> {
    roots.retain(|r| r.is_finite() && *r > 0.0);
    roots.sort_by(f64::total_cmp);
    roots.dedup_by(|a, b| (*a - *b).abs() <= 1e-7 * b.abs().max(1.0));
    (!roots.is_empty()).then_some(roots)
}

fn find_leg(bundle: &StrategyBundle, option_type: OptionType, side: Side) -> Option<&OptionLeg> {
    bundle
        .iter()
        .find(|leg| leg.option_type() == Some(option_type) && leg.side() == side)
}

fn strike_of(bundle: &StrategyBundle, option_type: OptionType, side: Side) -> Option<f64> {
    find_leg(bundle, option_type, side).and_then(OptionLeg::strike)
}

/// Closed-form roots for `key`, or `None` when the legs do not fit it or the
/// premiums rule the formula out.
///
/// Every positive root must zero the payoff; a debit wider than a spread or
/// a condor credit wider than its wings leaves the formula pointing at a
/// price where the strategy still loses or still wins, and the numeric path
/// answers instead.
fn closed_form(key: StrategyKey, bundle: &StrategyBundle) -> Option<Vec<f64>> {
    let roots = formula_roots(key, bundle)?;
    let scale: f64 = bundle
        .iter()
        .map(|leg| leg.quantity() * (leg.premium() + leg.strike().unwrap_or(0.0)))
        .sum();
    let tolerance = 1e-9 * scale.max(1.0);
    let exact = roots
        .iter()
        .filter(|r| **r > 0.0)
        .all(|r| payoff_at(*r, bundle).abs() <= tolerance);
    if !exact {
        tracing::debug!(%key, ?roots, "closed form does not zero the payoff");
        return None;
    }
    Some(roots)
}

fn formula_roots(key: StrategyKey, bundle: &StrategyBundle) -> Option<Vec<f64>> {
    use OptionType::{Call, Put};
    use Side::{Long, Short};

    if bundle.has_stock() {
        return None;
    }
    let qty = bundle.uniform_quantity().filter(|q| *q > 0.0)?;
    // Per-unit net premium: positive is a debit, negative a credit.
    let debit = bundle.net_premium() / qty;
    let credit = -debit;

    let legs = bundle.len();
    let shape_is = |count: usize| legs == count;

    let roots = match key {
        StrategyKey::LongCall if shape_is(1) => vec![strike_of(bundle, Call, Long)? + debit],
        StrategyKey::ShortCall if shape_is(1) => vec![strike_of(bundle, Call, Short)? + credit],
        StrategyKey::LongPut if shape_is(1) => vec![strike_of(bundle, Put, Long)? - debit],
        StrategyKey::ShortPut if shape_is(1) => vec![strike_of(bundle, Put, Short)? - credit],
        StrategyKey::BullCallSpread if shape_is(2) => {
            let long = strike_of(bundle, Call, Long)?;
            let short = strike_of(bundle, Call, Short)?;
            if long >= short {
                return None;
            }
            vec![long + debit]
        }
        StrategyKey::BearCallSpread if shape_is(2) => {
            let short = strike_of(bundle, Call, Short)?;
            let long = strike_of(bundle, Call, Long)?;
            if short >= long {
                return None;
            }
            vec![short + credit]
        }
        StrategyKey::BearPutSpread if shape_is(2) => {
            let long = strike_of(bundle, Put, Long)?;
            let short = strike_of(bundle, Put, Short)?;
            if long <= short {
                return None;
            }
            vec![long - debit]
        }
        StrategyKey::BullPutSpread if shape_is(2) => {
            let short = strike_of(bundle, Put, Short)?;
            let long = strike_of(bundle, Put, Long)?;
            if short <= long {
                return None;
            }
            vec![short - credit]
        }
        StrategyKey::ShortStraddle | StrategyKey::ShortStrangle if shape_is(2) => {
            let put = strike_of(bundle, Put, Short)?;
            let call = strike_of(bundle, Call, Short)?;
            if call - put < -STRIKE_TOLERANCE {
                return None;
            }
            vec![put - credit, call + credit]
        }
        StrategyKey::LongStraddle | StrategyKey::LongStrangle if shape_is(2) => {
            let put = strike_of(bundle, Put, Long)?;
            let call = strike_of(bundle, Call, Long)?;
            if call - put < -STRIKE_TOLERANCE {
                return None;
            }
            vec![put - debit, call + debit]
        }
        StrategyKey::IronButterfly | StrategyKey::IronCondor if shape_is(4) => {
            let long_put = strike_of(bundle, Put, Long)?;
            let short_put = strike_of(bundle, Put, Short)?;
            let short_call = strike_of(bundle, Call, Short)?;
            let long_call = strike_of(bundle, Call, Long)?;
            let ordered = long_put < short_put
                && short_put <= short_call + STRIKE_TOLERANCE
                && short_call < long_call;
            if !ordered {
                return None;
            }
            vec![short_put - credit, short_call + credit]
        }
        _ => return None,
    };
    Some(roots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bundle(legs: Vec<OptionLeg>) -> StrategyBundle {
        StrategyBundle::new(legs)
    }

    fn assert_roots(actual: &Option<Vec<f64>>, expected: &[f64]) {
        let roots = actual.as_ref().expect("expected break-even roots");
        assert_eq!(roots.len(), expected.len(), "roots: {:?}", roots);
        for (r, e) in roots.iter().zip(expected) {
            assert_relative_eq!(*r, *e, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_bull_call_spread() {
        let b = bundle(vec![
            OptionLeg::call(Side::Long, 100.0, 5.0).unwrap(),
            OptionLeg::call(Side::Short, 110.0, 2.0).unwrap(),
        ]);
        let result = compute_break_even(&b, Some("bull_call_spread"));
        assert_roots(&result.be, &[103.0]);
        assert_eq!(result.meta.resolved_by, Some(Provenance::Explicit));
    }

    #[test]
    fn test_short_straddle() {
        let b = bundle(vec![
            OptionLeg::call(Side::Short, 100.0, 4.0).unwrap(),
            OptionLeg::put(Side::Short, 100.0, 3.0).unwrap(),
        ]);
        let result = compute_break_even(&b, Some("short_straddle"));
        assert_roots(&result.be, &[93.0, 107.0]);
        assert_eq!(result.meta.method, BreakEvenMethod::ClosedForm);
    }

    #[test]
    fn test_short_straddle_with_mismatched_strikes() {
        let b = bundle(vec![
            OptionLeg::call(Side::Short, 105.0, 4.0).unwrap(),
            OptionLeg::put(Side::Short, 95.0, 3.0).unwrap(),
        ]);
        let result = compute_break_even(&b, Some("short_straddle"));
        assert_roots(&result.be, &[88.0, 112.0]);
        assert_eq!(result.meta.used, Some(StrategyKey::ShortStrangle));
        assert_eq!(result.meta.resolved_by, Some(Provenance::Disambiguated));
    }

    #[test]
    fn test_iron_butterfly() {
        let b = bundle(vec![
            OptionLeg::put(Side::Long, 95.0, 1.2).unwrap(),
            OptionLeg::call(Side::Long, 105.0, 1.1).unwrap(),
            OptionLeg::put(Side::Short, 100.0, 3.2).unwrap(),
            OptionLeg::call(Side::Short, 100.0, 3.3).unwrap(),
        ]);
        let result = compute_break_even(&b, None);
        assert_roots(&result.be, &[95.8, 104.2]);
        assert_eq!(result.meta.used, Some(StrategyKey::IronButterfly));
        assert_eq!(result.meta.resolved_by, Some(Provenance::Inferred));
    }

    #[test]
    fn test_iron_condor_explicit_closed_form() {
        let b = bundle(vec![
            OptionLeg::put(Side::Long, 85.0, 0.5).unwrap(),
            OptionLeg::put(Side::Short, 90.0, 1.5).unwrap(),
            OptionLeg::call(Side::Short, 110.0, 1.4).unwrap(),
            OptionLeg::call(Side::Long, 115.0, 0.4).unwrap(),
        ]);
        let explicit = compute_break_even(&b, Some("Iron Condor"));
        assert_roots(&explicit.be, &[88.0, 112.0]);
        assert_eq!(explicit.meta.method, BreakEvenMethod::ClosedForm);

        // Without a name the condor is scanned numerically
        let inferred = compute_break_even(&b, None);
        assert_roots(&inferred.be, &[88.0, 112.0]);
        assert_eq!(inferred.meta.method, BreakEvenMethod::Numeric);
        assert_eq!(inferred.meta.used, None);
    }

    #[test]
    fn test_single_legs() {
        let cases = [
            (OptionLeg::call(Side::Long, 100.0, 5.0).unwrap(), 105.0),
            (OptionLeg::call(Side::Short, 100.0, 5.0).unwrap(), 105.0),
            (OptionLeg::put(Side::Long, 100.0, 5.0).unwrap(), 95.0),
            (OptionLeg::put(Side::Short, 100.0, 5.0).unwrap(), 95.0),
        ];
        for (leg, expected) in cases {
            let result = compute_break_even(&bundle(vec![leg]), None);
            assert_roots(&result.be, &[expected]);
        }
    }

    #[test]
    fn test_uniform_quantity_scales_premium() {
        let b = bundle(vec![
            OptionLeg::call(Side::Long, 100.0, 5.0)
                .unwrap()
                .with_quantity(3.0)
                .unwrap(),
            OptionLeg::call(Side::Short, 110.0, 2.0)
                .unwrap()
                .with_quantity(3.0)
                .unwrap(),
        ]);
        assert_roots(&compute_break_even(&b, None).be, &[103.0]);
    }

    #[test]
    fn test_put_premium_above_strike_has_no_break_even() {
        let b = bundle(vec![OptionLeg::put(Side::Long, 3.0, 5.0).unwrap()]);
        let result = compute_break_even(&b, None);
        assert_eq!(result.be, None);
        assert_eq!(result.meta.method, BreakEvenMethod::ClosedForm);
    }

    #[test]
    fn test_infeasible_premiums_have_no_break_even() {
        let cases = [
            // Debit 13 on a 10-wide bull call spread
            (
                "bull_call_spread",
                vec![
                    OptionLeg::call(Side::Long, 100.0, 15.0).unwrap(),
                    OptionLeg::call(Side::Short, 110.0, 2.0).unwrap(),
                ],
            ),
            // Bear call spread opened for a debit
            (
                "bear_call_spread",
                vec![
                    OptionLeg::call(Side::Short, 100.0, 2.0).unwrap(),
                    OptionLeg::call(Side::Long, 110.0, 3.0).unwrap(),
                ],
            ),
            // Iron butterfly opened for a net debit of 4
            (
                "iron_butterfly",
                vec![
                    OptionLeg::put(Side::Long, 95.0, 4.0).unwrap(),
                    OptionLeg::put(Side::Short, 100.0, 2.0).unwrap(),
                    OptionLeg::call(Side::Short, 100.0, 2.0).unwrap(),
                    OptionLeg::call(Side::Long, 105.0, 4.0).unwrap(),
                ],
            ),
            // Iron condor credit 6 on 5-wide wings
            (
                "iron_condor",
                vec![
                    OptionLeg::put(Side::Long, 85.0, 0.5).unwrap(),
                    OptionLeg::put(Side::Short, 90.0, 3.5).unwrap(),
                    OptionLeg::call(Side::Short, 110.0, 3.5).unwrap(),
                    OptionLeg::call(Side::Long, 115.0, 0.5).unwrap(),
                ],
            ),
        ];
        for (name, legs) in cases {
            let b = bundle(legs);
            let result = compute_break_even(&b, Some(name));
            assert_eq!(result.be, None, "{}", name);
            assert_eq!(result.meta.method, BreakEvenMethod::Numeric, "{}", name);
            assert_eq!(BreakEvenSolver::default().numeric(&b, None), None, "{}", name);
        }
    }

    #[test]
    fn test_closed_form_roots_zero_the_payoff() {
        let b = bundle(vec![
            OptionLeg::put(Side::Long, 85.0, 0.5).unwrap(),
            OptionLeg::put(Side::Short, 90.0, 2.0).unwrap(),
            OptionLeg::call(Side::Short, 110.0, 2.0).unwrap(),
            OptionLeg::call(Side::Long, 115.0, 0.5).unwrap(),
        ]);
        let result = compute_break_even(&b, Some("iron_condor"));
        assert_eq!(result.meta.method, BreakEvenMethod::ClosedForm);
        assert_roots(&result.be, &[87.0, 113.0]);
        for root in result.be.unwrap_or_default() {
            assert!(payoff_at(root, &b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ratio_spread_goes_numeric() {
        // Long 1×100 call @5, short 2×110 calls @2: payoff 0 at 101 and 119
        let b = bundle(vec![
            OptionLeg::call(Side::Long, 100.0, 5.0).unwrap(),
            OptionLeg::call(Side::Short, 110.0, 2.0)
                .unwrap()
                .with_quantity(2.0)
                .unwrap(),
        ]);
        let result = compute_break_even(&b, Some("bull_call_spread"));
        assert_eq!(result.meta.method, BreakEvenMethod::Numeric);
        assert_eq!(result.meta.used, Some(StrategyKey::BullCallSpread));
        assert_roots(&result.be, &[101.0, 119.0]);
    }

    #[test]
    fn test_explicit_key_with_wrong_legs_goes_numeric() {
        let b = bundle(vec![OptionLeg::put(Side::Long, 100.0, 5.0).unwrap()]);
        let result = compute_break_even(&b, Some("long_call"));
        assert_eq!(result.meta.method, BreakEvenMethod::Numeric);
        assert_roots(&result.be, &[95.0]);
    }

    #[test]
    fn test_numeric_widening() {
        // Root at 40 lies below the initial range [50, 150]
        let b = bundle(vec![OptionLeg::put(Side::Long, 100.0, 60.0).unwrap()]);
        let roots = BreakEvenSolver::default().numeric(&b, None);
        assert_roots(&roots, &[40.0]);
    }

    #[test]
    fn test_no_crossing_is_none() {
        // Box-like position with a constant positive payoff
        let b = bundle(vec![
            OptionLeg::call(Side::Long, 90.0, 0.0).unwrap(),
            OptionLeg::call(Side::Short, 110.0, 0.0).unwrap(),
            OptionLeg::put(Side::Long, 110.0, 0.0).unwrap(),
            OptionLeg::put(Side::Short, 90.0, 0.0).unwrap(),
        ]);
        let result = compute_break_even(&b, None);
        assert_eq!(result.be, None);
        assert_eq!(result.meta.method, BreakEvenMethod::Numeric);
        assert_eq!(compute_break_even(&StrategyBundle::default(), None).be, None);
    }

    #[test]
    fn test_covered_call_numeric() {
        let b = bundle(vec![
            OptionLeg::stock(Side::Long, 100.0).unwrap(),
            OptionLeg::call(Side::Short, 105.0, 3.0).unwrap(),
        ]);
        let result = compute_break_even(&b, None);
        assert_eq!(result.meta.used, Some(StrategyKey::CoveredCall));
        assert_eq!(result.meta.method, BreakEvenMethod::Numeric);
        assert_roots(&result.be, &[97.0]);
    }

    #[test]
    fn test_finalize() {
        assert_eq!(finalize(vec![]), None);
        assert_eq!(finalize(vec![-1.0, 0.0]), None);
        assert_eq!(finalize(vec![5.0, 2.0, 5.0 + 1e-9]), Some(vec![2.0, 5.0]));
    }
}
