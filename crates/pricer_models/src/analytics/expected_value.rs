//! Expected-value statistics of a single option leg held to expiry.
//!
//! The terminal price is lognormal with drift μ:
//! S_T = S₀·exp((μ − σ²/2)T + σ√T·Z). With F = S₀e^(μT) and v = σ√T the
//! truncated moments above a threshold a are
//!
//! - P(S_T > a) = N(d₂)
//! - E[S_T·1{S_T > a}] = F·N(d₁)
//! - E[S_T²·1{S_T > a}] = F²·e^(v²)·N(d₁ + v)
//!
//! with d₁ = (ln(S₀/a) + (μ + σ²/2)T)/v and d₂ = d₁ − v. Lower tails use the
//! mirrored arguments.
//!
//! Everything is computed for the long side. The short side follows from
//! gain_short = loss_long, loss_short = gain_long and
//! profit_short = −profit_long, so no quantity is defined in terms of
//! another side's quantity recursively.

use crate::analytical::{d1_with_drift, norm_cdf, AnalyticalError, OptionType};
use crate::instruments::Side;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest reported put break-even.
pub const BREAK_EVEN_FLOOR: f64 = 1e-9;

/// σ√T below this is treated as a deterministic terminal price.
const MIN_TOTAL_VOL: f64 = 1e-12;

/// Break-even terminal price of one long or short unit.
///
/// Call: K + p. Put: max(ε, K − p), where ε = [`BREAK_EVEN_FLOOR`] keeps
/// the value positive when the premium exceeds the strike.
///
/// # Examples
/// ```
/// use pricer_models::analytical::OptionType;
/// use pricer_models::analytics::break_even;
///
/// assert_eq!(break_even(OptionType::Call, 100.0, 5.0).unwrap(), 105.0);
/// assert_eq!(break_even(OptionType::Put, 100.0, 5.0).unwrap(), 95.0);
/// assert_eq!(break_even(OptionType::Put, 3.0, 5.0).unwrap(), 1e-9);
/// ```
pub fn break_even(option_type: OptionType, strike: f64, premium: f64) -> Result<f64, AnalyticalError> {
    validate_contract(strike, premium)?;
    Ok(match option_type {
        OptionType::Call => strike + premium,
        OptionType::Put => (strike - premium).max(BREAK_EVEN_FLOOR),
    })
}

fn validate_contract(strike: f64, premium: f64) -> Result<(), AnalyticalError> {
    AnalyticalError::ensure_finite("strike", strike)?;
    AnalyticalError::ensure_finite("premium", premium)?;
    if strike <= 0.0 {
        return Err(AnalyticalError::InvalidStrike { strike });
    }
    if premium < 0.0 {
        return Err(AnalyticalError::InvalidPrice { price: premium });
    }
    Ok(())
}

/// One option leg under a real-world lognormal terminal distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpectedValueInput {
    /// Call or put
    pub option_type: OptionType,
    /// Long or short
    pub side: Side,
    /// Strike K
    pub strike: f64,
    /// Premium paid (long) or received (short) per unit
    pub premium: f64,
    /// Spot S₀
    pub spot: f64,
    /// Annualised volatility σ
    pub volatility: f64,
    /// Time to expiry T in years
    pub expiry: f64,
    /// Annual drift μ of the terminal distribution
    pub drift: f64,
}

impl ExpectedValueInput {
    fn validate(&self) -> Result<(), AnalyticalError> {
        validate_contract(self.strike, self.premium)?;
        AnalyticalError::ensure_finite("spot", self.spot)?;
        AnalyticalError::ensure_finite("volatility", self.volatility)?;
        AnalyticalError::ensure_finite("expiry", self.expiry)?;
        AnalyticalError::ensure_finite("drift", self.drift)?;
        if self.spot <= 0.0 {
            return Err(AnalyticalError::InvalidSpot { spot: self.spot });
        }
        if self.volatility < 0.0 {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: self.volatility,
            });
        }
        if self.expiry < 0.0 {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: self.expiry,
            });
        }
        Ok(())
    }

    fn terminal(&self) -> Terminal {
        Terminal {
            spot: self.spot,
            drift: self.drift,
            volatility: self.volatility,
            expiry: self.expiry,
        }
    }

    fn break_even(&self) -> f64 {
        match self.option_type {
            OptionType::Call => self.strike + self.premium,
            OptionType::Put => (self.strike - self.premium).max(BREAK_EVEN_FLOOR),
        }
    }
}

/// Full set of statistics for one leg.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExpectedValueResult {
    /// Terminal price where profit crosses zero
    pub break_even: f64,
    /// P(profit > 0)
    pub prob_of_profit: f64,
    /// E[intrinsic value at expiry]
    pub expected_payoff: f64,
    /// E[profit], signed
    pub expected_profit: f64,
    /// E[max(profit, 0)]
    pub expected_gain: f64,
    /// E[max(−profit, 0)]
    pub expected_loss: f64,
    /// Var[intrinsic value at expiry]
    pub variance_payoff: f64,
    /// √variance_payoff
    pub stdev_payoff: f64,
    /// expected_profit / stdev_payoff; `None` when the payoff is certain
    pub sharpe: Option<f64>,
}

/// Lognormal terminal price.
#[derive(Debug, Clone, Copy)]
struct Terminal {
    spot: f64,
    drift: f64,
    volatility: f64,
    expiry: f64,
}

impl Terminal {
    fn forward(&self) -> f64 {
        self.spot * (self.drift * self.expiry).exp()
    }

    fn total_vol(&self) -> f64 {
        self.volatility * self.expiry.sqrt()
    }

    fn is_degenerate(&self) -> bool {
        self.total_vol() < MIN_TOTAL_VOL
    }

    fn d1(&self, threshold: f64) -> f64 {
        d1_with_drift(self.spot, threshold, self.drift, self.volatility, self.expiry)
    }

    /// (P, E[S·1], E[S²·1]) over S_T > a (`upper`) or S_T < a.
    fn tail(&self, threshold: f64, upper: bool) -> (f64, f64, f64) {
        let forward = self.forward();
        if self.is_degenerate() {
            let hit = if upper {
                forward > threshold
            } else {
                forward < threshold
            };
            return if hit {
                (1.0, forward, forward * forward)
            } else {
                (0.0, 0.0, 0.0)
            };
        }

        let v = self.total_vol();
        let d1 = self.d1(threshold);
        let d2 = d1 - v;
        let sign = if upper { 1.0 } else { -1.0 };
        let second = forward * forward * (v * v).exp();
        (
            norm_cdf(sign * d2),
            forward * norm_cdf(sign * d1),
            second * norm_cdf(sign * (d1 + v)),
        )
    }

    /// (E[X], E[X²]) for X = (S_T − a)⁺ (call) or (a − S_T)⁺ (put).
    fn payoff_moments(&self, option_type: OptionType, threshold: f64) -> (f64, f64) {
        if option_type == OptionType::Put && threshold <= 0.0 {
            return (0.0, 0.0);
        }

        let a = threshold;
        match option_type {
            OptionType::Call => {
                let (prob, first, second) = self.tail(a, true);
                let mean = first - a * prob;
                (mean.max(0.0), (second - 2.0 * a * first + a * a * prob).max(0.0))
            }
            OptionType::Put => {
                let (prob, first, second) = self.tail(a, false);
                let mean = a * prob - first;
                (mean.max(0.0), (a * a * prob - 2.0 * a * first + second).max(0.0))
            }
        }
    }

    /// P(S_T < a).
    fn prob_below(&self, threshold: f64) -> f64 {
        if self.is_degenerate() {
            return if self.forward() < threshold { 1.0 } else { 0.0 };
        }
        let v = self.total_vol();
        let z = ((threshold / self.spot).ln()
            - (self.drift - 0.5 * self.volatility * self.volatility) * self.expiry)
            / v;
        norm_cdf(z)
    }
}

/// (gain, loss, profit) for the long side.
fn long_statistics(input: &ExpectedValueInput) -> (f64, f64, f64) {
    let terminal = input.terminal();
    let (payoff, _) = terminal.payoff_moments(input.option_type, input.strike);
    let profit = payoff - input.premium;

    let threshold = match input.option_type {
        OptionType::Call => input.strike + input.premium,
        OptionType::Put => input.strike - input.premium,
    };
    // Zero for a put whose premium is at least its strike.
    let (raw_gain, _) = terminal.payoff_moments(input.option_type, threshold);

    // E[X⁺] ≥ max(E[X], 0); enforcing it keeps the loss non-negative.
    let gain = raw_gain.max(0.0).max(profit);
    (gain, gain - profit, profit)
}

/// (gain, loss, profit) for the input's side.
fn side_statistics(input: &ExpectedValueInput) -> Result<(f64, f64, f64), AnalyticalError> {
    input.validate()?;
    let (gain, loss, profit) = long_statistics(input);
    Ok(match input.side {
        Side::Long => (gain, loss, profit),
        Side::Short => (loss, gain, -profit),
    })
}

/// E[intrinsic value at expiry] of one unit, irrespective of side.
pub fn expected_payoff(input: &ExpectedValueInput) -> Result<f64, AnalyticalError> {
    input.validate()?;
    Ok(input
        .terminal()
        .payoff_moments(input.option_type, input.strike)
        .0)
}

/// E[profit]: payoff − premium long, premium − payoff short.
pub fn expected_profit(input: &ExpectedValueInput) -> Result<f64, AnalyticalError> {
    side_statistics(input).map(|(_, _, profit)| profit)
}

/// E[max(profit, 0)].
pub fn expected_gain(input: &ExpectedValueInput) -> Result<f64, AnalyticalError> {
    side_statistics(input).map(|(gain, _, _)| gain)
}

/// E[max(−profit, 0)].
pub fn expected_loss(input: &ExpectedValueInput) -> Result<f64, AnalyticalError> {
    side_statistics(input).map(|(_, loss, _)| loss)
}

/// Variance of the intrinsic value at expiry, clamped at zero.
///
/// Identical for long and short since the premium is a constant.
pub fn variance_payoff(input: &ExpectedValueInput) -> Result<f64, AnalyticalError> {
    input.validate()?;
    let (mean, second) = input
        .terminal()
        .payoff_moments(input.option_type, input.strike);
    Ok((second - mean * mean).max(0.0))
}

/// √[`variance_payoff`].
pub fn stdev_payoff(input: &ExpectedValueInput) -> Result<f64, AnalyticalError> {
    variance_payoff(input).map(f64::sqrt)
}

/// Expected profit per unit of payoff standard deviation.
///
/// `Ok(None)` when the standard deviation is zero.
pub fn sharpe(input: &ExpectedValueInput) -> Result<Option<f64>, AnalyticalError> {
    let stdev = stdev_payoff(input)?;
    let profit = expected_profit(input)?;
    Ok((stdev > 0.0).then(|| profit / stdev))
}

/// Probability that the position finishes profitable.
///
/// Long calls and short puts profit above the break-even, long puts and
/// short calls below it.
pub fn prob_of_profit(input: &ExpectedValueInput) -> Result<f64, AnalyticalError> {
    input.validate()?;
    let below = input.terminal().prob_below(input.break_even());
    let profits_above = matches!(
        (input.option_type, input.side),
        (OptionType::Call, Side::Long) | (OptionType::Put, Side::Short)
    );
    Ok(if profits_above { 1.0 - below } else { below })
}

/// P(S_T < threshold) for a lognormal terminal price; zero for a
/// non-positive threshold.
pub(crate) fn lognormal_prob_below(
    spot: f64,
    drift: f64,
    volatility: f64,
    expiry: f64,
    threshold: f64,
) -> f64 {
    if threshold <= 0.0 {
        return 0.0;
    }
    if threshold == f64::INFINITY {
        return 1.0;
    }
    Terminal {
        spot,
        drift,
        volatility,
        expiry,
    }
    .prob_below(threshold)
}

/// Every statistic at once.
///
/// # Examples
/// ```
/// use pricer_models::analytical::OptionType;
/// use pricer_models::analytics::{expected_value, ExpectedValueInput};
/// use pricer_models::instruments::Side;
///
/// let input = ExpectedValueInput {
///     option_type: OptionType::Call,
///     side: Side::Long,
///     strike: 100.0,
///     premium: 8.0,
///     spot: 100.0,
///     volatility: 0.2,
///     expiry: 1.0,
///     drift: 0.05,
/// };
/// let ev = expected_value(&input).unwrap();
/// assert_eq!(ev.break_even, 108.0);
/// assert!((ev.expected_profit - (ev.expected_gain - ev.expected_loss)).abs() < 1e-9);
/// assert!(ev.prob_of_profit > 0.0 && ev.prob_of_profit < 1.0);
/// ```
pub fn expected_value(input: &ExpectedValueInput) -> Result<ExpectedValueResult, AnalyticalError> {
    let (expected_gain, expected_loss, expected_profit) = side_statistics(input)?;
    let terminal = input.terminal();
    let (expected_payoff, second) = terminal.payoff_moments(input.option_type, input.strike);
    let variance_payoff = (second - expected_payoff * expected_payoff).max(0.0);
    let stdev_payoff = variance_payoff.sqrt();

    Ok(ExpectedValueResult {
        break_even: input.break_even(),
        prob_of_profit: prob_of_profit(input)?,
        expected_payoff,
        expected_profit,
        expected_gain,
        expected_loss,
        variance_payoff,
        stdev_payoff,
        sharpe: (stdev_payoff > 0.0).then(|| expected_profit / stdev_payoff),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::BlackScholes;
    use approx::assert_relative_eq;

    fn input(option_type: OptionType, side: Side, strike: f64, premium: f64) -> ExpectedValueInput {
        ExpectedValueInput {
            option_type,
            side,
            strike,
            premium,
            spot: 100.0,
            volatility: 0.25,
            expiry: 0.5,
            drift: 0.07,
        }
    }

    #[test]
    fn test_break_even_values() {
        assert_eq!(break_even(OptionType::Call, 100.0, 5.0).unwrap(), 105.0);
        assert_eq!(break_even(OptionType::Put, 100.0, 5.0).unwrap(), 95.0);
        assert_eq!(break_even(OptionType::Put, 3.0, 5.0).unwrap(), BREAK_EVEN_FLOOR);
        assert!(break_even(OptionType::Put, -3.0, 5.0).is_err());
        assert!(break_even(OptionType::Call, 100.0, -1.0).is_err());
    }

    #[test]
    fn test_expected_payoff_matches_undiscounted_bsm() {
        // With μ = r − q the expected payoff is the forward BSM price.
        let bs = BlackScholes::new(100.0, 0.05, 0.01, 0.3).unwrap();
        for option_type in [OptionType::Call, OptionType::Put] {
            let ev = ExpectedValueInput {
                option_type,
                side: Side::Long,
                strike: 105.0,
                premium: 0.0,
                spot: 100.0,
                volatility: 0.3,
                expiry: 1.0,
                drift: 0.04,
            };
            let discounted = bs.price(option_type, 105.0, 1.0).unwrap();
            assert_relative_eq!(
                expected_payoff(&ev).unwrap(),
                discounted * 0.05_f64.exp(),
                max_relative = 1e-10
            );
        }
    }

    #[test]
    fn test_identity_and_symmetry() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let long = input(option_type, Side::Long, 100.0, 6.0);
            let short = ExpectedValueInput {
                side: Side::Short,
                ..long
            };
            let l = expected_value(&long).unwrap();
            let s = expected_value(&short).unwrap();

            assert_relative_eq!(l.expected_profit, l.expected_gain - l.expected_loss, epsilon = 1e-9);
            assert_relative_eq!(s.expected_profit, s.expected_gain - s.expected_loss, epsilon = 1e-9);
            assert_eq!(s.expected_gain, l.expected_loss);
            assert_eq!(s.expected_loss, l.expected_gain);
            assert_eq!(s.expected_profit, -l.expected_profit);
            assert!(l.expected_gain >= 0.0 && l.expected_loss >= 0.0);
        }
    }

    #[test]
    fn test_gain_matches_truncated_expectation() {
        // Long call: E[(S_T − K − p)⁺] is the undiscounted call with strike K + p
        let ev = input(OptionType::Call, Side::Long, 100.0, 6.0);
        let bs = BlackScholes::new(100.0, 0.07, 0.0, 0.25).unwrap();
        let shifted = bs.price_call(106.0, 0.5).unwrap() * (0.07_f64 * 0.5).exp();
        assert_relative_eq!(expected_gain(&ev).unwrap(), shifted, max_relative = 1e-10);
    }

    #[test]
    fn test_put_gain_zero_when_premium_exceeds_strike() {
        let ev = input(OptionType::Put, Side::Long, 3.0, 5.0);
        assert_eq!(expected_gain(&ev).unwrap(), 0.0);
        assert!(expected_loss(&ev).unwrap() > 0.0);
    }

    #[test]
    fn test_variance_and_stdev() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let ev = input(option_type, Side::Long, 95.0, 4.0);
            let var = variance_payoff(&ev).unwrap();
            assert!(var > 0.0);
            assert_relative_eq!(stdev_payoff(&ev).unwrap(), var.sqrt(), epsilon = 1e-15);
        }
    }

    #[test]
    fn test_variance_deep_otm_never_negative() {
        let ev = input(OptionType::Call, Side::Long, 1000.0, 0.0);
        assert!(variance_payoff(&ev).unwrap() >= 0.0);
    }

    #[test]
    fn test_prob_of_profit_sides_complement() {
        for option_type in [OptionType::Call, OptionType::Put] {
            let long = input(option_type, Side::Long, 100.0, 5.0);
            let short = ExpectedValueInput {
                side: Side::Short,
                ..long
            };
            let p_long = prob_of_profit(&long).unwrap();
            let p_short = prob_of_profit(&short).unwrap();
            assert!((0.0..=1.0).contains(&p_long));
            assert_relative_eq!(p_long + p_short, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_prob_of_profit_zero_drift_reference() {
        // μ = σ²/2 puts the median at S₀, so a zero-premium ATM call profits
        // half the time.
        let ev = ExpectedValueInput {
            option_type: OptionType::Call,
            side: Side::Long,
            strike: 100.0,
            premium: 0.0,
            spot: 100.0,
            volatility: 0.2,
            expiry: 1.0,
            drift: 0.02,
        };
        assert_relative_eq!(prob_of_profit(&ev).unwrap(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_degenerate_terminal_price() {
        let ev = ExpectedValueInput {
            option_type: OptionType::Call,
            side: Side::Long,
            strike: 100.0,
            premium: 2.0,
            spot: 110.0,
            volatility: 0.0,
            expiry: 1.0,
            drift: 0.0,
        };
        let result = expected_value(&ev).unwrap();
        assert_eq!(result.expected_payoff, 10.0);
        assert_eq!(result.expected_profit, 8.0);
        assert_eq!(result.expected_gain, 8.0);
        assert_eq!(result.expected_loss, 0.0);
        assert_eq!(result.variance_payoff, 0.0);
        assert_eq!(result.sharpe, None);
        assert_eq!(result.prob_of_profit, 1.0);
    }

    #[test]
    fn test_sharpe_sign_follows_profit() {
        let ev = input(OptionType::Call, Side::Long, 100.0, 50.0);
        assert!(sharpe(&ev).unwrap().unwrap() < 0.0);
        let short = ExpectedValueInput {
            side: Side::Short,
            ..ev
        };
        assert!(sharpe(&short).unwrap().unwrap() > 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut ev = input(OptionType::Call, Side::Long, 100.0, 5.0);
        ev.spot = 0.0;
        assert!(matches!(
            expected_profit(&ev),
            Err(AnalyticalError::InvalidSpot { .. })
        ));

        let mut ev = input(OptionType::Call, Side::Long, 100.0, 5.0);
        ev.volatility = -0.1;
        assert!(matches!(
            expected_value(&ev),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));

        let mut ev = input(OptionType::Call, Side::Long, 100.0, 5.0);
        ev.drift = f64::NAN;
        assert!(prob_of_profit(&ev).is_err());
    }
}
