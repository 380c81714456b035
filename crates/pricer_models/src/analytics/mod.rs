//! Expected-value, CAPM and strategy-level analytics.
//!
//! - [`expected_value()`]: per-leg statistics under a lognormal terminal price
//!   with drift μ
//! - [`capm_expected_return`] and [`drift_from_mode`]: where an expected
//!   return enters μ
//! - [`value_strategy`], [`strategy_expected_profit`],
//!   [`strategy_prob_of_profit`]: aggregation over a [`StrategyBundle`]
//!
//! [`StrategyBundle`]: crate::instruments::StrategyBundle

mod capm;
mod expected_value;
mod portfolio;

pub use capm::{
    beta_from_corr, beta_from_cov_var, capm_alpha, capm_expected_return, drift_from_mode,
    market_drift, CapmError, CapmInput,
};
pub use expected_value::{
    break_even, expected_gain, expected_loss, expected_payoff, expected_profit, expected_value,
    prob_of_profit, sharpe, stdev_payoff, variance_payoff, ExpectedValueInput,
    ExpectedValueResult, BREAK_EVEN_FLOOR,
};
pub use portfolio::{
    strategy_expected_profit, strategy_prob_of_profit, value_strategy, StrategyValuation,
};
