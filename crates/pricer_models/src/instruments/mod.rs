//! Strategy instruments and expiry payoffs.
//!
//! # Types
//!
//! - [`OptionLeg`]: one call, put or stock position with side, premium and
//!   quantity
//! - [`StrategyBundle`]: an ordered collection of legs
//! - [`MarketContext`]: spot, volatility, tenor, rates and [`DriftMode`]
//!
//! # Payoff Engine
//!
//! [`leg_payoff_at`], [`payoff_at`], [`breakpoints`], [`suggest_bounds`],
//! [`payoff_curve`] and [`payoff_extremes`] evaluate the piecewise-linear
//! profit and loss at expiry.
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{payoff_at, OptionLeg, Side, StrategyBundle};
//!
//! let straddle = StrategyBundle::new(vec![
//!     OptionLeg::call(Side::Short, 100.0, 4.0).unwrap(),
//!     OptionLeg::put(Side::Short, 100.0, 3.0).unwrap(),
//! ]);
//! assert_eq!(payoff_at(100.0, &straddle), 7.0);
//! assert_eq!(payoff_at(93.0, &straddle), 0.0);
//! ```

mod bundle;
mod error;
mod leg;
mod market;
mod payoff;

pub use bundle::StrategyBundle;
pub use error::InstrumentError;
pub use leg::{LegKind, OptionLeg, Side};
pub use market::{DriftMode, MarketContext};
pub use payoff::{
    breakpoints, leg_payoff_at, payoff_at, payoff_curve, payoff_extremes, suggest_bounds,
    PayoffExtremes, PayoffPoint, BOUND_MARGIN,
};
