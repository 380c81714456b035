//! Strategy taxonomy, classification and break-even analysis.
//!
//! ## Components
//!
//! - [`StrategyKey`]: closed set of canonical strategy names
//! - [`normalize_strategy_key`]: free-form name → key via the alias table
//! - [`infer_strategy`] / [`classify`]: leg pattern → key, with
//!   [`Provenance`]
//! - [`BreakEvenSolver`]: closed-form break-evens by key, numeric scan
//!   otherwise
//!
//! ## Example
//!
//! ```
//! use pricer_models::instruments::{OptionLeg, Side, StrategyBundle};
//! use pricer_models::strategy::{classify, Provenance, StrategyKey};
//!
//! let bundle = StrategyBundle::new(vec![
//!     OptionLeg::put(Side::Short, 95.0, 2.0).unwrap(),
//!     OptionLeg::call(Side::Short, 105.0, 2.5).unwrap(),
//! ]);
//!
//! let label = classify(&bundle, Some("Short Straddle")).unwrap();
//! assert_eq!(label.key, StrategyKey::ShortStrangle);
//! assert_eq!(label.provenance, Provenance::Disambiguated);
//! ```

mod aliases;
mod break_even;
mod classifier;
mod key;

pub use aliases::{alias_count, canonicalize, normalize_strategy_key};
pub use break_even::{
    compute_break_even, BreakEvenConfig, BreakEvenMeta, BreakEvenMethod, BreakEvenResult,
    BreakEvenSolver,
};
pub use classifier::{classify, disambiguate_straddle, infer_strategy, STRIKE_TOLERANCE};
pub use key::{Provenance, StrategyKey, StrategyLabel, UnknownStrategyKey};
