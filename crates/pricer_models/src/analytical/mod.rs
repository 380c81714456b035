//! Analytical pricing formulas for European options.
//!
//! This module provides:
//! - Standard normal distribution functions (erf, Φ, φ)
//! - Black-Scholes-Merton prices and Greeks with continuous carry
//! - Implied volatility (Newton-Raphson with bisection fallback)
//! - Two-point constant-maturity volatility blend
//!
//! ## Design Principles
//!
//! - **Explicit degenerate branch**: T = 0 or σ = 0 prices the discounted
//!   intrinsic value instead of producing NaN
//! - **Errors for structure, `None` for absence**: invalid inputs are
//!   `AnalyticalError`, an unsolvable implied volatility is `Ok(None)`

pub mod black_scholes;
pub mod distributions;
pub mod error;
pub mod implied_vol;
pub mod vol_blend;

pub use black_scholes::{
    call_greeks, call_price, d1_with_drift, put_greeks, put_price, BlackScholes, BsmParams,
    Greeks, OptionType, PricingResult,
};
pub use distributions::{erf, norm_cdf, norm_pdf};
pub use error::AnalyticalError;
pub use implied_vol::{
    implied_vol, no_arbitrage_bounds, ImpliedVolConfig, ImpliedVolInput, ImpliedVolSolver,
};
pub use vol_blend::{blend_constant_maturity, VolPoint};
