//! # Pricer Models (L2: Business Logic)
//!
//! Option strategy analytics on top of the `pricer_core` solvers.
//!
//! This crate provides:
//! - Black-Scholes-Merton prices and Greeks, implied volatility and a
//!   two-point constant-maturity volatility blend ([`analytical`])
//! - Option legs, strategy bundles, market context and piecewise-linear
//!   payoffs ([`instruments`])
//! - Expected-value statistics, CAPM drift and strategy aggregation
//!   ([`analytics`])
//! - Strategy naming, leg-pattern classification and break-even solving
//!   ([`strategy`])
//!
//! ## Design Principles
//!
//! - **Validated value types**: legs and market contexts reject bad inputs at
//!   construction, so downstream math never sees NaN
//! - **No solution is not an error**: solvers return `Ok(None)` when an
//!   answer does not exist and `Err` only for invalid input
//! - **Enum-based legs** matched exhaustively, with no trait objects

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod analytics;
pub mod instruments;
pub mod strategy;
