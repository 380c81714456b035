//! Shared error types.
//!
//! - `error`: [`PricingError`] and [`SolverError`]

pub mod error;

pub use error::{PricingError, SolverError};
