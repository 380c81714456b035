//! Numerical building blocks.
//!
//! - [`solvers`]: Newton-Raphson and bisection root finders

pub mod solvers;
