//! Root-finding solvers for numerical computation.
//!
//! Two complementary algorithms are provided, designed to be chained:
//!
//! - [`NewtonRaphsonSolver`]: quadratic convergence from a good initial
//!   guess, with optional clamping of iterates into a bounded domain
//! - [`BisectionSolver`]: guaranteed convergence once a sign change is
//!   bracketed, plus geometric bracket expansion
//!
//! Implied volatility uses Newton first and drops to bisection when vega
//! collapses; break-even polishing uses bisection alone on piecewise-linear
//! payoffs.
//!
//! ## Configuration
//!
//! [`SolverConfig`] sets `tolerance` and `max_iterations`;
//! [`BracketConfig`] controls bracket growth.
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::solvers::{BisectionSolver, NewtonRaphsonSolver, SolverConfig};
//!
//! let f = |x: f64| x.powi(3) - 8.0;
//! let f_prime = |x: f64| 3.0 * x * x;
//!
//! let config = SolverConfig::new(1e-12, 100);
//! let root = NewtonRaphsonSolver::new(config)
//!     .find_root(f, f_prime, 1.0)
//!     .or_else(|_| BisectionSolver::new(config).find_root(f, 0.0, 10.0))
//!     .unwrap();
//! assert!((root - 2.0).abs() < 1e-9);
//! ```

mod bisection;
mod config;
mod newton_raphson;

pub use bisection::BisectionSolver;
pub use config::{BracketConfig, SolverConfig};
pub use newton_raphson::NewtonRaphsonSolver;
