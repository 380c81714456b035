//! # pricer_core: Numerical Foundation for the Strategy Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Root-finding solvers (`math::solvers`): Newton-Raphson with bounded
//!   iterates and bracketing bisection with geometric bracket expansion
//! - Error types: `PricingError`, `SolverError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derive
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
//!
//! let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-12, 50));
//! let root = solver
//!     .find_root_bounded(|x: f64| x * x - 2.0, |x| 2.0 * x, 1.0, 0.0, 10.0)
//!     .unwrap();
//! assert!((root - 2.0_f64.sqrt()).abs() < 1e-10);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for solver errors

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
