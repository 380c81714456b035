//! Integration tests for module exports.
//!
//! Verifies that the solvers and error types are reachable through their
//! public paths and interoperate the way downstream crates chain them.

use pricer_core::math::solvers::{
    BisectionSolver, BracketConfig, NewtonRaphsonSolver, SolverConfig,
};
use pricer_core::types::{PricingError, SolverError};

#[test]
fn test_solver_exports() {
    let config = SolverConfig::new(1e-12, 100);
    let newton = NewtonRaphsonSolver::new(config);
    let bisection = BisectionSolver::new(config);

    let f = |x: f64| x * x - 9.0;
    let a = newton.find_root(f, |x| 2.0 * x, 1.0).unwrap();
    let b = bisection.find_root(f, 0.0, 10.0).unwrap();
    assert!((a - 3.0).abs() < 1e-10);
    assert!((b - 3.0).abs() < 1e-10);
}

#[test]
fn test_newton_then_bisection_fallback() {
    // Flat derivative at the start: Newton gives up, bisection finishes.
    let f = |x: f64| x.powi(3) - 1.0;
    let f_prime = |x: f64| 3.0 * x * x;
    let config = SolverConfig::new(1e-10, 50);

    let newton = NewtonRaphsonSolver::new(config).find_root(f, f_prime, 0.0);
    assert!(matches!(newton, Err(SolverError::DerivativeNearZero { .. })));

    let root = BisectionSolver::new(config).find_root(f, -1.0, 2.0).unwrap();
    assert!((root - 1.0).abs() < 1e-9);
}

#[test]
fn test_bracket_then_bisect() {
    let f = |x: f64| x - 2.5;
    let bisection = BisectionSolver::new(SolverConfig::new(1e-12, 100));
    let (lo, hi) = bisection
        .expand_upper(f, 0.0, 0.1, BracketConfig::default())
        .unwrap();
    assert!(hi >= 2.5);
    let root = bisection.find_root(f, lo, hi).unwrap();
    assert!((root - 2.5).abs() < 1e-10);
}

#[test]
fn test_solver_error_converts_to_pricing_error() {
    let err: PricingError = SolverError::NoBracket { a: 0.0, b: 1.0 }.into();
    assert!(matches!(err, PricingError::NumericalInstability(_)));
}
