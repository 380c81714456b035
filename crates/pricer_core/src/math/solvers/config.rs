//! Solver configuration types.

use num_traits::Float;

/// Configuration for root-finding algorithms.
///
/// Shared by [`NewtonRaphsonSolver`](super::NewtonRaphsonSolver) and
/// [`BisectionSolver`](super::BisectionSolver).
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance <= 1e-8);
///
/// let iv = SolverConfig::new(1e-8, 50);
/// assert_eq!(iv.max_iterations, 50);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance.
    ///
    /// Newton stops when `|f(x)| <= tolerance`; bisection additionally stops
    /// once the bracket half-width drops below it.
    pub tolerance: T,

    /// Maximum number of iterations before giving up.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Tolerance `1e-10`, 100 iterations.
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap_or_else(T::epsilon),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Returns a copy with a different iteration cap.
    pub fn with_max_iterations(self, max_iterations: usize) -> Self {
        Self::new(self.tolerance, max_iterations)
    }
}

/// Geometric bracket expansion settings.
///
/// Starting from an initial upper bound, the bound is multiplied by `growth`
/// up to `max_expansions` times, never exceeding `cap`, until the function
/// changes sign across `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketConfig<T: Float> {
    /// Multiplicative growth per expansion step (> 1).
    pub growth: T,
    /// Maximum number of expansion steps.
    pub max_expansions: usize,
    /// Hard ceiling on the upper bound.
    pub cap: T,
}

impl<T: Float> Default for BracketConfig<T> {
    /// Growth 1.6, 25 expansions, cap 5.0 (the implied volatility bracket).
    fn default() -> Self {
        Self {
            growth: T::from(1.6).unwrap_or_else(T::one),
            max_expansions: 25,
            cap: T::from(5.0).unwrap_or_else(T::max_value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: SolverConfig<f64> = SolverConfig::default();
        assert!((config.tolerance - 1e-10).abs() < 1e-15);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_new_config() {
        let config: SolverConfig<f64> = SolverConfig::new(1e-8, 50);
        assert_eq!(config.tolerance, 1e-8);
        assert_eq!(config.max_iterations, 50);
    }

    #[test]
    fn test_with_max_iterations() {
        let config: SolverConfig<f64> = SolverConfig::new(1e-8, 50).with_max_iterations(80);
        assert_eq!(config.max_iterations, 80);
        assert_eq!(config.tolerance, 1e-8);
    }

    #[test]
    #[should_panic(expected = "tolerance must be positive")]
    fn test_new_config_zero_tolerance_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(0.0, 100);
    }

    #[test]
    #[should_panic(expected = "max_iterations must be > 0")]
    fn test_new_config_zero_iterations_panics() {
        let _: SolverConfig<f64> = SolverConfig::new(1e-10, 0);
    }

    #[test]
    fn test_default_bracket() {
        let bracket: BracketConfig<f64> = BracketConfig::default();
        assert_eq!(bracket.growth, 1.6);
        assert_eq!(bracket.max_expansions, 25);
        assert_eq!(bracket.cap, 5.0);
    }
}
