//! Newton-Raphson root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Newton-Raphson root finder.
///
/// Uses `x_{n+1} = x_n - f(x_n) / f'(x_n)`. Converges quadratically near a
/// simple root but stalls when the derivative vanishes, so callers that need
/// a guaranteed answer pair it with [`BisectionSolver`](super::BisectionSolver).
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// let f = |x: f64| x * x - 2.0;
/// let f_prime = |x: f64| 2.0 * x;
///
/// let root = solver.find_root(f, f_prime, 1.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    config: SolverConfig<T>,
    /// Derivatives with magnitude below this abort the iteration.
    derivative_floor: T,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Create a new solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self {
            config,
            derivative_floor: T::from(1e-30).unwrap_or_else(T::min_positive_value),
        }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Returns a copy that treats `|f'(x)| < floor` as a stall.
    pub fn with_derivative_floor(mut self, floor: T) -> Self {
        self.derivative_floor = floor;
        self
    }

    /// Find a root of `f` using explicit derivative `f_prime`.
    ///
    /// # Errors
    ///
    /// * `SolverError::DerivativeNearZero` - derivative below the floor
    /// * `SolverError::NumericalInstability` - iterate became non-finite
    /// * `SolverError::MaxIterationsExceeded` - no convergence
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        self.iterate(f, f_prime, x0, |x| x)
    }

    /// Find a root of `f` keeping every iterate inside `[lower, upper]`.
    ///
    /// Each Newton step is clamped back into the interval, which keeps
    /// parameters such as volatility in their admissible domain.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
    /// // The first step from x0 = 100 lands near 50 and is pulled back to 3.
    /// let root = solver
    ///     .find_root_bounded(|x: f64| x * x - 4.0, |x: f64| 2.0 * x, 100.0, 0.5, 3.0)
    ///     .unwrap();
    /// assert!((root - 2.0).abs() < 1e-10);
    /// ```
    ///
    /// # Errors
    ///
    /// Same failure modes as [`find_root`](Self::find_root).
    pub fn find_root_bounded<F, G>(
        &self,
        f: F,
        f_prime: G,
        x0: T,
        lower: T,
        upper: T,
    ) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        let clamp = |x: T| x.max(lower).min(upper);
        self.iterate(f, f_prime, clamp(x0), clamp)
    }

    fn iterate<F, G, C>(&self, f: F, f_prime: G, x0: T, project: C) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
        C: Fn(T) -> T,
    {
        let mut x = x0;

        for _iteration in 0..self.config.max_iterations {
            let f_val = f(x);

            if f_val.abs() <= self.config.tolerance {
                return Ok(x);
            }

            let f_prime_val = f_prime(x);
            if !(f_prime_val.abs() >= self.derivative_floor) {
                return Err(SolverError::DerivativeNearZero {
                    x: x.to_f64().unwrap_or(f64::NAN),
                });
            }

            x = project(x - f_val / f_prime_val);

            if !x.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }
        }

        // The last projected iterate may already satisfy the tolerance.
        if f(x).abs() <= self.config.tolerance {
            return Ok(x);
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_find_sqrt_2() {
        let solver = NewtonRaphsonSolver::with_defaults();
        let root = solver.find_root(|x: f64| x * x - 2.0, |x| 2.0 * x, 1.0).unwrap();
        assert_relative_eq!(root, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_find_cubic_root() {
        let solver = NewtonRaphsonSolver::with_defaults();
        let f = |x: f64| x * x * x - x - 2.0;
        let root = solver.find_root(f, |x| 3.0 * x * x - 1.0, 1.5).unwrap();
        assert!(f(root).abs() < 1e-10);
    }

    #[test]
    fn test_derivative_near_zero() {
        let solver = NewtonRaphsonSolver::with_defaults();
        // f'(0) = 0 for x² + 1
        let result = solver.find_root(|x: f64| x * x + 1.0, |x| 2.0 * x, 0.0);
        assert!(matches!(result, Err(SolverError::DerivativeNearZero { .. })));
    }

    #[test]
    fn test_derivative_floor_is_configurable() {
        let solver = NewtonRaphsonSolver::with_defaults().with_derivative_floor(1e-3);
        // Flat tail of exp(-x) near x = 20 has derivative ~2e-9.
        let result = solver.find_root(|x: f64| (-x).exp() - 0.5, |x| -(-x).exp(), 20.0);
        assert!(matches!(result, Err(SolverError::DerivativeNearZero { .. })));
    }

    #[test]
    fn test_nan_derivative_counts_as_stall() {
        let solver = NewtonRaphsonSolver::with_defaults();
        let result = solver.find_root(|x: f64| x - 1.0, |_| f64::NAN, 0.0);
        assert!(matches!(result, Err(SolverError::DerivativeNearZero { .. })));
    }

    #[test]
    fn test_max_iterations_exceeded() {
        let config = SolverConfig::new(1e-15, 3);
        let solver = NewtonRaphsonSolver::new(config);
        let result = solver.find_root(|x: f64| x.powi(3) - 1000.0, |x| 3.0 * x * x, 1.0);
        assert_eq!(
            result,
            Err(SolverError::MaxIterationsExceeded { iterations: 3 })
        );
    }

    #[test]
    fn test_bounded_iterates_stay_in_range() {
        let solver = NewtonRaphsonSolver::with_defaults();
        let root = solver
            .find_root_bounded(|x: f64| x * x - 4.0, |x| 2.0 * x, 100.0, 0.5, 3.0)
            .unwrap();
        assert_relative_eq!(root, 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_bounded_root_outside_range_fails() {
        let solver = NewtonRaphsonSolver::new(SolverConfig::new(1e-10, 20));
        let result = solver.find_root_bounded(|x: f64| x - 10.0, |_| 1.0, 1.0, 0.0, 5.0);
        assert!(matches!(
            result,
            Err(SolverError::MaxIterationsExceeded { .. })
        ));
    }

    #[test]
    fn test_with_f32() {
        let solver: NewtonRaphsonSolver<f32> =
            NewtonRaphsonSolver::new(SolverConfig::new(1e-5, 50));
        let root = solver.find_root(|x| x * x - 4.0, |x| 2.0 * x, 1.0).unwrap();
        assert!((root - 2.0).abs() < 1e-4);
    }
}
