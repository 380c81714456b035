//! Bracketing bisection solver with geometric bracket expansion.

use super::{BracketConfig, SolverConfig};
use crate::types::SolverError;
use num_traits::Float;

/// Bisection root finder.
///
/// Slow (one bit per iteration) but unconditionally convergent once a sign
/// change has been bracketed. [`expand_upper`](Self::expand_upper) searches
/// for such a bracket by growing the upper bound geometrically.
///
/// # Example
///
/// ```
/// use pricer_core::math::solvers::{BisectionSolver, BracketConfig, SolverConfig};
///
/// let solver = BisectionSolver::new(SolverConfig::new(1e-12, 200));
/// let f = |x: f64| x * x - 9.0;
///
/// let (lo, hi) = solver.expand_upper(f, 0.0, 0.5, BracketConfig {
///     growth: 2.0,
///     max_expansions: 10,
///     cap: 100.0,
/// }).unwrap();
/// let root = solver.find_root(f, lo, hi).unwrap();
/// assert!((root - 3.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BisectionSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BisectionSolver<T> {
    /// Create a new bisection solver.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Grow `upper` from `start` until `f` changes sign on `[lower, upper]`.
    ///
    /// Returns the bracket `(lower, upper)`. A zero at either end counts as
    /// a sign change.
    ///
    /// # Errors
    ///
    /// `SolverError::NoBracket` when no sign change is found before the
    /// expansion budget or the cap is exhausted.
    pub fn expand_upper<F>(
        &self,
        f: F,
        lower: T,
        start: T,
        bracket: BracketConfig<T>,
    ) -> Result<(T, T), SolverError>
    where
        F: Fn(T) -> T,
    {
        let f_lower = f(lower);
        let mut upper = start.min(bracket.cap);

        for _ in 0..=bracket.max_expansions {
            let f_upper = f(upper);
            if f_lower * f_upper <= T::zero() {
                return Ok((lower, upper));
            }
            if upper >= bracket.cap {
                break;
            }
            upper = (upper * bracket.growth).min(bracket.cap);
        }

        Err(SolverError::NoBracket {
            a: lower.to_f64().unwrap_or(f64::NAN),
            b: upper.to_f64().unwrap_or(f64::NAN),
        })
    }

    /// Find a root of `f` in `[a, b]`.
    ///
    /// # Errors
    ///
    /// * `SolverError::NoBracket` - `f(a)` and `f(b)` have the same sign
    /// * `SolverError::MaxIterationsExceeded` - bracket still wider than the
    ///   tolerance after the iteration budget
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let (mut lo, mut hi) = if a <= b { (a, b) } else { (b, a) };
        let mut f_lo = f(lo);
        let f_hi = f(hi);

        if f_lo == T::zero() {
            return Ok(lo);
        }
        if f_hi == T::zero() {
            return Ok(hi);
        }
        if f_lo * f_hi > T::zero() {
            return Err(SolverError::NoBracket {
                a: lo.to_f64().unwrap_or(f64::NAN),
                b: hi.to_f64().unwrap_or(f64::NAN),
            });
        }

        let two = T::one() + T::one();
        let tol = self.config.tolerance;

        for _iteration in 0..self.config.max_iterations {
            let mid = lo + (hi - lo) / two;
            let f_mid = f(mid);

            if f_mid.abs() <= tol || (hi - lo) / two < tol {
                return Ok(mid);
            }

            if f_lo * f_mid < T::zero() {
                hi = mid;
            } else {
                lo = mid;
                f_lo = f_mid;
            }
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
