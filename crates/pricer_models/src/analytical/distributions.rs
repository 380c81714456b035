//! Standard normal distribution functions.
//!
//! This module provides:
//! - `erf`: Error function (Abramowitz-Stegun 7.1.26)
//! - `norm_cdf`: Cumulative distribution function Φ
//! - `norm_pdf`: Probability density function φ
//!
//! All functions are generic over `T: Float` and total: every finite or
//! infinite input produces a value, never an error.

use num_traits::Float;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Abramowitz and Stegun 7.1.26 coefficients.
const A1: f64 = 0.254_829_592;
const A2: f64 = -0.284_496_736;
const A3: f64 = 1.421_413_741;
const A4: f64 = -1.453_152_027;
const A5: f64 = 1.061_405_429;
const P: f64 = 0.327_591_1;

#[inline]
fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

/// Complementary error function for non-negative arguments.
///
/// erfc(|x|) = t·(a₁ + t·(a₂ + t·(a₃ + t·(a₄ + t·a₅))))·e^(−x²), t = 1/(1 + p|x|)
#[inline]
fn erfc_abs<T: Float>(abs_x: T) -> T {
    let t = T::one() / (T::one() + lit::<T>(P) * abs_x);
    let poly = lit::<T>(A1)
        + t * (lit::<T>(A2) + t * (lit::<T>(A3) + t * (lit::<T>(A4) + t * lit::<T>(A5))));
    t * poly * (-abs_x * abs_x).exp()
}

/// Error function.
///
/// Abramowitz-Stegun approximation with maximum absolute error 1.5e-7.
/// Odd by construction: `erf(-x) == -erf(x)` exactly.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::erf;
///
/// assert_eq!(erf(0.0_f64), 0.0);
/// assert!((erf(1.0_f64) - 0.842_700_79).abs() < 2e-7);
/// assert_eq!(erf(-0.7_f64), -erf(0.7_f64));
/// ```
#[inline]
pub fn erf<T: Float>(x: T) -> T {
    // The polynomial leaves ~1e-9 at the origin, and -0.0 is not negative.
    if x == T::zero() {
        return T::zero();
    }
    let value = T::one() - erfc_abs(x.abs());
    if x < T::zero() {
        -value
    } else {
        value
    }
}

/// Standard normal cumulative distribution function.
///
/// Φ(z) = ½(1 + erf(z/√2)). Symmetric by construction, so
/// `norm_cdf(x) + norm_cdf(-x) == 1` up to rounding, which keeps put-call
/// parity exact for prices built on it.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(z: T) -> T {
    let half = lit::<T>(0.5);
    if z.is_nan() {
        return z;
    }
    half * (T::one() + erf(z / lit::<T>(SQRT_2)))
}

/// Standard normal probability density function.
///
/// φ(z) = exp(−z²/2) / √(2π)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.398_942_280_4).abs() < 1e-9);
/// assert!((norm_pdf(1.0_f64) - 0.241_970_724_5).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(z: T) -> T {
    lit::<T>(FRAC_1_SQRT_2PI) * (lit::<T>(-0.5) * z * z).exp()
}
