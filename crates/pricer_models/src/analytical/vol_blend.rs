//! Two-point constant-maturity volatility blend.
//!
//! Interpolates total variance σ²T linearly in T between two quoted tenors
//! and converts back to a volatility. Outside the quoted range the nearest
//! volatility is held flat.

use super::error::AnalyticalError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A volatility quoted for one tenor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VolPoint {
    /// Tenor in years
    pub expiry: f64,
    /// Annualised volatility
    pub volatility: f64,
}

impl VolPoint {
    fn validate(&self) -> Result<(), AnalyticalError> {
        AnalyticalError::ensure_finite("expiry", self.expiry)?;
        AnalyticalError::ensure_finite("volatility", self.volatility)?;
        if self.expiry < 0.0 {
            return Err(AnalyticalError::InvalidExpiry {
                expiry: self.expiry,
            });
        }
        if self.volatility < 0.0 {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: self.volatility,
            });
        }
        Ok(())
    }
}

/// Blends two quoted volatilities to the target tenor.
///
/// The points may be passed in either order. Equal tenors average the two
/// volatilities.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{blend_constant_maturity, VolPoint};
///
/// let near = VolPoint { expiry: 0.25, volatility: 0.30 };
/// let far = VolPoint { expiry: 1.0, volatility: 0.20 };
///
/// let vol = blend_constant_maturity(near, far, 0.5).unwrap();
/// assert!(vol < 0.30 && vol > 0.20);
/// ```
///
/// # Errors
/// `AnalyticalError` for negative or non-finite tenors and volatilities.
pub fn blend_constant_maturity(
    first: VolPoint,
    second: VolPoint,
    target_expiry: f64,
) -> Result<f64, AnalyticalError> {
    first.validate()?;
    second.validate()?;
    AnalyticalError::ensure_finite("target expiry", target_expiry)?;
    if target_expiry < 0.0 {
        return Err(AnalyticalError::InvalidExpiry {
            expiry: target_expiry,
        });
    }

    let (near, far) = if first.expiry <= second.expiry {
        (first, second)
    } else {
        (second, first)
    };

    if near.expiry == far.expiry {
        return Ok(0.5 * (near.volatility + far.volatility));
    }
    if target_expiry <= near.expiry {
        return Ok(near.volatility);
    }
    if target_expiry >= far.expiry {
        return Ok(far.volatility);
    }

    let weight = (far.expiry - target_expiry) / (far.expiry - near.expiry);
    let near_var = near.volatility * near.volatility * near.expiry;
    let far_var = far.volatility * far.volatility * far.expiry;
    let total_var = weight * near_var + (1.0 - weight) * far_var;

    Ok((total_var / target_expiry).max(0.0).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn point(expiry: f64, volatility: f64) -> VolPoint {
        VolPoint { expiry, volatility }
    }

    #[test]
    fn test_midpoint_total_variance() {
        // var(0.5) = 0.5 * 0.09 * 0.25 + 0.5 * 0.04 * 0.75 = 0.02625
        let vol = blend_constant_maturity(point(0.25, 0.3), point(0.75, 0.2), 0.5).unwrap();
        assert_relative_eq!(vol, (0.02625_f64 / 0.5).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_reproduces_quoted_tenors() {
        let (a, b) = (point(0.1, 0.5), point(2.0, 0.25));
        assert_relative_eq!(blend_constant_maturity(a, b, 0.1).unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(blend_constant_maturity(a, b, 2.0).unwrap(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_extrapolation() {
        let (a, b) = (point(0.5, 0.22), point(1.0, 0.18));
        assert_eq!(blend_constant_maturity(a, b, 0.0).unwrap(), 0.22);
        assert_eq!(blend_constant_maturity(a, b, 5.0).unwrap(), 0.18);
    }

    #[test]
    fn test_order_independent() {
        let (a, b) = (point(0.25, 0.3), point(1.0, 0.2));
        assert_eq!(
            blend_constant_maturity(a, b, 0.6).unwrap(),
            blend_constant_maturity(b, a, 0.6).unwrap()
        );
    }

    #[test]
    fn test_equal_tenors_average() {
        let vol = blend_constant_maturity(point(1.0, 0.2), point(1.0, 0.3), 1.0).unwrap();
        assert_relative_eq!(vol, 0.25, epsilon = 1e-15);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            blend_constant_maturity(point(-1.0, 0.2), point(1.0, 0.2), 0.5),
            Err(AnalyticalError::InvalidExpiry { .. })
        ));
        assert!(matches!(
            blend_constant_maturity(point(0.5, -0.2), point(1.0, 0.2), 0.5),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
        assert!(matches!(
            blend_constant_maturity(point(0.5, 0.2), point(1.0, 0.2), f64::NAN),
            Err(AnalyticalError::NonFinite { .. })
        ));
    }
}
