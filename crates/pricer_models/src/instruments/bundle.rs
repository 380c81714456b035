//! Multi-leg strategy bundles.

use super::leg::OptionLeg;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Relative tolerance for "all legs carry the same quantity".
const QUANTITY_TOLERANCE: f64 = 1e-12;

/// An ordered collection of legs. Order carries no meaning for the math.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionLeg, Side, StrategyBundle};
///
/// let bundle = StrategyBundle::new(vec![
///     OptionLeg::call(Side::Long, 100.0, 5.0).unwrap(),
///     OptionLeg::call(Side::Short, 110.0, 2.0).unwrap(),
/// ]);
/// assert_eq!(bundle.len(), 2);
/// assert_eq!(bundle.net_premium(), 3.0);
/// assert_eq!(bundle.strikes(), vec![100.0, 110.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StrategyBundle {
    legs: Vec<OptionLeg>,
}

impl StrategyBundle {
    /// Wraps already-validated legs.
    pub fn new(legs: Vec<OptionLeg>) -> Self {
        Self { legs }
    }

    /// Number of legs.
    #[inline]
    pub fn len(&self) -> usize {
        self.legs.len()
    }

    /// True when the bundle holds no legs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// Iterates over the legs.
    pub fn iter(&self) -> std::slice::Iter<'_, OptionLeg> {
        self.legs.iter()
    }

    /// Option legs only.
    pub fn option_legs(&self) -> impl Iterator<Item = &OptionLeg> {
        self.legs.iter().filter(|leg| leg.is_option())
    }

    /// True when the bundle contains a stock leg.
    pub fn has_stock(&self) -> bool {
        self.legs.iter().any(|leg| !leg.is_option())
    }

    /// Option strikes, sorted, in leg multiplicity.
    pub fn strikes(&self) -> Vec<f64> {
        let mut strikes: Vec<f64> = self.legs.iter().filter_map(OptionLeg::strike).collect();
        strikes.sort_by(f64::total_cmp);
        strikes
    }

    /// Quantity-weighted net option premium: Σ long − Σ short.
    ///
    /// Positive is a net debit, negative a net credit.
    pub fn net_premium(&self) -> f64 {
        self.option_legs()
            .map(|leg| leg.signed_quantity() * leg.premium())
            .sum()
    }

    /// The common quantity if every leg carries the same one.
    pub fn uniform_quantity(&self) -> Option<f64> {
        let first = self.legs.first()?.quantity();
        let tol = QUANTITY_TOLERANCE * first.abs().max(1.0);
        self.legs
            .iter()
            .all(|leg| (leg.quantity() - first).abs() <= tol)
            .then_some(first)
    }
}

impl From<Vec<OptionLeg>> for StrategyBundle {
    fn from(legs: Vec<OptionLeg>) -> Self {
        Self::new(legs)
    }
}

impl FromIterator<OptionLeg> for StrategyBundle {
    fn from_iter<I: IntoIterator<Item = OptionLeg>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a StrategyBundle {
    type Item = &'a OptionLeg;
    type IntoIter = std::slice::Iter<'a, OptionLeg>;

    fn into_iter(self) -> Self::IntoIter {
        self.legs.iter()
    }
}

#[cfg(test)]
impl StrategyBundle {
    /// Same bundle seen from the counterparty.
    pub(crate) fn mirrored(&self) -> StrategyBundle {
        self.iter().map(OptionLeg::flipped).collect()
    }
}
