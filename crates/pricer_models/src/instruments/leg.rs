//! Strategy legs.
//!
//! A leg is one option or stock position: kind, side, premium and quantity.
//! Legs are validated on construction and on deserialisation, so every
//! `OptionLeg` in circulation satisfies K > 0 (options), p ≥ 0 and qty ≥ 0.

use super::error::InstrumentError;
use crate::analytical::OptionType;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Long or short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Bought
    Long,
    /// Sold
    Short,
}

impl Side {
    /// +1 for long, −1 for short.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Side::Long => 1.0,
            Side::Short => -1.0,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Long => write!(f, "long"),
            Side::Short => write!(f, "short"),
        }
    }
}

/// What a leg holds.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "lowercase"))]
pub enum LegKind {
    /// European call
    Call {
        /// Strike price
        strike: f64,
    },
    /// European put
    Put {
        /// Strike price
        strike: f64,
    },
    /// The underlying itself; the leg premium is its entry basis
    Stock,
}

impl LegKind {
    /// Strike for option kinds.
    #[inline]
    pub fn strike(&self) -> Option<f64> {
        match self {
            LegKind::Call { strike } | LegKind::Put { strike } => Some(*strike),
            LegKind::Stock => None,
        }
    }

    /// Option type for option kinds.
    #[inline]
    pub fn option_type(&self) -> Option<OptionType> {
        match self {
            LegKind::Call { .. } => Some(OptionType::Call),
            LegKind::Put { .. } => Some(OptionType::Put),
            LegKind::Stock => None,
        }
    }
}

/// One position in a strategy.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionLeg, Side};
///
/// let leg = OptionLeg::call(Side::Long, 100.0, 5.0).unwrap();
/// assert_eq!(leg.strike(), Some(100.0));
/// assert_eq!(leg.quantity(), 1.0);
///
/// assert!(OptionLeg::put(Side::Short, 0.0, 1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "LegSpec", into = "LegSpec"))]
pub struct OptionLeg {
    kind: LegKind,
    side: Side,
    premium: f64,
    quantity: f64,
}

impl OptionLeg {
    /// Creates a validated leg.
    ///
    /// # Errors
    /// - `InstrumentError::InvalidStrike` if an option strike is not > 0
    /// - `InstrumentError::InvalidPremium` if premium < 0
    /// - `InstrumentError::InvalidQuantity` if quantity < 0
    /// - `InstrumentError::InvalidParameter` for non-finite values
    pub fn new(
        kind: LegKind,
        side: Side,
        premium: f64,
        quantity: f64,
    ) -> Result<Self, InstrumentError> {
        if let Some(strike) = kind.strike() {
            if !strike.is_finite() {
                return Err(InstrumentError::non_finite("strike", strike));
            }
            if strike <= 0.0 {
                return Err(InstrumentError::InvalidStrike { strike });
            }
        }
        if !premium.is_finite() {
            return Err(InstrumentError::non_finite("premium", premium));
        }
        if premium < 0.0 {
            return Err(InstrumentError::InvalidPremium { premium });
        }
        if !quantity.is_finite() {
            return Err(InstrumentError::non_finite("quantity", quantity));
        }
        if quantity < 0.0 {
            return Err(InstrumentError::InvalidQuantity { quantity });
        }

        Ok(Self {
            kind,
            side,
            premium,
            quantity,
        })
    }

    /// One call contract.
    pub fn call(side: Side, strike: f64, premium: f64) -> Result<Self, InstrumentError> {
        Self::new(LegKind::Call { strike }, side, premium, 1.0)
    }

    /// One put contract.
    pub fn put(side: Side, strike: f64, premium: f64) -> Result<Self, InstrumentError> {
        Self::new(LegKind::Put { strike }, side, premium, 1.0)
    }

    /// One share bought or sold at `basis`.
    pub fn stock(side: Side, basis: f64) -> Result<Self, InstrumentError> {
        Self::new(LegKind::Stock, side, basis, 1.0)
    }

    /// Same leg with a different quantity.
    pub fn with_quantity(self, quantity: f64) -> Result<Self, InstrumentError> {
        Self::new(self.kind, self.side, self.premium, quantity)
    }

    /// Leg kind.
    #[inline]
    pub fn kind(&self) -> LegKind {
        self.kind
    }

    /// Long or short.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Premium per unit (entry basis for stock).
    #[inline]
    pub fn premium(&self) -> f64 {
        self.premium
    }

    /// Number of units.
    #[inline]
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Strike, if this is an option.
    #[inline]
    pub fn strike(&self) -> Option<f64> {
        self.kind.strike()
    }

    /// Call/put, if this is an option.
    #[inline]
    pub fn option_type(&self) -> Option<OptionType> {
        self.kind.option_type()
    }

    /// True for calls and puts.
    #[inline]
    pub fn is_option(&self) -> bool {
        self.kind.strike().is_some()
    }

    /// Quantity signed by side.
    #[inline]
    pub fn signed_quantity(&self) -> f64 {
        self.side.sign() * self.quantity
    }
}

/// Wire form of [`OptionLeg`]; validated through `TryFrom`.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct LegSpec {
    #[serde(flatten)]
    kind: LegKind,
    side: Side,
    #[serde(default)]
    premium: f64,
    #[serde(default = "default_quantity")]
    quantity: f64,
}

#[cfg(feature = "serde")]
fn default_quantity() -> f64 {
    1.0
}

#[cfg(feature = "serde")]
impl TryFrom<LegSpec> for OptionLeg {
    type Error = InstrumentError;

    fn try_from(spec: LegSpec) -> Result<Self, Self::Error> {
        OptionLeg::new(spec.kind, spec.side, spec.premium, spec.quantity)
    }
}

#[cfg(feature = "serde")]
impl From<OptionLeg> for LegSpec {
    fn from(leg: OptionLeg) -> Self {
        LegSpec {
            kind: leg.kind,
            side: leg.side,
            premium: leg.premium,
            quantity: leg.quantity,
        }
    }
}

#[cfg(test)]
impl OptionLeg {
    /// Copy of this leg held by the counterparty.
    pub(crate) fn flipped(&self) -> Self {
        let side = match self.side {
            Side::Long => Side::Short,
            Side::Short => Side::Long,
        };
        Self { side, ..*self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let call = OptionLeg::call(Side::Long, 100.0, 5.0).unwrap();
        assert_eq!(call.option_type(), Some(OptionType::Call));
        assert_eq!(call.premium(), 5.0);
        assert!(call.is_option());

        let stock = OptionLeg::stock(Side::Short, 42.0).unwrap();
        assert_eq!(stock.strike(), None);
        assert_eq!(stock.option_type(), None);
        assert!(!stock.is_option());
    }

    #[test]
    fn test_signed_quantity() {
        let leg = OptionLeg::put(Side::Short, 90.0, 1.0)
            .unwrap()
            .with_quantity(3.0)
            .unwrap();
        assert_eq!(leg.signed_quantity(), -3.0);
        assert_eq!(leg.flipped().signed_quantity(), 3.0);
        assert_eq!(leg.flipped().premium(), leg.premium());
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            OptionLeg::call(Side::Long, -5.0, 1.0),
            Err(InstrumentError::InvalidStrike { strike: -5.0 })
        );
        assert_eq!(
            OptionLeg::put(Side::Long, 100.0, -0.5),
            Err(InstrumentError::InvalidPremium { premium: -0.5 })
        );
        assert_eq!(
            OptionLeg::call(Side::Long, 100.0, 1.0)
                .unwrap()
                .with_quantity(-1.0),
            Err(InstrumentError::InvalidQuantity { quantity: -1.0 })
        );
        assert!(matches!(
            OptionLeg::call(Side::Long, f64::NAN, 1.0),
            Err(InstrumentError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_zero_quantity_allowed() {
        let leg = OptionLeg::call(Side::Long, 100.0, 1.0)
            .unwrap()
            .with_quantity(0.0)
            .unwrap();
        assert_eq!(leg.signed_quantity(), 0.0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates() {
        let leg: OptionLeg = serde_json::from_str(
            r#"{"type": "put", "strike": 95.0, "side": "short", "premium": 2.5, "quantity": 2}"#,
        )
        .unwrap();
        assert_eq!(leg.kind(), LegKind::Put { strike: 95.0 });
        assert_eq!(leg.signed_quantity(), -2.0);

        let stock: OptionLeg =
            serde_json::from_str(r#"{"type": "stock", "side": "long", "premium": 50.0}"#).unwrap();
        assert_eq!(stock.quantity(), 1.0);

        let bad = serde_json::from_str::<OptionLeg>(
            r#"{"type": "call", "strike": -1.0, "side": "long"}"#,
        );
        assert!(bad.is_err());
    }
}
