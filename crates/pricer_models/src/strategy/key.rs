//! Canonical strategy keys and classification provenance.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Closed taxonomy of option strategies.
///
/// The snake_case form returned by [`StrategyKey::as_str`] is the canonical
/// key used on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[allow(missing_docs)]
pub enum StrategyKey {
    LongCall,
    ShortCall,
    LongPut,
    ShortPut,
    LongStock,
    ShortStock,
    CoveredCall,
    ProtectivePut,
    Collar,
    BullCallSpread,
    BearCallSpread,
    BullPutSpread,
    BearPutSpread,
    LongStraddle,
    ShortStraddle,
    LongStrangle,
    ShortStrangle,
    IronButterfly,
    IronCondor,
    LongCallButterfly,
    LongPutButterfly,
    CalendarSpread,
    DiagonalSpread,
    RatioCallSpread,
    RatioPutSpread,
    BoxSpread,
}

impl StrategyKey {
    /// Every key, in declaration order.
    pub const ALL: [StrategyKey; 26] = [
        StrategyKey::LongCall,
        StrategyKey::ShortCall,
        StrategyKey::LongPut,
        StrategyKey::ShortPut,
        StrategyKey::LongStock,
        StrategyKey::ShortStock,
        StrategyKey::CoveredCall,
        StrategyKey::ProtectivePut,
        StrategyKey::Collar,
        StrategyKey::BullCallSpread,
        StrategyKey::BearCallSpread,
        StrategyKey::BullPutSpread,
        StrategyKey::BearPutSpread,
        StrategyKey::LongStraddle,
        StrategyKey::ShortStraddle,
        StrategyKey::LongStrangle,
        StrategyKey::ShortStrangle,
        StrategyKey::IronButterfly,
        StrategyKey::IronCondor,
        StrategyKey::LongCallButterfly,
        StrategyKey::LongPutButterfly,
        StrategyKey::CalendarSpread,
        StrategyKey::DiagonalSpread,
        StrategyKey::RatioCallSpread,
        StrategyKey::RatioPutSpread,
        StrategyKey::BoxSpread,
    ];

    /// Canonical snake_case key.
    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKey::LongCall => "long_call",
            StrategyKey::ShortCall => "short_call",
            StrategyKey::LongPut => "long_put",
            StrategyKey::ShortPut => "short_put",
            StrategyKey::LongStock => "long_stock",
            StrategyKey::ShortStock => "short_stock",
            StrategyKey::CoveredCall => "covered_call",
            StrategyKey::ProtectivePut => "protective_put",
            StrategyKey::Collar => "collar",
            StrategyKey::BullCallSpread => "bull_call_spread",
            StrategyKey::BearCallSpread => "bear_call_spread",
            StrategyKey::BullPutSpread => "bull_put_spread",
            StrategyKey::BearPutSpread => "bear_put_spread",
            StrategyKey::LongStraddle => "long_straddle",
            StrategyKey::ShortStraddle => "short_straddle",
            StrategyKey::LongStrangle => "long_strangle",
            StrategyKey::ShortStrangle => "short_strangle",
            StrategyKey::IronButterfly => "iron_butterfly",
            StrategyKey::IronCondor => "iron_condor",
            StrategyKey::LongCallButterfly => "long_call_butterfly",
            StrategyKey::LongPutButterfly => "long_put_butterfly",
            StrategyKey::CalendarSpread => "calendar_spread",
            StrategyKey::DiagonalSpread => "diagonal_spread",
            StrategyKey::RatioCallSpread => "ratio_call_spread",
            StrategyKey::RatioPutSpread => "ratio_put_spread",
            StrategyKey::BoxSpread => "box_spread",
        }
    }
}

impl fmt::Display for StrategyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown canonical key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown strategy key: {0}")]
pub struct UnknownStrategyKey(pub String);

impl FromStr for StrategyKey {
    type Err = UnknownStrategyKey;

    /// Parses the exact canonical key. Use
    /// [`normalize_strategy_key`](super::normalize_strategy_key) for aliases.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StrategyKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownStrategyKey(s.to_string()))
    }
}

/// How a strategy key was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Provenance {
    /// Supplied by the caller and used as given
    Explicit,
    /// Recognised from the leg pattern
    Inferred,
    /// Supplied as a straddle but reclassified from the strikes
    Disambiguated,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Provenance::Explicit => "explicit",
            Provenance::Inferred => "inferred",
            Provenance::Disambiguated => "disambiguated",
        })
    }
}

/// A strategy key with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StrategyLabel {
    /// Canonical key
    pub key: StrategyKey,
    /// How the key was obtained
    pub provenance: Provenance,
}

impl StrategyLabel {
    /// Creates a label.
    pub fn new(key: StrategyKey, provenance: Provenance) -> Self {
        Self { key, provenance }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_round_trips_through_from_str() {
        for key in StrategyKey::ALL {
            assert_eq!(key.as_str().parse::<StrategyKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_keys_are_unique() {
        let mut names: Vec<&str> = StrategyKey::ALL.iter().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), StrategyKey::ALL.len());
    }

    #[test]
    fn test_from_str_is_exact() {
        assert!("Iron Condor".parse::<StrategyKey>().is_err());
        assert_eq!(
            "bogus".parse::<StrategyKey>(),
            Err(UnknownStrategyKey("bogus".to_string()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(StrategyKey::BullPutSpread.to_string(), "bull_put_spread");
        assert_eq!(Provenance::Disambiguated.to_string(), "disambiguated");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_snake_case() {
        for key in StrategyKey::ALL {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
            assert_eq!(serde_json::from_str::<StrategyKey>(&json).unwrap(), key);
        }
        let label = StrategyLabel::new(StrategyKey::ShortStrangle, Provenance::Disambiguated);
        let json = serde_json::to_string(&label).unwrap();
        assert_eq!(
            json,
            r#"{"key":"short_strangle","provenance":"disambiguated"}"#
        );
    }
}
