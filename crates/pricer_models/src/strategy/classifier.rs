//! Leg-pattern strategy inference.
//!
//! A bundle is first reduced to a `LegShape` (leg count × side × strike
//! relation), then the shape is matched exhaustively to a key. Shapes with no
//! unambiguous name (iron condors, calendars, ratios) infer to `None` and are
//! only recognised when a key is supplied explicitly.

use std::cmp::Ordering;

use super::aliases::normalize_strategy_key;
use super::key::{Provenance, StrategyKey, StrategyLabel};
use crate::analytical::OptionType;
use crate::instruments::{LegKind, OptionLeg, Side, StrategyBundle};

/// Strikes closer than this compare equal.
pub const STRIKE_TOLERANCE: f64 = 1e-8;

/// What a leg holds, without the strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Holding {
    Stock,
    Call,
    Put,
}

#[derive(Debug, Clone, Copy)]
struct LegView {
    holding: Holding,
    side: Side,
    strike: f64,
}

impl LegView {
    fn of(leg: &OptionLeg) -> Self {
        let (holding, strike) = match leg.kind() {
            LegKind::Stock => (Holding::Stock, 0.0),
            LegKind::Call { strike } => (Holding::Call, strike),
            LegKind::Put { strike } => (Holding::Put, strike),
        };
        Self {
            holding,
            side: leg.side(),
            strike,
        }
    }

    fn option_type(&self) -> Option<OptionType> {
        match self.holding {
            Holding::Call => Some(OptionType::Call),
            Holding::Put => Some(OptionType::Put),
            Holding::Stock => None,
        }
    }
}

/// Put strike relative to call strike in a call + put pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StrikeRelation {
    Equal,
    PutBelow,
    PutAbove,
}

fn relation(put_strike: f64, call_strike: f64) -> StrikeRelation {
    if (put_strike - call_strike).abs() <= STRIKE_TOLERANCE {
        StrikeRelation::Equal
    } else if put_strike < call_strike {
        StrikeRelation::PutBelow
    } else {
        StrikeRelation::PutAbove
    }
}

fn strictly_below(a: f64, b: f64) -> bool {
    b - a > STRIKE_TOLERANCE
}

/// Structural shape of a bundle with uniform quantities.
#[derive(Debug, Clone, Copy, PartialEq)]
enum LegShape {
    Single {
        holding: Holding,
        side: Side,
    },
    /// Two options of one type on opposite sides at distinct strikes.
    Vertical {
        option_type: OptionType,
        lower_side: Side,
    },
    /// A call and a put on the same side.
    CallPut {
        side: Side,
        relation: StrikeRelation,
    },
    StockOption {
        stock_side: Side,
        option_type: OptionType,
        option_side: Side,
    },
    /// Long stock, long lower put, short higher call.
    Collar,
    /// Short call and put at one strike, long wings strictly outside.
    IronButterfly,
    Unrecognized,
}

fn leg_shape(bundle: &StrategyBundle) -> LegShape {
    match bundle.uniform_quantity() {
        Some(qty) if qty > 0.0 => {}
        _ => return LegShape::Unrecognized,
    }

    let mut views: Vec<LegView> = bundle.iter().map(LegView::of).collect();
    views.sort_by(|a, b| {
        a.holding
            .cmp(&b.holding)
            .then_with(|| a.strike.partial_cmp(&b.strike).unwrap_or(Ordering::Equal))
    });

    match views.as_slice() {
        [leg] => LegShape::Single {
            holding: leg.holding,
            side: leg.side,
        },
        [lower, upper] if lower.holding == upper.holding && lower.holding != Holding::Stock => {
            match lower.option_type() {
                Some(option_type)
                    if lower.side != upper.side && strictly_below(lower.strike, upper.strike) =>
                {
                    LegShape::Vertical {
                        option_type,
                        lower_side: lower.side,
                    }
                }
                _ => LegShape::Unrecognized,
            }
        }
        [call, put] if call.holding == Holding::Call && put.holding == Holding::Put => {
            if call.side == put.side {
                LegShape::CallPut {
                    side: call.side,
                    relation: relation(put.strike, call.strike),
                }
            } else {
                LegShape::Unrecognized
            }
        }
        [stock, option] if stock.holding == Holding::Stock => match option.option_type() {
            Some(option_type) => LegShape::StockOption {
                stock_side: stock.side,
                option_type,
                option_side: option.side,
            },
            None => LegShape::Unrecognized,
        },
        [stock, call, put]
            if stock.holding == Holding::Stock
                && stock.side == Side::Long
                && call.holding == Holding::Call
                && call.side == Side::Short
                && put.holding == Holding::Put
                && put.side == Side::Long
                && strictly_below(put.strike, call.strike) =>
        {
            LegShape::Collar
        }
        [c_low, c_high, p_low, p_high]
            if c_low.holding == Holding::Call
                && c_high.holding == Holding::Call
                && p_low.holding == Holding::Put
                && p_high.holding == Holding::Put
                && c_low.side == Side::Short
                && p_high.side == Side::Short
                && c_high.side == Side::Long
                && p_low.side == Side::Long
                && relation(p_high.strike, c_low.strike) == StrikeRelation::Equal
                && strictly_below(p_low.strike, p_high.strike)
                && strictly_below(c_low.strike, c_high.strike) =>
        {
            LegShape::IronButterfly
        }
        _ => LegShape::Unrecognized,
    }
}

/// Recognises a strategy from its legs.
///
/// Order-independent. Requires every leg to carry the same positive
/// quantity, so ratio spreads infer to `None`.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionLeg, Side, StrategyBundle};
/// use pricer_models::strategy::{infer_strategy, StrategyKey};
///
/// let bundle = StrategyBundle::new(vec![
///     OptionLeg::put(Side::Short, 95.0, 2.0).unwrap(),
///     OptionLeg::put(Side::Long, 90.0, 1.0).unwrap(),
/// ]);
/// assert_eq!(infer_strategy(&bundle), Some(StrategyKey::BullPutSpread));
/// ```
pub fn infer_strategy(bundle: &StrategyBundle) -> Option<StrategyKey> {
    use OptionType::{Call, Put};
    use Side::{Long, Short};

    let key = match leg_shape(bundle) {
        LegShape::Single { holding, side } => match (holding, side) {
            (Holding::Call, Long) => StrategyKey::LongCall,
            (Holding::Call, Short) => StrategyKey::ShortCall,
            (Holding::Put, Long) => StrategyKey::LongPut,
            (Holding::Put, Short) => StrategyKey::ShortPut,
            (Holding::Stock, Long) => StrategyKey::LongStock,
            (Holding::Stock, Short) => StrategyKey::ShortStock,
        },
        LegShape::Vertical {
            option_type,
            lower_side,
        } => match (option_type, lower_side) {
            (Call, Long) => StrategyKey::BullCallSpread,
            (Call, Short) => StrategyKey::BearCallSpread,
            (Put, Long) => StrategyKey::BullPutSpread,
            (Put, Short) => StrategyKey::BearPutSpread,
        },
        LegShape::CallPut { side, relation } => match (side, relation) {
            (Long, StrikeRelation::Equal) => StrategyKey::LongStraddle,
            (Short, StrikeRelation::Equal) => StrategyKey::ShortStraddle,
            (Long, StrikeRelation::PutBelow) => StrategyKey::LongStrangle,
            (Short, StrikeRelation::PutBelow) => StrategyKey::ShortStrangle,
            (_, StrikeRelation::PutAbove) => return None,
        },
        LegShape::StockOption {
            stock_side,
            option_type,
            option_side,
        } => match (stock_side, option_type, option_side) {
            (Long, Call, Short) => StrategyKey::CoveredCall,
            (Long, Put, Long) => StrategyKey::ProtectivePut,
            _ => return None,
        },
        LegShape::Collar => StrategyKey::Collar,
        LegShape::IronButterfly => StrategyKey::IronButterfly,
        LegShape::Unrecognized => return None,
    };
    Some(key)
}

/// Reclassifies a straddle whose call and put strikes differ as the
/// strangle on the same side. Other keys pass through unchanged.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{OptionLeg, Side, StrategyBundle};
/// use pricer_models::strategy::{disambiguate_straddle, StrategyKey};
///
/// let bundle = StrategyBundle::new(vec![
///     OptionLeg::call(Side::Short, 105.0, 2.0).unwrap(),
///     OptionLeg::put(Side::Short, 95.0, 1.5).unwrap(),
/// ]);
/// assert_eq!(
///     disambiguate_straddle(StrategyKey::ShortStraddle, &bundle),
///     StrategyKey::ShortStrangle
/// );
/// ```
pub fn disambiguate_straddle(key: StrategyKey, bundle: &StrategyBundle) -> StrategyKey {
    let strangle = match key {
        StrategyKey::LongStraddle => StrategyKey::LongStrangle,
        StrategyKey::ShortStraddle => StrategyKey::ShortStrangle,
        other => return other,
    };

    let strikes_of = |wanted: OptionType| -> Vec<f64> {
        bundle
            .iter()
            .filter(|leg| leg.option_type() == Some(wanted))
            .filter_map(OptionLeg::strike)
            .collect()
    };
    let calls = strikes_of(OptionType::Call);
    let puts = strikes_of(OptionType::Put);

    let mismatched = calls.iter().any(|c| {
        puts.iter()
            .any(|p| relation(*p, *c) != StrikeRelation::Equal)
    });
    if mismatched {
        tracing::debug!(from = %key, to = %strangle, "straddle strikes differ, reclassifying");
        strangle
    } else {
        key
    }
}

/// Resolves the strategy label for a bundle.
///
/// An explicit name is normalised and, for straddles, disambiguated
/// against the strikes. An unknown or absent name falls back to inference.
pub fn classify(bundle: &StrategyBundle, explicit: Option<&str>) -> Option<StrategyLabel> {
    if let Some(raw) = explicit {
        match normalize_strategy_key(raw) {
            Some(key) => {
                let resolved = disambiguate_straddle(key, bundle);
                let provenance = if resolved == key {
                    Provenance::Explicit
                } else {
                    Provenance::Disambiguated
                };
                return Some(StrategyLabel::new(resolved, provenance));
            }
            None => tracing::debug!(name = raw, "unknown strategy name, inferring from legs"),
        }
    }
    infer_strategy(bundle).map(|key| StrategyLabel::new(key, Provenance::Inferred))
}
