//! Free-form strategy names to canonical keys.
//!
//! Names are canonicalised by lowercasing and dropping spaces, hyphens and
//! underscores, then looked up in a fixed alias table. "Iron-Condor",
//! "iron condor" and "iron_condor" all resolve to [`StrategyKey::IronCondor`].

use super::key::StrategyKey;

/// Canonicalised alias → key. Every canonical key appears in its
/// separator-free form.
const ALIASES: &[(&str, StrategyKey)] = &[
    // Single options
    ("longcall", StrategyKey::LongCall),
    ("call", StrategyKey::LongCall),
    ("buycall", StrategyKey::LongCall),
    ("leaps", StrategyKey::LongCall),
    ("leap", StrategyKey::LongCall),
    ("shortcall", StrategyKey::ShortCall),
    ("nakedcall", StrategyKey::ShortCall),
    ("sellcall", StrategyKey::ShortCall),
    ("uncoveredcall", StrategyKey::ShortCall),
    ("longput", StrategyKey::LongPut),
    ("put", StrategyKey::LongPut),
    ("buyput", StrategyKey::LongPut),
    ("shortput", StrategyKey::ShortPut),
    ("nakedput", StrategyKey::ShortPut),
    ("sellput", StrategyKey::ShortPut),
    ("cashsecuredput", StrategyKey::ShortPut),
    ("csp", StrategyKey::ShortPut),
    // Stock
    ("longstock", StrategyKey::LongStock),
    ("stock", StrategyKey::LongStock),
    ("shortstock", StrategyKey::ShortStock),
    ("coveredcall", StrategyKey::CoveredCall),
    ("buywrite", StrategyKey::CoveredCall),
    ("protectiveput", StrategyKey::ProtectivePut),
    ("marriedput", StrategyKey::ProtectivePut),
    ("collar", StrategyKey::Collar),
    ("protectivecollar", StrategyKey::Collar),
    // Verticals
    ("bullcallspread", StrategyKey::BullCallSpread),
    ("bullcall", StrategyKey::BullCallSpread),
    ("longcallspread", StrategyKey::BullCallSpread),
    ("calldebitspread", StrategyKey::BullCallSpread),
    ("bearcallspread", StrategyKey::BearCallSpread),
    ("bearcall", StrategyKey::BearCallSpread),
    ("shortcallspread", StrategyKey::BearCallSpread),
    ("callcreditspread", StrategyKey::BearCallSpread),
    ("bullputspread", StrategyKey::BullPutSpread),
    ("bullput", StrategyKey::BullPutSpread),
    ("shortputspread", StrategyKey::BullPutSpread),
    ("putcreditspread", StrategyKey::BullPutSpread),
    ("bearputspread", StrategyKey::BearPutSpread),
    ("bearput", StrategyKey::BearPutSpread),
    ("longputspread", StrategyKey::BearPutSpread),
    ("putdebitspread", StrategyKey::BearPutSpread),
    // Volatility
    ("longstraddle", StrategyKey::LongStraddle),
    ("straddle", StrategyKey::LongStraddle),
    ("shortstraddle", StrategyKey::ShortStraddle),
    ("longstrangle", StrategyKey::LongStrangle),
    ("strangle", StrategyKey::LongStrangle),
    ("shortstrangle", StrategyKey::ShortStrangle),
    // Wings
    ("ironbutterfly", StrategyKey::IronButterfly),
    ("ironfly", StrategyKey::IronButterfly),
    ("shortironbutterfly", StrategyKey::IronButterfly),
    ("ironcondor", StrategyKey::IronCondor),
    ("condor", StrategyKey::IronCondor),
    ("shortironcondor", StrategyKey::IronCondor),
    ("longcallbutterfly", StrategyKey::LongCallButterfly),
    ("callbutterfly", StrategyKey::LongCallButterfly),
    ("butterfly", StrategyKey::LongCallButterfly),
    ("longputbutterfly", StrategyKey::LongPutButterfly),
    ("putbutterfly", StrategyKey::LongPutButterfly),
    // Time and ratio
    ("calendarspread", StrategyKey::CalendarSpread),
    ("calendar", StrategyKey::CalendarSpread),
    ("horizontalspread", StrategyKey::CalendarSpread),
    ("timespread", StrategyKey::CalendarSpread),
    ("diagonalspread", StrategyKey::DiagonalSpread),
    ("diagonal", StrategyKey::DiagonalSpread),
    ("ratiocallspread", StrategyKey::RatioCallSpread),
    ("callratiospread", StrategyKey::RatioCallSpread),
    ("ratiospread", StrategyKey::RatioCallSpread),
    ("ratioputspread", StrategyKey::RatioPutSpread),
    ("putratiospread", StrategyKey::RatioPutSpread),
    ("boxspread", StrategyKey::BoxSpread),
    ("box", StrategyKey::BoxSpread),
];

/// Lowercases and strips spaces, hyphens and underscores.
///
/// # Examples
/// ```
/// use pricer_models::strategy::canonicalize;
///
/// assert_eq!(canonicalize(" Iron-Condor "), "ironcondor");
/// assert_eq!(canonicalize("bull_call spread"), "bullcallspread");
/// ```
pub fn canonicalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolves a free-form strategy name; `None` if unknown.
///
/// # Examples
/// ```
/// use pricer_models::strategy::{normalize_strategy_key, StrategyKey};
///
/// assert_eq!(normalize_strategy_key("LEAPS"), Some(StrategyKey::LongCall));
/// assert_eq!(normalize_strategy_key("Iron Condor"), Some(StrategyKey::IronCondor));
/// assert_eq!(normalize_strategy_key("jade lizard"), None);
/// ```
pub fn normalize_strategy_key(raw: &str) -> Option<StrategyKey> {
    let canonical = canonicalize(raw);
    if canonical.is_empty() {
        return None;
    }
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == canonical)
        .map(|(_, key)| *key)
}

/// Number of entries in the alias table.
pub fn alias_count() -> usize {
    ALIASES.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_canonical_key_resolves() {
        for key in StrategyKey::ALL {
            assert_eq!(normalize_strategy_key(key.as_str()), Some(key), "{}", key);
        }
    }

    #[test]
    fn test_separator_and_case_insensitive() {
        for raw in ["short straddle", "Short-Straddle", "SHORT_STRADDLE", "shortstraddle"] {
            assert_eq!(normalize_strategy_key(raw), Some(StrategyKey::ShortStraddle));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(normalize_strategy_key("leaps"), Some(StrategyKey::LongCall));
        assert_eq!(normalize_strategy_key("ironcondor"), Some(StrategyKey::IronCondor));
        assert_eq!(normalize_strategy_key("Iron Fly"), Some(StrategyKey::IronButterfly));
        assert_eq!(normalize_strategy_key("put credit spread"), Some(StrategyKey::BullPutSpread));
        assert_eq!(normalize_strategy_key("buy-write"), Some(StrategyKey::CoveredCall));
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(normalize_strategy_key(""), None);
        assert_eq!(normalize_strategy_key(" - _ "), None);
        assert_eq!(normalize_strategy_key("christmas tree"), None);
    }

    #[test]
    fn test_table_size_and_uniqueness() {
        assert!(alias_count() > 40);
        let mut aliases: Vec<&str> = ALIASES.iter().map(|(a, _)| *a).collect();
        aliases.sort_unstable();
        aliases.dedup();
        assert_eq!(aliases.len(), ALIASES.len());
        for (alias, _) in ALIASES {
            assert_eq!(canonicalize(alias), *alias);
        }
    }
}
