//! Break-even command implementation
//!
//! Loads a strategy file and reports its break-even prices together with how
//! they were obtained.

use std::path::Path;

use pricer_models::strategy::{BreakEvenResult, BreakEvenSolver};
use tracing::info;

use super::{emit, fmt_roots, load_strategy, print_rows, Context};
use crate::Result;

/// Run the breakeven command
pub fn run(ctx: &Context, file: &Path, strategy: Option<&str>, spot: Option<f64>) -> Result<()> {
    let loaded = load_strategy(file)?;
    let explicit = strategy.or(loaded.strategy.as_deref());
    info!(legs = loaded.legs.len(), explicit, "solving break-even");

    let solver = BreakEvenSolver::new(ctx.config.solver.break_even.clone());
    let result = solver.solve(&loaded.legs, explicit, spot);

    emit(ctx.format, &result, print_break_even)
}

/// Table rows shared with the analyze command.
pub(crate) fn break_even_rows(result: &BreakEvenResult) -> Vec<(&'static str, String)> {
    vec![
        ("break-even", fmt_roots(result.be.as_deref())),
        (
            "strategy",
            result
                .meta
                .used
                .map_or_else(|| "unrecognised".to_string(), |k| k.to_string()),
        ),
        (
            "resolved by",
            result
                .meta
                .resolved_by
                .map_or_else(|| "-".to_string(), |p| p.to_string()),
        ),
        ("method", result.meta.method.to_string()),
    ]
}

fn print_break_even(result: &BreakEvenResult) {
    print_rows(&break_even_rows(result));
}
