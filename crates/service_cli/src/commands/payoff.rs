//! Payoff command implementation
//!
//! Samples the expiry payoff of a strategy for charting.

use std::path::Path;

use pricer_models::instruments::{payoff_curve, suggest_bounds, PayoffPoint};
use tracing::info;

use super::{emit, load_strategy, Context};
use crate::{CliError, Result};

/// Run the payoff command
pub fn run(
    ctx: &Context,
    file: &Path,
    lower: Option<f64>,
    upper: Option<f64>,
    samples: usize,
    spot: Option<f64>,
) -> Result<()> {
    let loaded = load_strategy(file)?;
    let (auto_lo, auto_hi) = suggest_bounds(&loaded.legs, spot);
    let lo = lower.unwrap_or(auto_lo);
    let hi = upper.unwrap_or(auto_hi);
    if lo >= hi {
        return Err(CliError::InvalidArgument(format!(
            "Lower bound {} must be below upper bound {}",
            lo, hi
        )));
    }
    info!(lo, hi, samples, "sampling payoff");

    let curve = payoff_curve(&loaded.legs, lo, hi, samples)?;
    emit(ctx.format, &curve, |c| print_curve(c))
}

fn print_curve(curve: &[PayoffPoint]) {
    println!("{:>12}  {:>12}", "spot", "payoff");
    for point in curve {
        println!("{:>12.4}  {:>12.4}", point.spot, point.total);
    }
}
