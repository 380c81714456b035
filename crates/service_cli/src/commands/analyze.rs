//! Analyze command implementation
//!
//! One report per strategy: break-even, payoff extremes, model value and
//! Greeks, expected profit and probability of profit.

use std::path::Path;

use pricer_models::analytics::{
    market_drift, strategy_expected_profit, strategy_prob_of_profit, value_strategy,
    StrategyValuation,
};
use pricer_models::instruments::{payoff_extremes, PayoffExtremes};
use pricer_models::strategy::{BreakEvenResult, BreakEvenSolver};
use serde::Serialize;
use tracing::info;

use super::breakeven::break_even_rows;
use super::{emit, fmt_opt, load_strategy, print_rows, Context, MarketArgs};
use crate::Result;

#[derive(Debug, Serialize)]
struct AnalysisReport {
    break_even: BreakEvenResult,
    extremes: PayoffExtremes,
    valuation: StrategyValuation,
    drift: f64,
    expected_profit: f64,
    prob_of_profit: f64,
}

/// Run the analyze command
pub fn run(ctx: &Context, file: &Path, strategy: Option<&str>, market: &MarketArgs) -> Result<()> {
    let loaded = load_strategy(file)?;
    let bundle = &loaded.legs;
    let explicit = strategy.or(loaded.strategy.as_deref());
    let market = market.context(&ctx.config)?;
    info!(legs = bundle.len(), spot = market.spot(), "analysing strategy");

    let break_even = BreakEvenSolver::new(ctx.config.solver.break_even.clone()).solve(
        bundle,
        explicit,
        Some(market.spot()),
    );
    let report = AnalysisReport {
        break_even,
        extremes: payoff_extremes(bundle),
        valuation: value_strategy(bundle, &market)?,
        drift: market_drift(&market),
        expected_profit: strategy_expected_profit(bundle, &market)?,
        prob_of_profit: strategy_prob_of_profit(bundle, &market)?,
    };

    emit(ctx.format, &report, print_report)
}

fn print_report(r: &AnalysisReport) {
    let mut rows = break_even_rows(&r.break_even);
    let g = &r.valuation.greeks;
    rows.extend([
        ("max profit", unlimited_or(r.extremes.max_profit)),
        ("max loss", unlimited_or(r.extremes.max_loss)),
        ("net premium", format!("{:.4}", r.valuation.net_premium)),
        ("model value", format!("{:.4}", r.valuation.value)),
        ("delta", format!("{:.4}", g.delta)),
        ("gamma", format!("{:.6}", g.gamma)),
        ("vega (1 vol pt)", format!("{:.4}", g.vega)),
        ("theta (1 day)", format!("{:.4}", g.theta)),
        ("rho", format!("{:.4}", g.rho)),
        ("drift", format!("{:.4}", r.drift)),
        ("expected profit", format!("{:.4}", r.expected_profit)),
        ("prob. of profit", format!("{:.2}%", 100.0 * r.prob_of_profit)),
    ]);
    print_rows(&rows);
}

fn unlimited_or(value: Option<f64>) -> String {
    match value {
        Some(_) => fmt_opt(value),
        None => "unlimited".to_string(),
    }
}
