//! Implied volatility command implementation

use pricer_models::analytical::{ImpliedVolInput, ImpliedVolSolver, OptionType};
use serde::Serialize;
use tracing::info;

use super::{emit, fmt_opt, print_rows, Context, MarketArgs, OptionTypeArg};
use crate::Result;

#[derive(Debug, Serialize)]
struct IvReport {
    input: ImpliedVolInput,
    implied_vol: Option<f64>,
}

/// Run the iv command
pub fn run(
    ctx: &Context,
    option_type: OptionTypeArg,
    strike: f64,
    price: f64,
    initial_vol: Option<f64>,
    market: &MarketArgs,
) -> Result<()> {
    let m = market.resolve(&ctx.config);
    let input = ImpliedVolInput {
        option_type: OptionType::from(option_type),
        price,
        spot: m.spot,
        strike,
        expiry: m.expiry,
        rate: m.rate,
        dividend_yield: m.dividend_yield,
        initial_vol,
    };
    info!(price, strike, "solving implied volatility");

    let solver = ImpliedVolSolver::new(ctx.config.solver.implied_vol);
    let implied_vol = solver.solve(&input)?;
    if implied_vol.is_none() {
        info!("no implied volatility reproduces the price");
    }

    let report = IvReport { input, implied_vol };
    emit(ctx.format, &report, |r| {
        print_rows(&[
            (
                "option",
                format!("{} K={} T={:.4}", r.input.option_type, r.input.strike, r.input.expiry),
            ),
            ("price", format!("{:.4}", r.input.price)),
            ("implied vol", fmt_opt(r.implied_vol)),
        ]);
    })
}
