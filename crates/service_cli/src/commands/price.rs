//! Price command implementation
//!
//! Prices a single European option and reports its Greeks.

use pricer_models::analytical::{call_greeks, put_greeks, BsmParams, OptionType, PricingResult};
use serde::Serialize;
use tracing::info;

use super::{emit, print_rows, Context, MarketArgs, OptionTypeArg};
use crate::Result;

#[derive(Debug, Serialize)]
struct PriceReport {
    option_type: OptionType,
    inputs: BsmParams,
    #[serde(flatten)]
    result: PricingResult,
}

/// Run the price command
pub fn run(ctx: &Context, option_type: OptionTypeArg, strike: f64, market: &MarketArgs) -> Result<()> {
    let m = market.resolve(&ctx.config);
    let params = BsmParams {
        spot: m.spot,
        strike,
        expiry: m.expiry,
        volatility: m.volatility,
        rate: m.rate,
        dividend_yield: m.dividend_yield,
    };
    let option_type = OptionType::from(option_type);
    info!(%option_type, strike, spot = m.spot, "pricing option");

    let result = match option_type {
        OptionType::Call => call_greeks(&params)?,
        OptionType::Put => put_greeks(&params)?,
    };

    let report = PriceReport {
        option_type,
        inputs: params,
        result,
    };
    emit(ctx.format, &report, |r| {
        let g = &r.result.greeks;
        print_rows(&[
            ("option", format!("{} K={}", r.option_type, r.inputs.strike)),
            ("price", format!("{:.4}", r.result.price)),
            ("delta", format!("{:.4}", g.delta)),
            ("gamma", format!("{:.6}", g.gamma)),
            ("vega (1 vol pt)", format!("{:.4}", g.vega)),
            ("theta (1 day)", format!("{:.4}", g.theta)),
            ("rho", format!("{:.4}", g.rho)),
        ]);
    })
}
