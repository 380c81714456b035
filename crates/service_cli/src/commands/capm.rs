//! CAPM command implementation
//!
//! Reports the CAPM expected return, the resulting price drift and,
//! when a realised return is given, Jensen's alpha.

use pricer_models::analytics::{capm_alpha, capm_expected_return, drift_from_mode, CapmInput};
use pricer_models::instruments::DriftMode;
use serde::Serialize;

use super::{emit, fmt_opt, print_rows, Context};
use crate::Result;

/// CAPM flags; omitted values come from `[capm]`.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CapmArgs {
    /// Asset beta
    #[arg(short, long)]
    pub beta: Option<f64>,

    /// Risk-free rate
    #[arg(long)]
    pub risk_free: Option<f64>,

    /// Equity risk premium (takes precedence over --market-return)
    #[arg(long)]
    pub erp: Option<f64>,

    /// Expected market return
    #[arg(long)]
    pub market_return: Option<f64>,

    /// Realised return, for alpha
    #[arg(long)]
    pub realized: Option<f64>,

    /// Dividend yield used to turn the return into a price drift
    #[arg(short = 'q', long)]
    pub dividend_yield: Option<f64>,
}

impl CapmArgs {
    fn input(&self, defaults: &CapmInput) -> CapmInput {
        CapmInput {
            risk_free: self.risk_free.unwrap_or(defaults.risk_free),
            beta: self.beta.unwrap_or(defaults.beta),
            equity_risk_premium: self.erp.or(defaults.equity_risk_premium),
            market_return: self.market_return.or(defaults.market_return),
        }
    }
}

#[derive(Debug, Serialize)]
struct CapmReport {
    input: CapmInput,
    expected_return: f64,
    drift: f64,
    alpha: Option<f64>,
}

/// Run the capm command
pub fn run(ctx: &Context, args: &CapmArgs) -> Result<()> {
    let input = args.input(&ctx.config.capm);
    let expected_return = capm_expected_return(&input)?;
    let alpha = args
        .realized
        .map(|realized| capm_alpha(realized, &input))
        .transpose()?;
    let dividend_yield = args
        .dividend_yield
        .unwrap_or(ctx.config.market.dividend_yield);
    let drift = drift_from_mode(
        DriftMode::Capm {
            expected_return: Some(expected_return),
        },
        input.risk_free,
        dividend_yield,
    );

    let report = CapmReport {
        input,
        expected_return,
        drift,
        alpha,
    };
    emit(ctx.format, &report, |r| {
        print_rows(&[
            ("beta", format!("{:.4}", r.input.beta)),
            ("risk-free", format!("{:.4}", r.input.risk_free)),
            ("expected return", format!("{:.4}", r.expected_return)),
            ("price drift", format!("{:.4}", r.drift)),
            ("alpha", fmt_opt(r.alpha)),
        ]);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let defaults = CapmInput {
            risk_free: 0.03,
            beta: 1.0,
            equity_risk_premium: Some(0.05),
            market_return: None,
        };
        let args = CapmArgs {
            beta: Some(1.4),
            ..Default::default()
        };
        let input = args.input(&defaults);
        assert_eq!(input.beta, 1.4);
        assert_eq!(input.risk_free, 0.03);
        assert_eq!(input.equity_risk_premium, Some(0.05));
    }
}
