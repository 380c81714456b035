//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Shared pieces live here:
//! the resolved market flags, strategy file loading and output rendering.

pub mod analyze;
pub mod breakeven;
pub mod capm;
pub mod iv;
pub mod payoff;
pub mod price;

use std::path::Path;

use clap::{Args, ValueEnum};
use pricer_models::analytical::OptionType;
use pricer_models::instruments::{MarketContext, StrategyBundle};
use serde::{Deserialize, Serialize};

use crate::config::{CliConfig, OutputFormat};
use crate::{CliError, Result};

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration
    pub config: CliConfig,
    /// Effective output format
    pub format: OutputFormat,
}

/// Option type flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptionTypeArg {
    Call,
    Put,
}

impl From<OptionTypeArg> for OptionType {
    fn from(arg: OptionTypeArg) -> Self {
        match arg {
            OptionTypeArg::Call => OptionType::Call,
            OptionTypeArg::Put => OptionType::Put,
        }
    }
}

/// Market flags; omitted values come from `[market]`.
#[derive(Debug, Clone, Default, Args)]
pub struct MarketArgs {
    /// Spot price of the underlying
    #[arg(short, long)]
    pub spot: f64,

    /// Annualised volatility (0.25 = 25%)
    #[arg(long)]
    pub vol: Option<f64>,

    /// Time to expiry in years
    #[arg(short = 't', long)]
    pub expiry: Option<f64>,

    /// Continuously compounded risk-free rate
    #[arg(short, long)]
    pub rate: Option<f64>,

    /// Continuous dividend yield or borrow cost
    #[arg(short = 'q', long)]
    pub dividend_yield: Option<f64>,
}

/// Market values after applying configuration defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMarket {
    pub spot: f64,
    pub volatility: f64,
    pub expiry: f64,
    pub rate: f64,
    pub dividend_yield: f64,
}

impl MarketArgs {
    /// Fill omitted flags from the configuration.
    pub fn resolve(&self, config: &CliConfig) -> ResolvedMarket {
        let defaults = &config.market;
        ResolvedMarket {
            spot: self.spot,
            volatility: self.vol.unwrap_or(defaults.volatility),
            expiry: self.expiry.unwrap_or(defaults.expiry),
            rate: self.rate.unwrap_or(defaults.rate),
            dividend_yield: self.dividend_yield.unwrap_or(defaults.dividend_yield),
        }
    }

    /// Build a validated market context with the configured drift mode.
    pub fn context(&self, config: &CliConfig) -> Result<MarketContext> {
        let m = self.resolve(config);
        let market = MarketContext::new(m.spot, m.volatility, m.expiry, m.rate, m.dividend_yield)?
            .with_drift(config.market.drift);
        Ok(market)
    }
}

/// Contents of a strategy file.
///
/// ```toml
/// strategy = "iron condor"
///
/// [[legs]]
/// type = "put"
/// side = "long"
/// strike = 85.0
/// premium = 0.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyFile {
    /// Optional strategy name, resolved through the alias table
    #[serde(default)]
    pub strategy: Option<String>,
    /// Legs of the strategy
    pub legs: StrategyBundle,
}

/// Load a strategy file; JSON or TOML by extension.
pub fn load_strategy(path: &Path) -> Result<StrategyFile> {
    let shown = path.display().to_string();
    if !path.exists() {
        return Err(CliError::FileNotFound(shown));
    }
    let content = std::fs::read_to_string(path)?;
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let parsed = match extension.as_deref() {
        Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
        Some("json") | None => serde_json::from_str(&content).map_err(|e| e.to_string()),
        Some(other) => {
            return Err(CliError::InvalidArgument(format!(
                "Unsupported strategy file extension: {}. Supported: json, toml",
                other
            )))
        }
    };
    let file: StrategyFile = parsed.map_err(|message| CliError::StrategyFile {
        path: shown.clone(),
        message,
    })?;
    tracing::debug!(path = %shown, legs = file.legs.len(), "loaded strategy file");
    Ok(file)
}

/// Print `value` as JSON, or run `table` for the table format.
pub fn emit<T, F>(format: OutputFormat, value: &T, table: F) -> Result<()>
where
    T: Serialize,
    F: FnOnce(&T),
{
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
        OutputFormat::Table => table(value),
    }
    Ok(())
}

/// Format an optional number for table output.
pub fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
}

/// Format a list of break-even prices for table output.
pub fn fmt_roots(roots: Option<&[f64]>) -> String {
    match roots {
        Some(roots) if !roots.is_empty() => roots
            .iter()
            .map(|r| format!("{:.4}", r))
            .collect::<Vec<_>>()
            .join(", "),
        _ => "none".to_string(),
    }
}

/// Print a two-column table.
pub fn print_rows(rows: &[(&str, String)]) {
    let width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    for (key, value) in rows {
        println!("{:<width$}  {}", key, value, width = width);
    }
}
