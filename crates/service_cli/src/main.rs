//! strategy-lab - Command Line Operations for Option Strategies
//!
//! This is the operational entry point for the strategy analytics engine.
//!
//! # Commands
//!
//! - `strategy-lab price` - Price a European option with Greeks
//! - `strategy-lab iv` - Implied volatility from a quoted price
//! - `strategy-lab breakeven <file>` - Break-even prices of a strategy
//! - `strategy-lab analyze <file>` - Break-even, extremes, Greeks and expected value
//! - `strategy-lab payoff <file>` - Sampled payoff diagram
//! - `strategy-lab capm` - CAPM expected return, drift and alpha
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires configuration and
//! logging around `pricer_models`; no analytics live here.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;

use commands::{capm::CapmArgs, Context, MarketArgs, OptionTypeArg};
use config::{CliConfig, LogLevel, OutputFormat};
pub use error::{CliError, Result};

/// Option strategy pricing and break-even analysis
#[derive(Parser)]
#[command(name = "strategy-lab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format (overrides [output].format)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European option and report its Greeks
    Price {
        /// Call or put
        #[arg(long = "type", value_enum)]
        option_type: OptionTypeArg,

        /// Strike price
        #[arg(short = 'k', long)]
        strike: f64,

        #[command(flatten)]
        market: MarketArgs,
    },

    /// Solve for the implied volatility of a quoted price
    Iv {
        /// Call or put
        #[arg(long = "type", value_enum)]
        option_type: OptionTypeArg,

        /// Strike price
        #[arg(short = 'k', long)]
        strike: f64,

        /// Quoted option price (mid)
        #[arg(short, long)]
        price: f64,

        /// Starting volatility guess
        #[arg(long)]
        initial_vol: Option<f64>,

        #[command(flatten)]
        market: MarketArgs,
    },

    /// Break-even prices of a strategy file
    Breakeven {
        /// Strategy file (JSON or TOML)
        file: PathBuf,

        /// Strategy name, overriding the one in the file
        #[arg(long)]
        strategy: Option<String>,

        /// Spot price, widens the numeric search range
        #[arg(long)]
        spot: Option<f64>,
    },

    /// Full analysis of a strategy file under a market
    Analyze {
        /// Strategy file (JSON or TOML)
        file: PathBuf,

        /// Strategy name, overriding the one in the file
        #[arg(long)]
        strategy: Option<String>,

        #[command(flatten)]
        market: MarketArgs,
    },

    /// Sample the payoff at expiry of a strategy file
    Payoff {
        /// Strategy file (JSON or TOML)
        file: PathBuf,

        /// Lowest terminal price (default: suggested bound)
        #[arg(long)]
        lower: Option<f64>,

        /// Highest terminal price (default: suggested bound)
        #[arg(long)]
        upper: Option<f64>,

        /// Number of samples
        #[arg(short = 'n', long, default_value = "41")]
        samples: usize,

        /// Spot price to include in the suggested bounds
        #[arg(long)]
        spot: Option<f64>,
    },

    /// CAPM expected return, price drift and alpha
    Capm(CapmArgs),
}

fn init_tracing(level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        config.output.log_level
    };
    init_tracing(level);
    debug!(?config, "configuration loaded");

    let ctx = Context {
        format: cli.format.unwrap_or(config.output.format),
        config,
    };

    match cli.command {
        Commands::Price {
            option_type,
            strike,
            market,
        } => commands::price::run(&ctx, option_type, strike, &market),
        Commands::Iv {
            option_type,
            strike,
            price,
            initial_vol,
            market,
        } => commands::iv::run(&ctx, option_type, strike, price, initial_vol, &market),
        Commands::Breakeven {
            file,
            strategy,
            spot,
        } => commands::breakeven::run(&ctx, &file, strategy.as_deref(), spot),
        Commands::Analyze {
            file,
            strategy,
            market,
        } => commands::analyze::run(&ctx, &file, strategy.as_deref(), &market),
        Commands::Payoff {
            file,
            lower,
            upper,
            samples,
            spot,
        } => commands::payoff::run(&ctx, &file, lower, upper, samples, spot),
        Commands::Capm(args) => commands::capm::run(&ctx, &args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_price() {
        let cli = Cli::try_parse_from([
            "strategy-lab",
            "price",
            "--type",
            "call",
            "--strike",
            "105",
            "--spot",
            "100",
            "--vol",
            "0.25",
        ])
        .unwrap();
        match cli.command {
            Commands::Price {
                option_type,
                strike,
                market,
            } => {
                assert_eq!(option_type, OptionTypeArg::Call);
                assert_eq!(strike, 105.0);
                assert_eq!(market.spot, 100.0);
                assert_eq!(market.vol, Some(0.25));
                assert_eq!(market.rate, None);
            }
            _ => panic!("expected price command"),
        }
    }

    #[test]
    fn test_parse_breakeven_with_global_flags() {
        let cli = Cli::try_parse_from([
            "strategy-lab",
            "breakeven",
            "legs.json",
            "--strategy",
            "iron condor",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Breakeven { .. }));
    }
}
