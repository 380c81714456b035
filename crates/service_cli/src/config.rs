//! CLI configuration management
//!
//! Layers, lowest priority first:
//! 1. Built-in defaults
//! 2. TOML file (`strategy-lab.toml`, or the `--config` path)
//! 3. Environment variables prefixed `STRATEGY_LAB__`, with `__` between
//!    section and key (`STRATEGY_LAB__MARKET__RATE=0.045`)
//!
//! Command-line flags override all of these per invocation.

use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use pricer_models::analytical::ImpliedVolConfig;
use pricer_models::analytics::CapmInput;
use pricer_models::instruments::DriftMode;
use pricer_models::strategy::BreakEvenConfig;
use serde::Deserialize;
use thiserror::Error;

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = "strategy-lab.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "STRATEGY_LAB";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },

    #[error("Configuration source error: {0}")]
    Source(#[from] config::ConfigError),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Market defaults used when a flag is omitted.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarketDefaults {
    /// Continuously compounded risk-free rate
    pub rate: f64,
    /// Continuous dividend yield or borrow cost
    pub dividend_yield: f64,
    /// Annualised volatility
    pub volatility: f64,
    /// Time to expiry in years
    pub expiry: f64,
    /// Drift of the real-world terminal distribution
    pub drift: DriftMode,
}

impl Default for MarketDefaults {
    fn default() -> Self {
        Self {
            rate: 0.04,
            dividend_yield: 0.0,
            volatility: 0.2,
            expiry: 30.0 / 365.0,
            drift: DriftMode::RiskNeutral,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Table or JSON
    pub format: OutputFormat,
    /// Default tracing level when RUST_LOG is unset
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

/// Solver overrides.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Implied volatility tunables
    pub implied_vol: ImpliedVolConfig,
    /// Numeric break-even tunables
    pub break_even: BreakEvenConfig,
}

/// Full CLI configuration
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// `[market]`
    pub market: MarketDefaults,
    /// `[capm]`
    pub capm: CapmInput,
    /// `[output]`
    pub output: OutputConfig,
    /// `[solver]`
    pub solver: SolverConfig,
}

impl CliConfig {
    /// Load configuration from the layered sources.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let config: CliConfig = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = config::Config::builder()
            .add_source(config::File::from_str(content, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let market = &self.market;
        check("market.rate", market.rate.is_finite(), "must be finite")?;
        check(
            "market.dividend_yield",
            market.dividend_yield.is_finite(),
            "must be finite",
        )?;
        check(
            "market.volatility",
            market.volatility.is_finite() && market.volatility >= 0.0,
            "must be finite and non-negative",
        )?;
        check(
            "market.expiry",
            market.expiry.is_finite() && market.expiry >= 0.0,
            "must be finite and non-negative",
        )?;
        check("capm.beta", self.capm.beta.is_finite(), "must be finite")?;

        let iv = &self.solver.implied_vol;
        check(
            "solver.implied_vol.tolerance",
            iv.tolerance > 0.0,
            "must be positive",
        )?;
        check(
            "solver.implied_vol.initial_vol",
            iv.initial_vol > 0.0,
            "must be positive",
        )?;
        check(
            "solver.implied_vol.min_vol",
            iv.min_vol > 0.0 && iv.min_vol < iv.max_vol,
            "must be positive and below max_vol",
        )?;
        check(
            "solver.implied_vol.bracket_growth",
            iv.bracket_growth > 1.0,
            "must exceed 1",
        )?;
        check(
            "solver.implied_vol.max_newton_iterations",
            iv.max_newton_iterations > 0 && iv.max_bisection_iterations > 0,
            "iteration budgets must be positive",
        )?;

        let be = &self.solver.break_even;
        check(
            "solver.break_even.samples",
            be.samples >= 2,
            "must be at least 2",
        )?;
        check(
            "solver.break_even.tolerance",
            be.tolerance > 0.0,
            "must be positive",
        )?;
        check(
            "solver.break_even.widen_factors",
            be.widen_factors.iter().all(|f| f.is_finite() && *f >= 0.0),
            "must be finite and non-negative",
        )?;

        Ok(())
    }
}

fn check(key: &'static str, ok: bool, message: &str) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            key,
            message: message.to_string(),
        })
    }
}
