//! Serializable run configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use siglab_core::engine::{SimConfig, DEFAULT_COMMISSION_RATE, DEFAULT_INITIAL_CAPITAL};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Unique identifier for a run (content-addressable hash of its config).
pub type RunId = String;

/// Configuration for one comparison run.
///
/// Captures everything needed to reproduce the run: data source, capital,
/// commission, and the risk-free rate fed into the metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunConfig {
    /// Instrument symbol, used for labeling and provider fetches.
    pub symbol: String,

    /// Where bars come from.
    pub source: SourceConfig,

    /// Starting cash for both simulators.
    #[serde(default = "default_initial_capital")]
    pub initial_capital: f64,

    /// Proportional commission per trade side.
    #[serde(default = "default_commission_rate")]
    pub commission_rate: f64,

    /// Annual risk-free rate for the Sharpe/Sortino calculations.
    #[serde(default)]
    pub risk_free_rate: f64,
}

fn default_initial_capital() -> f64 {
    DEFAULT_INITIAL_CAPITAL
}

fn default_commission_rate() -> f64 {
    DEFAULT_COMMISSION_RATE
}

/// Data source configuration (serializable enum).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceConfig {
    /// A CSV file with `Date,Open,High,Low,Close,Volume[,Signal]` columns.
    Csv { path: PathBuf },

    /// Yahoo Finance fetch over a date range.
    Yahoo { start: NaiveDate, end: NaiveDate },

    /// Seeded synthetic random walk (offline demos and tests).
    Synthetic {
        seed: u64,
        start: NaiveDate,
        end: NaiveDate,
    },
}

impl RunConfig {
    /// Computes a deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs share a RunId, so their artifacts
    /// land in the same output directory.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("RunConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }

    /// The engine-facing subset of this config.
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            initial_capital: self.initial_capital,
            commission_rate: self.commission_rate,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::EmptySymbol);
        }
        self.sim_config().validate()?;
        if !self.risk_free_rate.is_finite() {
            return Err(ConfigError::InvalidRiskFreeRate(self.risk_free_rate));
        }
        Ok(())
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: RunConfig = toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Parse(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }
}

/// Errors from run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("symbol must not be empty")]
    EmptySymbol,

    #[error(transparent)]
    Sim(#[from] siglab_core::engine::ConfigError),

    #[error("risk-free rate must be finite, got {0}")]
    InvalidRiskFreeRate(f64),

    #[error("config parse error: {0}")]
    Parse(String),
}
