//! Simulation configuration and its validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_INITIAL_CAPITAL: f64 = 1_000_000.0;

/// Default commission: 0.2% of notional per trade side.
pub const DEFAULT_COMMISSION_RATE: f64 = 0.002;

/// Parameters shared by both simulators.
///
/// Supplied by the caller, never read from the environment. The same config
/// is applied to the benchmark and the signal-driven run so the comparison
/// stays fair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    pub initial_capital: f64,
    /// Proportional commission charged on every entry and exit notional.
    pub commission_rate: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            commission_rate: DEFAULT_COMMISSION_RATE,
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_capital.is_finite() || self.initial_capital <= 0.0 {
            return Err(ConfigError::InvalidCapital(self.initial_capital));
        }
        if !self.commission_rate.is_finite()
            || self.commission_rate < 0.0
            || self.commission_rate >= 1.0
        {
            return Err(ConfigError::InvalidCommission(self.commission_rate));
        }
        Ok(())
    }
}

/// Invalid simulation parameters, surfaced before any simulation starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("initial capital must be positive and finite, got {0}")]
    InvalidCapital(f64),

    #[error("commission rate must be in [0, 1), got {0}")]
    InvalidCommission(f64),
}
