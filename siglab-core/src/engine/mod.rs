//! Simulation engine: benchmark and signal-driven simulators.
//!
//! Both simulators are pure functions of a validated series and a config:
//! one sequential pass, no I/O, no shared state, fresh accumulators per run.

pub mod benchmark;
pub mod config;
pub mod result;
pub mod strategy;

pub use benchmark::run_benchmark;
pub use config::{ConfigError, SimConfig, DEFAULT_COMMISSION_RATE, DEFAULT_INITIAL_CAPITAL};
pub use result::{BacktestResult, OpenPosition, SkipReason, SkippedSignal};
pub use strategy::run_strategy;
