//! SigLab Runner — backtest orchestration, metrics, and artifacts.
//!
//! This crate builds on `siglab-core` to provide:
//! - Serializable run configuration (TOML) with content-hash run IDs
//! - The comparison runner: benchmark and signal-driven simulations over the
//!   same validated series, metrics per simulator, chart projections
//! - Performance metrics as pure functions over equity curves and trade logs
//! - Artifact export (manifest, equity CSV/Parquet, trade tape, comparison JSON)
//! - Parallel multi-run execution

pub mod config;
pub mod metrics;
pub mod report;
pub mod runner;

pub use config::{ConfigError, RunConfig, SourceConfig};
pub use metrics::PerformanceMetrics;
pub use report::artifacts::{ArtifactManager, ArtifactPaths};
pub use report::charts::{build_charts, ChartData, MarkerSide, TradeMarker};
pub use runner::{run_comparison, run_from_config, run_many, ComparisonResult, RunError, SimReport};
