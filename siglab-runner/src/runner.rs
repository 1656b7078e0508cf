//! Comparison runner — wires validation, simulators, metrics, and charts.
//!
//! Entry points:
//! - `run_from_config()`: resolves the data source, then runs. Used by the CLI.
//! - `run_comparison()`: takes a pre-validated series, no I/O.
//! - `run_many()`: parallel fan-out over independent configs.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use siglab_core::data::{DataError, DataProvider, SyntheticProvider, YahooProvider};
use siglab_core::engine::{run_benchmark, run_strategy, BacktestResult};
use siglab_core::series::BarSeries;
use siglab_core::signals;

use crate::config::{ConfigError, RunConfig, SourceConfig};
use crate::metrics::PerformanceMetrics;
use crate::report::charts::{build_charts, ChartData};

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("data error: {0}")]
    Data(#[from] DataError),

    #[error("simulation error: {0}")]
    Sim(#[from] siglab_core::engine::ConfigError),
}

/// One simulator's output with its metrics record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimReport {
    pub metrics: PerformanceMetrics,
    pub result: BacktestResult,
}

/// Complete result of one benchmark-vs-strategy comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: String,
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub bar_count: usize,
    pub config: RunConfig,
    pub benchmark: SimReport,
    pub strategy: SimReport,
    pub charts: ChartData,
    pub data_warnings: Vec<String>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Resolve the configured data source into a validated series.
///
/// Rows without signals (Yahoo, synthetic, signal-less CSVs) are annotated
/// by the heuristic generator before validation.
pub fn load_series(config: &RunConfig) -> Result<BarSeries, RunError> {
    let raws = match &config.source {
        SourceConfig::Csv { path } => siglab_core::data::read_csv_file(path)?,
        SourceConfig::Yahoo { start, end } => {
            YahooProvider::new()?
                .fetch(&config.symbol, *start, *end)?
                .bars
        }
        SourceConfig::Synthetic { seed, start, end } => {
            SyntheticProvider::new(*seed)
                .fetch(&config.symbol, *start, *end)?
                .bars
        }
    };
    let bars = signals::annotate(raws);
    Ok(BarSeries::validate(bars)?)
}

/// Run both simulators over a pre-validated series — no I/O.
pub fn run_comparison(series: &BarSeries, config: &RunConfig) -> Result<ComparisonResult, RunError> {
    config.validate()?;
    let sim_config = config.sim_config();

    let benchmark = run_benchmark(series, &sim_config)?;
    let strategy = run_strategy(series, &sim_config)?;
    let charts = build_charts(&benchmark, &strategy);

    let benchmark_metrics = PerformanceMetrics::compute(&benchmark, config.risk_free_rate);
    let strategy_metrics = PerformanceMetrics::compute(&strategy, config.risk_free_rate);

    Ok(ComparisonResult {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        symbol: config.symbol.clone(),
        start_date: series.first().date,
        end_date: series.last().date,
        bar_count: series.len(),
        config: config.clone(),
        benchmark: SimReport {
            metrics: benchmark_metrics,
            result: benchmark,
        },
        strategy: SimReport {
            metrics: strategy_metrics,
            result: strategy,
        },
        charts,
        data_warnings: series.warnings().to_vec(),
    })
}

/// Load data per the config, then run the comparison.
pub fn run_from_config(config: &RunConfig) -> Result<ComparisonResult, RunError> {
    config.validate()?;
    let series = load_series(config)?;
    run_comparison(&series, config)
}

/// Run several configs in parallel.
///
/// Runs are independent by construction (fresh state per invocation, no
/// shared mutability), so this is a plain par_iter with no synchronization.
pub fn run_many(configs: &[RunConfig]) -> Vec<Result<ComparisonResult, RunError>> {
    configs.par_iter().map(run_from_config).collect()
}
