//! Run manifest export (JSON).

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::metrics::PerformanceMetrics;
use crate::runner::ComparisonResult;

/// Summary header for a saved run: the metrics without the bulky series.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub schema_version: u32,
    pub symbol: String,
    pub saved_at: chrono::DateTime<chrono::Utc>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub bar_count: usize,
    pub benchmark_metrics: PerformanceMetrics,
    pub strategy_metrics: PerformanceMetrics,
}

pub fn write_manifest(path: &Path, result: &ComparisonResult) -> Result<()> {
    let manifest = RunManifest {
        run_id: result.run_id.clone(),
        schema_version: result.schema_version,
        symbol: result.symbol.clone(),
        saved_at: chrono::Utc::now(),
        start_date: result.start_date,
        end_date: result.end_date,
        bar_count: result.bar_count,
        benchmark_metrics: result.benchmark.metrics.clone(),
        strategy_metrics: result.strategy.metrics.clone(),
    };

    let json =
        serde_json::to_string_pretty(&manifest).context("Failed to serialize run manifest")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write manifest to {}", path.display()))?;
    Ok(())
}
