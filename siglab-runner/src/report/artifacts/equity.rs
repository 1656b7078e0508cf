//! Equity overlay export (CSV/Parquet).

use anyhow::{Context, Result};
use polars::prelude::{Column, DataFrame, NamedFrom, ParquetWriter, Series};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::report::charts::EquityOverlayPoint;

pub fn write_equity_csv(path: &Path, overlay: &[EquityOverlayPoint]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create equity CSV {}", path.display()))?;
    writeln!(file, "date,benchmark,strategy")?;
    for point in overlay {
        writeln!(
            file,
            "{},{:.4},{:.4}",
            point.date, point.benchmark, point.strategy
        )?;
    }
    Ok(())
}

pub fn write_equity_parquet(path: &Path, overlay: &[EquityOverlayPoint]) -> Result<()> {
    let dates: Vec<String> = overlay.iter().map(|p| p.date.to_string()).collect();
    let benchmark: Vec<f64> = overlay.iter().map(|p| p.benchmark).collect();
    let strategy: Vec<f64> = overlay.iter().map(|p| p.strategy).collect();

    let mut df = DataFrame::new(vec![
        Column::Series(Series::new("date".into(), dates).into()),
        Column::Series(Series::new("benchmark".into(), benchmark).into()),
        Column::Series(Series::new("strategy".into(), strategy).into()),
    ])
    .context("Failed to build equity dataframe")?;

    let mut file = File::create(path)
        .with_context(|| format!("Failed to create equity parquet {}", path.display()))?;
    ParquetWriter::new(&mut file)
        .finish(&mut df)
        .context("Failed to write equity parquet")?;
    Ok(())
}
