//! Trade tape export (CSV/JSON).

use anyhow::{Context, Result};
use siglab_core::domain::Trade;
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub fn write_trades_csv(path: &Path, trades: &[Trade]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("Failed to create trades CSV {}", path.display()))?;

    writeln!(
        file,
        "entry_date,exit_date,entry_price,exit_price,shares,pnl,pnl_pct,commission,holding_days"
    )?;

    for trade in trades {
        writeln!(
            file,
            "{},{},{:.4},{:.4},{:.6},{:.4},{:.6},{:.4},{}",
            trade.entry_date,
            trade.exit_date,
            trade.entry_price,
            trade.exit_price,
            trade.shares,
            trade.pnl,
            trade.pnl_pct,
            trade.commission,
            trade.holding_days
        )?;
    }

    Ok(())
}

pub fn write_trades_json(path: &Path, trades: &[Trade]) -> Result<()> {
    let json = serde_json::to_string_pretty(trades).context("Failed to serialize trades")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write trades JSON {}", path.display()))?;
    Ok(())
}
