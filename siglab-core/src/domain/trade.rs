//! Trade — a completed round-trip: entry fill → exit fill.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A closed round-trip trade.
///
/// Created only when a SELL signal liquidates an open position; a position
/// still open when the series ends is reported as an `OpenPosition`, never
/// as a Trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    // ── Entry ──
    pub entry_bar: usize,
    pub entry_date: NaiveDate,
    pub entry_price: f64,

    // ── Exit ──
    pub exit_bar: usize,
    pub exit_date: NaiveDate,
    pub exit_price: f64,

    // ── Size ──
    pub shares: f64,

    // ── PnL ──
    /// Exit proceeds minus cost basis (entry notional + entry commission).
    pub pnl: f64,
    /// `pnl` as a fraction of cost basis.
    pub pnl_pct: f64,
    /// Total commission charged on entry and exit.
    pub commission: f64,

    // ── Duration ──
    pub holding_days: i64,
}

impl Trade {
    pub fn is_winner(&self) -> bool {
        self.pnl > 0.0
    }
}
