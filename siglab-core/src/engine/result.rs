//! BacktestResult — everything one simulator run produces.

use crate::domain::{EquityPoint, Signal, Trade};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Why a signal was not acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    /// BUY while a position is already open — the engine never pyramids.
    AlreadyHolding,
    /// SELL with nothing to sell — never interpreted as opening a short.
    NoPosition,
    /// BUY whose post-commission cash buys no shares.
    InsufficientCash,
}

/// Informational record of a signal the simulator ignored.
///
/// Skips are data, not failures: the run continues and returns full results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedSignal {
    pub bar_index: usize,
    pub date: NaiveDate,
    pub signal: Signal,
    pub reason: SkipReason,
}

/// A position still open when the series ended.
///
/// Marked-to-market at the final close for the equity curve, but never
/// closed into a realized Trade. `unrealized_pnl` is market value minus
/// cost basis; no hypothetical exit commission is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenPosition {
    pub entry_bar: usize,
    pub entry_date: NaiveDate,
    pub entry_price: f64,
    pub shares: f64,
    pub cost_basis: f64,
    pub last_close: f64,
    pub unrealized_pnl: f64,
}

/// Aggregate output of one simulator run.
///
/// Produced fresh per invocation; the engine holds no state across calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    pub initial_capital: f64,
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<Trade>,
    pub open_position: Option<OpenPosition>,
    pub skipped_signals: Vec<SkippedSignal>,
    pub commission_paid: f64,
}

impl BacktestResult {
    /// Final mark-to-market equity (initial capital for an empty curve).
    pub fn final_equity(&self) -> f64 {
        self.equity_curve
            .last()
            .map(|point| point.equity)
            .unwrap_or(self.initial_capital)
    }

    /// Sum of closed-trade PnL.
    pub fn realized_pnl(&self) -> f64 {
        self.trades.iter().map(|trade| trade.pnl).sum()
    }

    /// PnL of the open position, if any.
    pub fn unrealized_pnl(&self) -> f64 {
        self.open_position
            .as_ref()
            .map(|position| position.unrealized_pnl)
            .unwrap_or(0.0)
    }
}
