//! PortfolioState — cash/position accumulator for one simulation run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The opening fill of the currently held position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryLot {
    pub bar_index: usize,
    pub date: NaiveDate,
    pub price: f64,
    /// Entry notional plus entry commission.
    pub cost_basis: f64,
    pub commission: f64,
}

/// Long-only/flat portfolio accumulator.
///
/// At most one open position at a time; fills always convert the whole cash
/// balance to shares (entry) or the whole position to cash (exit). Each fill
/// updates cash, shares, and commission together — there is no intermediate
/// observable state.
#[derive(Debug, Clone)]
pub struct PortfolioState {
    cash: f64,
    shares_held: f64,
    entry: Option<EntryLot>,
    commission_paid: f64,
}

impl PortfolioState {
    pub fn new(initial_cash: f64) -> Self {
        Self {
            cash: initial_cash,
            shares_held: 0.0,
            entry: None,
            commission_paid: 0.0,
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn shares_held(&self) -> f64 {
        self.shares_held
    }

    pub fn entry(&self) -> Option<&EntryLot> {
        self.entry.as_ref()
    }

    pub fn is_flat(&self) -> bool {
        self.shares_held == 0.0
    }

    pub fn commission_paid(&self) -> f64 {
        self.commission_paid
    }

    /// Mark-to-market equity at the given close.
    pub fn equity(&self, close: f64) -> f64 {
        self.cash + self.shares_held * close
    }

    /// Convert all available cash into shares at `close`.
    ///
    /// `shares = cash * (1 - rate) / close`; entry commission is
    /// `rate * close * shares`, so a `rate²` residual stays in cash.
    /// Returns the share count, or None when post-commission cash buys
    /// nothing (the caller records a skipped signal, not an error).
    pub fn open_long(
        &mut self,
        bar_index: usize,
        date: NaiveDate,
        close: f64,
        commission_rate: f64,
    ) -> Option<f64> {
        debug_assert!(self.entry.is_none(), "open_long called while holding");
        let shares = self.cash * (1.0 - commission_rate) / close;
        if self.cash <= 0.0 || shares <= 0.0 {
            return None;
        }
        let notional = shares * close;
        let commission = commission_rate * notional;

        self.cash -= notional + commission;
        self.shares_held = shares;
        self.commission_paid += commission;
        self.entry = Some(EntryLot {
            bar_index,
            date,
            price: close,
            cost_basis: notional + commission,
            commission,
        });
        Some(shares)
    }

    /// Liquidate the whole position at `close`.
    ///
    /// Proceeds are `shares * close * (1 - rate)`. Returns None when there
    /// is no open position.
    pub fn close_long(&mut self, close: f64, commission_rate: f64) -> Option<ExitFill> {
        let lot = self.entry.take()?;
        let shares = self.shares_held;
        let notional = shares * close;
        let commission = commission_rate * notional;
        let proceeds = notional - commission;

        self.cash += proceeds;
        self.shares_held = 0.0;
        self.commission_paid += commission;
        Some(ExitFill {
            shares,
            proceeds,
            commission,
            lot,
        })
    }
}

/// A completed liquidation, paired with the entry lot it closed.
#[derive(Debug, Clone)]
pub struct ExitFill {
    pub shares: f64,
    pub proceeds: f64,
    pub commission: f64,
    pub lot: EntryLot,
}
