//! Signal-driven simulator — the central state machine.
//!
//! One pass in date order, O(n). Two states:
//! - FLAT: a BUY converts all cash into shares at this bar's close; HOLD and
//!   SELL are no-ops (the SELL is recorded as a skipped signal).
//! - HOLDING: a SELL liquidates everything at this bar's close and records a
//!   closed Trade; BUY and HOLD are no-ops (the BUY is recorded as skipped —
//!   the engine never pyramids).
//!
//! Signals are advisory: a skip is informational data on the result, never
//! an error. If the series ends while holding, the position is marked to
//! market in the equity curve but stays unrealized.

use crate::domain::{Bar, EquityPoint, PortfolioState, Signal, Trade};
use crate::engine::config::{ConfigError, SimConfig};
use crate::engine::result::{BacktestResult, OpenPosition, SkipReason, SkippedSignal};
use crate::series::BarSeries;

pub fn run_strategy(series: &BarSeries, config: &SimConfig) -> Result<BacktestResult, ConfigError> {
    config.validate()?;

    let bars = series.bars();
    let mut state = PortfolioState::new(config.initial_capital);
    let mut trades = Vec::new();
    let mut skipped_signals = Vec::new();
    let mut equity_curve = Vec::with_capacity(bars.len());

    for (bar_index, bar) in bars.iter().enumerate() {
        match bar.signal {
            Signal::Buy => {
                if !state.is_flat() {
                    skipped_signals.push(skip(bar_index, bar, SkipReason::AlreadyHolding));
                } else if state
                    .open_long(bar_index, bar.date, bar.close, config.commission_rate)
                    .is_none()
                {
                    skipped_signals.push(skip(bar_index, bar, SkipReason::InsufficientCash));
                }
            }
            Signal::Sell => match state.close_long(bar.close, config.commission_rate) {
                Some(fill) => {
                    let pnl = fill.proceeds - fill.lot.cost_basis;
                    trades.push(Trade {
                        entry_bar: fill.lot.bar_index,
                        entry_date: fill.lot.date,
                        entry_price: fill.lot.price,
                        exit_bar: bar_index,
                        exit_date: bar.date,
                        exit_price: bar.close,
                        shares: fill.shares,
                        pnl,
                        pnl_pct: pnl / fill.lot.cost_basis,
                        commission: fill.lot.commission + fill.commission,
                        holding_days: (bar.date - fill.lot.date).num_days(),
                    });
                }
                None => {
                    skipped_signals.push(skip(bar_index, bar, SkipReason::NoPosition));
                }
            },
            Signal::Hold => {}
        }

        equity_curve.push(EquityPoint {
            date: bar.date,
            equity: state.equity(bar.close),
        });
    }

    let last_close = series.last().close;
    let open_position = state.entry().map(|lot| OpenPosition {
        entry_bar: lot.bar_index,
        entry_date: lot.date,
        entry_price: lot.price,
        shares: state.shares_held(),
        cost_basis: lot.cost_basis,
        last_close,
        unrealized_pnl: state.shares_held() * last_close - lot.cost_basis,
    });

    Ok(BacktestResult {
        initial_capital: config.initial_capital,
        equity_curve,
        trades,
        open_position,
        skipped_signals,
        commission_paid: state.commission_paid(),
    })
}

fn skip(bar_index: usize, bar: &Bar, reason: SkipReason) -> SkippedSignal {
    SkippedSignal {
        bar_index,
        date: bar.date,
        signal: bar.signal,
        reason,
    }
}
