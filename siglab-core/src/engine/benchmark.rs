//! Buy-and-hold benchmark simulator.
//!
//! Spends the whole capital on the first bar's close (entry commission
//! charged once, same rate as the signal simulator) and holds to the end.
//! The trade log stays empty: a benchmark is a holding, not a trade. The
//! holding is reported through `open_position` so the result has the same
//! shape as a signal-driven run that ended while holding.

use crate::domain::{EquityPoint, PortfolioState};
use crate::engine::config::{ConfigError, SimConfig};
use crate::engine::result::{BacktestResult, OpenPosition};
use crate::series::BarSeries;

pub fn run_benchmark(series: &BarSeries, config: &SimConfig) -> Result<BacktestResult, ConfigError> {
    config.validate()?;

    let bars = series.bars();
    let mut state = PortfolioState::new(config.initial_capital);

    let first = series.first();
    // Positive capital and a validated close make this fill infallible.
    let opened = state.open_long(0, first.date, first.close, config.commission_rate);
    debug_assert!(opened.is_some());

    let mut equity_curve = Vec::with_capacity(bars.len());
    for bar in bars {
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
        trades: Vec::new(),
        open_position,
        skipped_signals: Vec::new(),
        commission_paid: state.commission_paid(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Bar, Signal};
    use chrono::NaiveDate;

    fn series(closes: &[f64]) -> BarSeries {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: base + chrono::Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1000,
                signal: Signal::Hold,
            })
            .collect();
        BarSeries::validate(bars).unwrap()
    }

    #[test]
    fn tracks_price_with_full_investment() {
        let series = series(&[100.0, 110.0, 105.0]);
        let config = SimConfig {
            initial_capital: 1000.0,
            commission_rate: 0.0,
        };
        let result = run_benchmark(&series, &config).unwrap();

        // 10 shares at 100; equity follows the close exactly.
        assert_eq!(result.equity_curve.len(), 3);
        assert!((result.equity_curve[0].equity - 1000.0).abs() < 1e-9);
        assert!((result.equity_curve[1].equity - 1100.0).abs() < 1e-9);
        assert!((result.equity_curve[2].equity - 1050.0).abs() < 1e-9);
        assert!(result.trades.is_empty());
        assert!(result.open_position.is_some());
    }

    #[test]
    fn entry_commission_charged_once() {
        let series = series(&[100.0, 100.0]);
        let config = SimConfig {
            initial_capital: 1000.0,
            commission_rate: 0.01,
        };
        let result = run_benchmark(&series, &config).unwrap();

        // shares = 1000 * 0.99 / 100 = 9.9, commission = 9.9
        assert!((result.commission_paid - 9.9).abs() < 1e-9);
        let position = result.open_position.as_ref().unwrap();
        assert!((position.shares - 9.9).abs() < 1e-12);
        // Flat price: equity = residual cash + 9.9 * 100 = 0.1 + 990
        assert!((result.final_equity() - 990.1).abs() < 1e-9);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let series = series(&[100.0, 101.0]);
        let config = SimConfig {
            initial_capital: -1.0,
            commission_rate: 0.0,
        };
        assert!(run_benchmark(&series, &config).is_err());
    }
}
