//! Chart-ready projections of simulator results.
//!
//! A lossless re-projection of data the simulators already produced:
//! no financial computation happens here. Three artifacts:
//! 1. Equity overlay — benchmark and strategy curves aligned by date
//! 2. Per-bar PnL — delta equity of the strategy run
//! 3. Trade markers — one BUY/SELL point per realized entry and exit

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use siglab_core::engine::BacktestResult;

/// One date with both simulators' equity, ready for a direct overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityOverlayPoint {
    pub date: NaiveDate,
    pub benchmark: f64,
    pub strategy: f64,
}

/// Strategy equity change at one bar (first bar is measured against the
/// initial capital).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PnlPoint {
    pub date: NaiveDate,
    pub pnl: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarkerSide {
    Buy,
    Sell,
}

/// One plotted point per realized fill.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeMarker {
    pub date: NaiveDate,
    pub price: f64,
    pub side: MarkerSide,
}

/// All chart artifacts for one comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartData {
    pub equity_overlay: Vec<EquityOverlayPoint>,
    pub pnl_series: Vec<PnlPoint>,
    pub trade_markers: Vec<TradeMarker>,
}

/// Project two results from the same validated series into chart data.
///
/// Both simulators emit one equity point per input bar, so the curves align
/// index-by-index; the debug assertion guards the shared-series contract.
pub fn build_charts(benchmark: &BacktestResult, strategy: &BacktestResult) -> ChartData {
    debug_assert_eq!(benchmark.equity_curve.len(), strategy.equity_curve.len());

    let equity_overlay = benchmark
        .equity_curve
        .iter()
        .zip(&strategy.equity_curve)
        .map(|(b, s)| {
            debug_assert_eq!(b.date, s.date);
            EquityOverlayPoint {
                date: s.date,
                benchmark: b.equity,
                strategy: s.equity,
            }
        })
        .collect();

    let mut previous = strategy.initial_capital;
    let pnl_series = strategy
        .equity_curve
        .iter()
        .map(|point| {
            let pnl = point.equity - previous;
            previous = point.equity;
            PnlPoint {
                date: point.date,
                pnl,
            }
        })
        .collect();

    let mut trade_markers = Vec::with_capacity(strategy.trades.len() * 2);
    for trade in &strategy.trades {
        trade_markers.push(TradeMarker {
            date: trade.entry_date,
            price: trade.entry_price,
            side: MarkerSide::Buy,
        });
        trade_markers.push(TradeMarker {
            date: trade.exit_date,
            price: trade.exit_price,
            side: MarkerSide::Sell,
        });
    }

    ChartData {
        equity_overlay,
        pnl_series,
        trade_markers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siglab_core::domain::{Bar, Signal};
    use siglab_core::engine::{run_benchmark, run_strategy, SimConfig};
    use siglab_core::series::BarSeries;

    fn series() -> BarSeries {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let closes = [100.0, 110.0, 105.0];
        let signals = [1i64, 0, -1];
        let bars = closes
            .iter()
            .zip(&signals)
            .enumerate()
            .map(|(i, (&close, &signal))| Bar {
                date: base + chrono::Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1000,
                signal: Signal::from_value(signal).unwrap(),
            })
            .collect();
        BarSeries::validate(bars).unwrap()
    }

    fn charts() -> ChartData {
        let config = SimConfig {
            initial_capital: 1000.0,
            commission_rate: 0.0,
        };
        let series = series();
        let benchmark = run_benchmark(&series, &config).unwrap();
        let strategy = run_strategy(&series, &config).unwrap();
        build_charts(&benchmark, &strategy)
    }

    #[test]
    fn overlay_is_aligned_by_date() {
        let charts = charts();
        assert_eq!(charts.equity_overlay.len(), 3);
        // Identical fills on bar 0, so the curves start together.
        assert_eq!(charts.equity_overlay[0].benchmark, charts.equity_overlay[0].strategy);
    }

    #[test]
    fn pnl_series_sums_to_total_pnl() {
        let charts = charts();
        let total: f64 = charts.pnl_series.iter().map(|p| p.pnl).sum();
        // Round trip: +50 on 1000 capital.
        assert!((total - 50.0).abs() < 1e-9);
        // Delta on bar 1 is the mark-to-market move: 10 shares * +10.
        assert!((charts.pnl_series[1].pnl - 100.0).abs() < 1e-9);
    }

    #[test]
    fn markers_pair_buy_and_sell() {
        let charts = charts();
        assert_eq!(charts.trade_markers.len(), 2);
        assert_eq!(charts.trade_markers[0].side, MarkerSide::Buy);
        assert_eq!(charts.trade_markers[0].price, 100.0);
        assert_eq!(charts.trade_markers[1].side, MarkerSide::Sell);
        assert_eq!(charts.trade_markers[1].price, 105.0);
    }

    #[test]
    fn open_position_has_no_exit_marker() {
        let config = SimConfig {
            initial_capital: 1000.0,
            commission_rate: 0.0,
        };
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let bars = [100.0, 110.0, 120.0]
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                date: base + chrono::Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1000,
                signal: if i == 0 { Signal::Buy } else { Signal::Hold },
            })
            .collect();
        let series = BarSeries::validate(bars).unwrap();
        let benchmark = run_benchmark(&series, &config).unwrap();
        let strategy = run_strategy(&series, &config).unwrap();
        let charts = build_charts(&benchmark, &strategy);
        // Unrealized holdings stay off the marker layer.
        assert!(charts.trade_markers.is_empty());
    }
}
