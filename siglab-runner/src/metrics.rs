//! Performance metrics — pure functions over equity curves and trade logs.
//!
//! Every metric is a pure function: equity curve and/or trade list in,
//! scalar out. No dependencies on the runner or the engine internals, and
//! every division-by-zero case resolves to a documented sentinel instead of
//! NaN. Metrics are always computed from the same equity curve the charts
//! are built from, so the two can never drift apart.

use serde::{Deserialize, Serialize};
use siglab_core::domain::{EquityPoint, Trade};
use siglab_core::engine::BacktestResult;

/// Trading days per year, used to annualize daily statistics.
const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Calendar days per year, used for the CAGR exponent.
const CALENDAR_DAYS_PER_YEAR: f64 = 365.25;

/// Cap applied to profit factor when there are no losing trades, keeping
/// the value finite and JSON-serializable.
const PROFIT_FACTOR_CAP: f64 = 100.0;

/// Aggregate performance metrics for a single simulator run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub total_return: f64,
    pub cagr: f64,
    pub volatility: f64,
    pub sharpe: f64,
    pub sortino: f64,
    pub calmar: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub trade_count: usize,
    pub realized_pnl: f64,
    pub unrealized_pnl: f64,
    pub commission_paid: f64,
    pub final_equity: f64,
}

impl PerformanceMetrics {
    /// Compute all metrics from one simulator's result.
    pub fn compute(result: &BacktestResult, risk_free_rate: f64) -> Self {
        let curve = &result.equity_curve;
        let trades = &result.trades;
        let initial = result.initial_capital;
        Self {
            total_return: total_return(curve, initial),
            cagr: cagr(curve, initial),
            volatility: volatility(curve),
            sharpe: sharpe_ratio(curve, risk_free_rate),
            sortino: sortino_ratio(curve, risk_free_rate),
            calmar: calmar_ratio(curve, initial),
            max_drawdown: max_drawdown(curve),
            win_rate: win_rate(trades),
            profit_factor: profit_factor(trades),
            trade_count: trades.len(),
            realized_pnl: result.realized_pnl(),
            unrealized_pnl: result.unrealized_pnl(),
            commission_paid: result.commission_paid,
            final_equity: result.final_equity(),
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Total return as a fraction: final_equity / initial_capital − 1.
pub fn total_return(curve: &[EquityPoint], initial_capital: f64) -> f64 {
    if initial_capital <= 0.0 {
        return 0.0;
    }
    match curve.last() {
        Some(point) => point.equity / initial_capital - 1.0,
        None => 0.0,
    }
}

/// Compound annual growth rate over calendar time:
/// (final / initial)^(365.25 / days_elapsed) − 1.
///
/// Returns 0.0 for same-day curves or non-positive equity values.
pub fn cagr(curve: &[EquityPoint], initial_capital: f64) -> f64 {
    let (first, last) = match (curve.first(), curve.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return 0.0,
    };
    let days_elapsed = (last.date - first.date).num_days();
    if days_elapsed <= 0 || initial_capital <= 0.0 || last.equity <= 0.0 {
        return 0.0;
    }
    (last.equity / initial_capital).powf(CALENDAR_DAYS_PER_YEAR / days_elapsed as f64) - 1.0
}

/// Simple daily returns: percentage change between consecutive equity points.
/// The first point has no return.
pub fn daily_returns(curve: &[EquityPoint]) -> Vec<f64> {
    if curve.len() < 2 {
        return Vec::new();
    }
    curve
        .windows(2)
        .map(|pair| {
            if pair[0].equity > 0.0 {
                (pair[1].equity - pair[0].equity) / pair[0].equity
            } else {
                0.0
            }
        })
        .collect()
}

/// Annualized volatility: stdev of daily returns × √252.
pub fn volatility(curve: &[EquityPoint]) -> f64 {
    let returns = daily_returns(curve);
    if returns.len() < 2 {
        return 0.0;
    }
    std_dev(&returns) * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Annualized Sharpe ratio: (mean(daily) × 252 − rf) / volatility.
///
/// Defined as 0.0 (not NaN) when volatility is zero.
pub fn sharpe_ratio(curve: &[EquityPoint], risk_free_rate: f64) -> f64 {
    let vol = volatility(curve);
    if vol < 1e-15 {
        return 0.0;
    }
    let returns = daily_returns(curve);
    (mean(&returns) * TRADING_DAYS_PER_YEAR - risk_free_rate) / vol
}

/// Annualized Sortino ratio: same numerator as Sharpe, downside deviation
/// in the denominator. Returns 0.0 when there is no downside.
pub fn sortino_ratio(curve: &[EquityPoint], risk_free_rate: f64) -> f64 {
    let returns = daily_returns(curve);
    if returns.len() < 2 {
        return 0.0;
    }
    let downside_sq: Vec<f64> = returns.iter().filter(|&&r| r < 0.0).map(|r| r * r).collect();
    if downside_sq.is_empty() {
        return 0.0;
    }
    let downside_var = downside_sq.iter().sum::<f64>() / returns.len() as f64;
    let downside = downside_var.sqrt() * TRADING_DAYS_PER_YEAR.sqrt();
    if downside < 1e-15 {
        return 0.0;
    }
    (mean(&returns) * TRADING_DAYS_PER_YEAR - risk_free_rate) / downside
}

/// Calmar ratio: CAGR / |max drawdown|.
///
/// Returns 0.0 if there is no drawdown or CAGR is non-positive.
pub fn calmar_ratio(curve: &[EquityPoint], initial_capital: f64) -> f64 {
    let growth = cagr(curve, initial_capital);
    let dd = max_drawdown(curve);
    if dd >= 0.0 || growth <= 0.0 {
        return 0.0;
    }
    growth / dd.abs()
}

/// Maximum drawdown as a negative fraction (e.g., -0.15 = 15% drawdown):
/// min over t of (equity[t] − running_max) / running_max.
pub fn max_drawdown(curve: &[EquityPoint]) -> f64 {
    if curve.len() < 2 {
        return 0.0;
    }
    let mut peak = curve[0].equity;
    let mut max_dd = 0.0_f64;

    for point in curve {
        if point.equity > peak {
            peak = point.equity;
        }
        if peak > 0.0 {
            let dd = (point.equity - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Win rate: fraction of closed trades with positive PnL; 0.0 with no trades.
pub fn win_rate(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let winners = trades.iter().filter(|t| t.is_winner()).count();
    winners as f64 / trades.len() as f64
}

/// Profit factor: gross profits / gross losses.
///
/// Capped at 100.0 when there are no losing trades; 0.0 with no trades.
pub fn profit_factor(trades: &[Trade]) -> f64 {
    if trades.is_empty() {
        return 0.0;
    }
    let gross_profit: f64 = trades.iter().filter(|t| t.pnl > 0.0).map(|t| t.pnl).sum();
    let gross_loss: f64 = trades
        .iter()
        .filter(|t| t.pnl < 0.0)
        .map(|t| t.pnl.abs())
        .sum();

    if gross_loss < 1e-10 {
        return if gross_profit > 0.0 {
            PROFIT_FACTOR_CAP
        } else {
            0.0
        };
    }
    (gross_profit / gross_loss).min(PROFIT_FACTOR_CAP)
}

// ─── Helpers ────────────────────────────────────────────────────────

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn curve(values: &[f64]) -> Vec<EquityPoint> {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, &equity)| EquityPoint {
                date: base + chrono::Duration::days(i as i64),
                equity,
            })
            .collect()
    }

    fn make_trade(pnl: f64) -> Trade {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        Trade {
            entry_bar: 0,
            entry_date: date,
            entry_price: 100.0,
            exit_bar: 5,
            exit_date: date + chrono::Duration::days(5),
            exit_price: 100.0 + pnl / 50.0,
            shares: 50.0,
            pnl,
            pnl_pct: pnl / 5000.0,
            commission: 0.0,
            holding_days: 5,
        }
    }

    // ── Total return ──

    #[test]
    fn total_return_positive() {
        let eq = curve(&[100_000.0, 100_500.0, 110_000.0]);
        assert!((total_return(&eq, 100_000.0) - 0.1).abs() < 1e-10);
    }

    #[test]
    fn total_return_uses_initial_capital_not_first_point() {
        // A benchmark curve starts below capital because of the entry
        // commission; the return must still be measured against capital.
        let eq = curve(&[99_800.0, 99_800.0]);
        assert!((total_return(&eq, 100_000.0) - (-0.002)).abs() < 1e-10);
    }

    #[test]
    fn total_return_empty() {
        assert_eq!(total_return(&[], 100_000.0), 0.0);
    }

    // ── CAGR ──

    #[test]
    fn cagr_one_calendar_year() {
        // 10% over exactly 365.25 days → CAGR ≈ 10%
        let base = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
        let eq = vec![
            EquityPoint {
                date: base,
                equity: 100_000.0,
            },
            EquityPoint {
                date: base + chrono::Duration::days(365),
                equity: 110_000.0,
            },
        ];
        let c = cagr(&eq, 100_000.0);
        assert!((c - 0.1).abs() < 0.001, "CAGR should be ~10%, got {c}");
    }

    #[test]
    fn cagr_same_day_is_zero() {
        let base = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let eq = vec![
            EquityPoint {
                date: base,
                equity: 100_000.0,
            },
            EquityPoint {
                date: base,
                equity: 120_000.0,
            },
        ];
        assert_eq!(cagr(&eq, 100_000.0), 0.0);
    }

    #[test]
    fn cagr_single_point() {
        assert_eq!(cagr(&curve(&[100_000.0]), 100_000.0), 0.0);
    }

    // ── Daily returns ──

    #[test]
    fn daily_returns_basic() {
        let eq = curve(&[100.0, 110.0, 105.0]);
        let r = daily_returns(&eq);
        assert_eq!(r.len(), 2);
        assert!((r[0] - 0.1).abs() < 1e-10);
        assert!((r[1] - (105.0 - 110.0) / 110.0).abs() < 1e-10);
    }

    // ── Volatility / Sharpe ──

    #[test]
    fn volatility_constant_equity_is_zero() {
        assert_eq!(volatility(&curve(&[100_000.0; 100])), 0.0);
    }

    #[test]
    fn sharpe_constant_equity_is_zero() {
        assert_eq!(sharpe_ratio(&curve(&[100_000.0; 100]), 0.0), 0.0);
    }

    #[test]
    fn sharpe_constant_positive_return_is_zero_not_infinite() {
        // Perfectly constant daily return → zero volatility → Sharpe = 0.
        let mut values = vec![100_000.0];
        for i in 1..100 {
            values.push(values[i - 1] * 1.001);
        }
        assert_eq!(sharpe_ratio(&curve(&values), 0.0), 0.0);
    }

    #[test]
    fn sharpe_positive_for_noisy_gains() {
        let mut values = vec![100_000.0];
        for i in 1..253 {
            let r = if i % 2 == 0 { 1.002 } else { 1.0005 };
            values.push(values[i - 1] * r);
        }
        let s = sharpe_ratio(&curve(&values), 0.0);
        assert!(s > 5.0, "expected high Sharpe, got {s}");
    }

    #[test]
    fn sharpe_risk_free_rate_reduces_ratio() {
        let mut values = vec![100_000.0];
        for i in 1..253 {
            let r = if i % 2 == 0 { 1.002 } else { 1.0005 };
            values.push(values[i - 1] * r);
        }
        let eq = curve(&values);
        assert!(sharpe_ratio(&eq, 0.05) < sharpe_ratio(&eq, 0.0));
    }

    // ── Sortino ──

    #[test]
    fn sortino_no_downside_is_zero() {
        let values: Vec<f64> = (0..100).map(|i| 100_000.0 + i as f64 * 100.0).collect();
        assert_eq!(sortino_ratio(&curve(&values), 0.0), 0.0);
    }

    #[test]
    fn sortino_with_downside_is_positive_for_gainers() {
        let mut values = vec![100_000.0];
        for _ in 0..50 {
            values.push(values.last().unwrap() * 1.002);
        }
        for _ in 0..10 {
            values.push(values.last().unwrap() * 0.995);
        }
        for _ in 0..50 {
            values.push(values.last().unwrap() * 1.002);
        }
        assert!(sortino_ratio(&curve(&values), 0.0) > 0.0);
    }

    // ── Max drawdown ──

    #[test]
    fn max_drawdown_known() {
        let eq = curve(&[100_000.0, 110_000.0, 90_000.0, 95_000.0]);
        let expected = (90_000.0 - 110_000.0) / 110_000.0;
        assert!((max_drawdown(&eq) - expected).abs() < 1e-10);
    }

    #[test]
    fn max_drawdown_monotonic_increase_is_zero() {
        let values: Vec<f64> = (0..100).map(|i| 100_000.0 + i as f64 * 100.0).collect();
        assert_eq!(max_drawdown(&curve(&values)), 0.0);
    }

    #[test]
    fn max_drawdown_is_negative_or_zero() {
        let eq = curve(&[100.0, 80.0, 120.0, 60.0, 90.0]);
        assert!(max_drawdown(&eq) < 0.0);
    }

    // ── Win rate ──

    #[test]
    fn win_rate_mixed() {
        let trades = vec![
            make_trade(500.0),
            make_trade(-200.0),
            make_trade(300.0),
            make_trade(-100.0),
        ];
        assert!((win_rate(&trades) - 0.5).abs() < 1e-10);
    }

    #[test]
    fn win_rate_empty_is_zero_not_nan() {
        assert_eq!(win_rate(&[]), 0.0);
    }

    // ── Profit factor ──

    #[test]
    fn profit_factor_mixed() {
        let trades = vec![make_trade(500.0), make_trade(-200.0), make_trade(300.0)];
        assert!((profit_factor(&trades) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn profit_factor_all_winners_capped() {
        let trades = vec![make_trade(500.0), make_trade(300.0)];
        assert_eq!(profit_factor(&trades), 100.0);
    }

    #[test]
    fn profit_factor_all_losers() {
        let trades = vec![make_trade(-500.0), make_trade(-300.0)];
        assert_eq!(profit_factor(&trades), 0.0);
    }

    #[test]
    fn profit_factor_empty() {
        assert_eq!(profit_factor(&[]), 0.0);
    }

    // ── Aggregate ──

    #[test]
    fn compute_all_metrics_finite_with_no_trades() {
        let result = BacktestResult {
            initial_capital: 100_000.0,
            equity_curve: curve(&[100_000.0; 50]),
            trades: Vec::new(),
            open_position: None,
            skipped_signals: Vec::new(),
            commission_paid: 0.0,
        };
        let m = PerformanceMetrics::compute(&result, 0.0);
        assert_eq!(m.total_return, 0.0);
        assert_eq!(m.sharpe, 0.0);
        assert_eq!(m.win_rate, 0.0);
        assert_eq!(m.trade_count, 0);
        assert!(m.cagr.is_finite());
        assert!(m.sortino.is_finite());
        assert!(m.calmar.is_finite());
        assert!(m.profit_factor.is_finite());
    }
}
