//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices over a lookback window.
//! First valid value at index period - 1.

/// Compute SMA values; NaN during warm-up.
pub fn sma(closes: &[f64], period: usize) -> Vec<f64> {
    assert!(period >= 1, "SMA period must be >= 1");
    let n = closes.len();
    let mut result = vec![f64::NAN; n];

    if n < period {
        return result;
    }

    let mut sum: f64 = closes.iter().take(period).sum();
    result[period - 1] = sum / period as f64;

    for i in period..n {
        sum = sum - closes[i - period] + closes[i];
        result[i] = sum / period as f64;
    }

    result
}
