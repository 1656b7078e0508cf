//! MACD line: EMA(fast) - EMA(slow).
//!
//! Only the line itself is computed; the signal/histogram derivations are
//! not needed by the heuristic generator.

use super::ema::ema;

/// Compute the MACD line; NaN until the slow EMA is seeded.
pub fn macd_line(closes: &[f64], fast: usize, slow: usize) -> Vec<f64> {
    assert!(fast < slow, "MACD fast period must be shorter than slow");
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);

    fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(f, s)| f - s)
        .collect()
}
