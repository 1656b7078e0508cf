//! Heuristic signal generation from technical indicators.
//!
//! Annotates a bar series that arrived without a Signal column. Rules:
//! - BUY when RSI < 30 (oversold), or MACD > 0 with close above the trend SMA
//! - SELL when RSI > 70 (overbought), or MACD < 0 with close below the trend SMA
//! - HOLD otherwise, including the whole indicator warm-up window
//!
//! This is the fallback generator; model-based signals arrive pre-computed
//! in the data and pass through untouched.

use crate::data::RawBar;
use crate::domain::{Bar, Signal};
use crate::indicators::{macd_line, rsi, sma};

pub const RSI_PERIOD: usize = 14;
pub const MACD_FAST: usize = 12;
pub const MACD_SLOW: usize = 26;
pub const TREND_SMA_PERIOD: usize = 50;

pub const RSI_OVERSOLD: f64 = 30.0;
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// Generate one signal per close from the indicator rules.
pub fn heuristic_signals(closes: &[f64]) -> Vec<Signal> {
    let rsi_values = rsi(closes, RSI_PERIOD);
    let macd_values = macd_line(closes, MACD_FAST, MACD_SLOW);
    let trend = sma(closes, TREND_SMA_PERIOD);

    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let rsi_v = rsi_values[i];
            let macd_v = macd_values[i];
            let sma_v = trend[i];

            let buy = (!rsi_v.is_nan() && rsi_v < RSI_OVERSOLD)
                || (!macd_v.is_nan() && !sma_v.is_nan() && macd_v > 0.0 && close > sma_v);
            let sell = (!rsi_v.is_nan() && rsi_v > RSI_OVERBOUGHT)
                || (!macd_v.is_nan() && !sma_v.is_nan() && macd_v < 0.0 && close < sma_v);

            // Buy takes precedence when both rules fire, matching the
            // order the thresholds are applied upstream.
            if buy {
                Signal::Buy
            } else if sell {
                Signal::Sell
            } else {
                Signal::Hold
            }
        })
        .collect()
}

/// Attach signals to raw bars: explicit values pass through untouched,
/// missing ones are filled from the heuristic rules.
pub fn annotate(raws: Vec<RawBar>) -> Vec<Bar> {
    let needs_heuristic = raws.iter().any(|raw| raw.signal.is_none());
    let generated = if needs_heuristic {
        let closes: Vec<f64> = raws.iter().map(|raw| raw.close).collect();
        heuristic_signals(&closes)
    } else {
        Vec::new()
    };

    raws.into_iter()
        .enumerate()
        .map(|(i, raw)| Bar {
            date: raw.date,
            open: raw.open,
            high: raw.high,
            low: raw.low,
            close: raw.close,
            volume: raw.volume,
            signal: raw.signal.unwrap_or_else(|| generated[i]),
        })
        .collect()
}
