//! Bar — the fundamental market data unit, annotated with a trading signal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-bar trading instruction.
///
/// Signals are advisory, not mandatory fills: the simulator is free to skip
/// a signal its state cannot honor (a SELL while flat, a BUY while holding).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Signal {
    Buy,
    Hold,
    Sell,
}

impl Signal {
    /// Parse the wire encoding: 1 = buy, 0 = hold, -1 = sell.
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(Signal::Buy),
            0 => Some(Signal::Hold),
            -1 => Some(Signal::Sell),
            _ => None,
        }
    }

    pub fn value(self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Hold => 0,
            Signal::Sell => -1,
        }
    }
}

impl TryFrom<i8> for Signal {
    type Error = String;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        Signal::from_value(value as i64)
            .ok_or_else(|| format!("signal value {value} is not one of -1, 0, 1"))
    }
}

impl From<Signal> for i8 {
    fn from(signal: Signal) -> i8 {
        signal.value()
    }
}

/// Daily OHLCV bar with its trading signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub signal: Signal,
}

impl Bar {
    /// Returns true if any OHLC field is non-finite.
    pub fn is_void(&self) -> bool {
        !self.open.is_finite()
            || !self.high.is_finite()
            || !self.low.is_finite()
            || !self.close.is_finite()
    }

    /// Basic OHLC sanity check: positive prices, low ≤ open,close ≤ high.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.low > 0.0
            && self.high >= self.low
            && self.open >= self.low
            && self.open <= self.high
            && self.close >= self.low
            && self.close <= self.high
    }
}
