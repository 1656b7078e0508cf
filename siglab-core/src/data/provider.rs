//! Data provider trait and structured error types.
//!
//! The DataProvider trait abstracts over data sources (Yahoo Finance, CSV
//! import, synthetic) so implementations can be swapped and mocked for tests.
//! The engine never talks to a provider: source negotiation happens entirely
//! in the loader, and simulators only ever receive a validated series.

use crate::domain::Signal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raw daily OHLCV row from a data provider, before validation.
///
/// `signal` is populated only when the source carries a Signal column
/// (CSV exports from the signal service do; Yahoo never does).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub signal: Option<Signal>,
}

/// Structured error types for data operations.
///
/// Covers both transport failures (network, response format) and series
/// validation failures — the caller sees one taxonomy either way, and no
/// simulation starts once any of these is raised.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("series has {got} usable bars, need at least 2")]
    TooFewBars { got: usize },

    #[error("non-positive close {close} on {date}")]
    NonPositiveClose { date: NaiveDate, close: f64 },

    #[error("signal value {value} is not one of -1, 0, 1")]
    InvalidSignal { value: i64 },

    #[error("duplicate or out-of-order date {date} after canonicalization")]
    NonMonotonicDates { date: NaiveDate },

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("csv error: {0}")]
    Csv(String),

    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("data error: {0}")]
    Other(String),
}

/// Result of a successful data fetch for a single symbol.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub symbol: String,
    pub bars: Vec<RawBar>,
    pub source: DataSource,
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    CsvImport,
    Synthetic,
}

/// Trait for data providers (Yahoo Finance, CSV import, synthetic).
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch daily OHLCV bars for a symbol over a date range.
    fn fetch(&self, symbol: &str, start: NaiveDate, end: NaiveDate)
        -> Result<FetchResult, DataError>;

    /// Check if the provider is currently usable (reachable, not rate-limited).
    fn is_available(&self) -> bool;
}
