//! Synthetic data provider — seeded random walk for offline demos and tests.

use crate::data::provider::{DataError, DataProvider, DataSource, FetchResult, RawBar};
use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generates a plausible daily random walk. Deterministic for a given seed,
/// so tests and demo runs are reproducible.
pub struct SyntheticProvider {
    seed: u64,
    start_price: f64,
}

impl SyntheticProvider {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            start_price: 100.0,
        }
    }

    pub fn with_start_price(seed: u64, start_price: f64) -> Self {
        Self { seed, start_price }
    }
}

impl DataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<FetchResult, DataError> {
        if end < start {
            return Err(DataError::Other(format!(
                "end date {end} precedes start date {start}"
            )));
        }

        // Derive the stream from both seed and symbol so different symbols
        // get different walks under the same seed.
        let symbol_salt = symbol
            .bytes()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64));
        let mut rng = StdRng::seed_from_u64(self.seed ^ symbol_salt);

        let days = (end - start).num_days() + 1;
        let mut bars = Vec::with_capacity(days as usize);
        let mut close = self.start_price;

        for offset in 0..days {
            let date = start + chrono::Duration::days(offset);
            // Weekday bars only, like an equity calendar.
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }

            let open = close;
            let drift = 0.0003;
            let daily_return: f64 = rng.gen_range(-0.02..0.02) + drift;
            close = (open * (1.0 + daily_return)).max(0.01);

            let spread = open.max(close) * rng.gen_range(0.001..0.01);
            bars.push(RawBar {
                date,
                open,
                high: open.max(close) + spread,
                low: (open.min(close) - spread).max(0.01),
                close,
                volume: rng.gen_range(100_000..5_000_000),
                signal: None,
            });
        }

        Ok(FetchResult {
            symbol: symbol.to_string(),
            bars,
            source: DataSource::Synthetic,
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range() -> (NaiveDate, NaiveDate) {
        (
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    #[test]
    fn deterministic_for_same_seed() {
        let (start, end) = range();
        let a = SyntheticProvider::new(42).fetch("SPY", start, end).unwrap();
        let b = SyntheticProvider::new(42).fetch("SPY", start, end).unwrap();
        assert_eq!(a.bars.len(), b.bars.len());
        for (x, y) in a.bars.iter().zip(&b.bars) {
            assert_eq!(x.close, y.close);
        }
    }

    #[test]
    fn different_symbols_differ() {
        let (start, end) = range();
        let a = SyntheticProvider::new(42).fetch("SPY", start, end).unwrap();
        let b = SyntheticProvider::new(42).fetch("QQQ", start, end).unwrap();
        assert!(a.bars.iter().zip(&b.bars).any(|(x, y)| x.close != y.close));
    }

    #[test]
    fn bars_are_sane_and_weekdays_only() {
        let (start, end) = range();
        let result = SyntheticProvider::new(7).fetch("TEST", start, end).unwrap();
        assert!(!result.bars.is_empty());
        for bar in &result.bars {
            assert!(bar.low > 0.0);
            assert!(bar.high >= bar.open && bar.high >= bar.close);
            assert!(bar.low <= bar.open && bar.low <= bar.close);
            assert!(!matches!(bar.date.weekday(), Weekday::Sat | Weekday::Sun));
        }
    }

    #[test]
    fn inverted_range_is_an_error() {
        let (start, end) = range();
        assert!(SyntheticProvider::new(1).fetch("SPY", end, start).is_err());
    }
}
