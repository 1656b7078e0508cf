//! EquityPoint — one sample of the portfolio's mark-to-market value.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Total portfolio value at one bar: `cash + shares_held * close`.
///
/// One point per bar of the validated series, in date order with no gaps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equity_point_roundtrip() {
        let point = EquityPoint {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            equity: 1_000_000.0,
        };
        let json = serde_json::to_string(&point).unwrap();
        let deser: EquityPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(point, deser);
    }
}
