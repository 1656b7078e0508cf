//! CSV import/export for signal-annotated bar data.
//!
//! Expected columns: `Date,Open,High,Low,Close,Volume` plus an optional
//! `Signal` column (1 = buy, 0 = hold, -1 = sell). Dates are accepted as
//! ISO (`2024-01-31`) or day-first (`31/01/2024`), matching the exports the
//! signal service produces.

use crate::data::provider::{DataError, RawBar};
use crate::domain::{Bar, Signal};
use chrono::NaiveDate;
use std::path::Path;

const REQUIRED_COLUMNS: [&str; 6] = ["Date", "Open", "High", "Low", "Close", "Volume"];

/// Read raw bars from a CSV file.
///
/// Rows keep their file order; sorting and de-duplication happen later in
/// series validation. A missing Signal column leaves `signal` unset on every
/// row so the heuristic generator can fill it.
pub fn read_csv_file(path: &Path) -> Result<Vec<RawBar>, DataError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| DataError::Csv(e.to_string()))?;

    let headers = reader
        .headers()
        .map_err(|e| DataError::Csv(e.to_string()))?
        .clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DataError::MissingColumn(column.to_string()));
        }
    }
    let signal_column = headers.iter().position(|h| h == "Signal");
    let column_index = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .expect("required column checked above")
    };
    let date_idx = column_index("Date");
    let open_idx = column_index("Open");
    let high_idx = column_index("High");
    let low_idx = column_index("Low");
    let close_idx = column_index("Close");
    let volume_idx = column_index("Volume");

    let mut bars = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| DataError::Csv(e.to_string()))?;

        let date = parse_date(&record[date_idx])?;
        let signal = match signal_column {
            Some(idx) => Some(parse_signal(&record[idx])?),
            None => None,
        };

        bars.push(RawBar {
            date,
            open: parse_number(&record[open_idx], "Open")?,
            high: parse_number(&record[high_idx], "High")?,
            low: parse_number(&record[low_idx], "Low")?,
            close: parse_number(&record[close_idx], "Close")?,
            volume: parse_number(&record[volume_idx], "Volume")?.max(0.0) as u64,
            signal,
        });
    }

    Ok(bars)
}

/// Write validated bars back out with their signals, ISO dates.
pub fn write_csv_file(path: &Path, bars: &[Bar]) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| DataError::Csv(e.to_string()))?;
    writer
        .write_record(["Date", "Open", "High", "Low", "Close", "Volume", "Signal"])
        .map_err(|e| DataError::Csv(e.to_string()))?;

    for bar in bars {
        writer
            .write_record([
                bar.date.format("%Y-%m-%d").to_string(),
                bar.open.to_string(),
                bar.high.to_string(),
                bar.low.to_string(),
                bar.close.to_string(),
                bar.volume.to_string(),
                i8::from(bar.signal).to_string(),
            ])
            .map_err(|e| DataError::Csv(e.to_string()))?;
    }
    writer.flush().map_err(|e| DataError::Csv(e.to_string()))?;
    Ok(())
}

fn parse_date(field: &str) -> Result<NaiveDate, DataError> {
    NaiveDate::parse_from_str(field, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(field, "%d/%m/%Y"))
        .map_err(|_| DataError::Csv(format!("unparseable date '{field}'")))
}

fn parse_number(field: &str, column: &str) -> Result<f64, DataError> {
    if field.is_empty() {
        // Empty cells become NaN and are dropped by series validation.
        return Ok(f64::NAN);
    }
    field
        .parse::<f64>()
        .map_err(|_| DataError::Csv(format!("unparseable {column} value '{field}'")))
}

fn parse_signal(field: &str) -> Result<Signal, DataError> {
    let value: i64 = field
        .trim()
        .parse::<f64>()
        .map_err(|_| DataError::Csv(format!("unparseable Signal value '{field}'")))?
        as i64;
    Signal::from_value(value).ok_or(DataError::InvalidSignal { value })
}
