use crate::domain::forecasting::{PriceRecord, PriceSeries, RecordParser};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Line-oriented price log on disk (`SYMBOL - $price - timestamp`).
#[derive(Debug, Clone)]
pub struct PriceLog {
    path: PathBuf,
}

impl PriceLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_lines(&self) -> Result<Vec<String>> {
        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read price log {:?}", self.path))?;
        Ok(content.lines().map(str::to_string).collect())
    }

    pub fn records(&self) -> Result<Vec<PriceRecord>> {
        Ok(RecordParser::parse_records(self.read_lines()?))
    }

    /// Prices from the log, optionally restricted to one symbol.
    pub fn series(&self, symbol: Option<&str>) -> Result<PriceSeries> {
        let records = self.records()?;
        info!("Loaded {} price records from {:?}", records.len(), self.path);

        let series = match symbol {
            Some(symbol) => PriceSeries::for_symbol(&records, symbol),
            None => PriceSeries::from_records(&records),
        };
        series.with_context(|| format!("No usable prices in {:?}", self.path))
    }

    /// Appends one prediction line, creating the file if needed.
    pub fn append_prediction(
        &self,
        symbol: &str,
        value: f64,
        at: NaiveDateTime,
    ) -> Result<String> {
        let line = format_prediction_record(symbol, value, at);

        let needs_newline = fs::read(&self.path)
            .map(|bytes| bytes.last().is_some_and(|b| *b != b'\n'))
            .unwrap_or(false);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open price log {:?}", self.path))?;

        if needs_newline {
            writeln!(file)?;
        }
        writeln!(file, "{}", line)
            .with_context(|| format!("Failed to append to price log {:?}", self.path))?;

        Ok(line)
    }
}

/// `Prediction - SYMBOL - Predicted Value: $x.xx - YYYY-MM-DD HH:MM:SS`
///
/// The symbol sits in the price field position, so the parser never reads
/// these lines back as observations.
pub fn format_prediction_record(symbol: &str, value: f64, at: NaiveDateTime) -> String {
    format!(
        "Prediction - {} - Predicted Value: ${:.2} - {}",
        symbol.to_uppercase(),
        value,
        at.format(TIMESTAMP_FORMAT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 10, 19)
            .unwrap()
            .and_hms_opt(14, 5, 0)
            .unwrap()
    }

    #[test]
    fn test_prediction_record_format() {
        let line = format_prediction_record("aapl", 190.126, at());
        assert_eq!(
            line,
            "Prediction - AAPL - Predicted Value: $190.13 - 2024-10-19 14:05:00"
        );
        assert!(RecordParser::parse_line(&line).is_none());
    }
}
