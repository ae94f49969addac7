//! Price log parsing.
//!
//! Records look like `AAPL - $189.30 - 2024-10-19 14:05:00`. Fields are split
//! on `-`; the symbol is field 0 and the price is field 1. Lines whose price
//! field does not parse are skipped, which also drops the
//! `Prediction - AAPL - Predicted Value: $...` lines written back into the
//! same log (their field 1 is the symbol). Non-finite prices are skipped too.

use super::price_series::{PriceRecord, PriceSeries};
use crate::domain::errors::ForecastError;

const FIELD_DELIMITER: char = '-';
const CURRENCY_MARKER: char = '$';

pub struct RecordParser;

impl RecordParser {
    /// Parses one line. Blank lines, lines without a price field and lines
    /// with an unparseable price yield `None`.
    pub fn parse_line(line: &str) -> Option<PriceRecord> {
        if line.trim().is_empty() {
            return None;
        }

        let mut fields = line.split(FIELD_DELIMITER);
        let symbol = fields.next()?.trim();
        let token = fields.next()?.trim();
        let token = token.strip_prefix(CURRENCY_MARKER).unwrap_or(token).trim();

        let price = token.parse::<f64>().ok().filter(|p| p.is_finite())?;

        Some(PriceRecord {
            symbol: symbol.to_string(),
            price,
        })
    }

    /// All parseable records, in log order.
    pub fn parse_records<I, S>(lines: I) -> Vec<PriceRecord>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter_map(|line| Self::parse_line(line.as_ref()))
            .collect()
    }

    /// Every parseable price regardless of symbol.
    pub fn parse<I, S>(lines: I) -> Result<PriceSeries, ForecastError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        PriceSeries::from_records(&Self::parse_records(lines))
    }

    /// Prices of a single symbol only.
    pub fn parse_symbol<I, S>(lines: I, symbol: &str) -> Result<PriceSeries, ForecastError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        PriceSeries::for_symbol(&Self::parse_records(lines), symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_record() {
        let record = RecordParser::parse_line("AAPL - $189.30 - 2024-10-19 14:05:00").unwrap();
        assert_eq!(record.symbol, "AAPL");
        assert!((record.price - 189.30).abs() < 1e-9);
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_missing_marker() {
        let record = RecordParser::parse_line("  btc-   $ 64000.5   ").unwrap();
        assert_eq!(record.symbol, "btc");
        assert_eq!(record.price, 64000.5);

        let record = RecordParser::parse_line("ETH - 3100").unwrap();
        assert_eq!(record.price, 3100.0);
    }

    #[test]
    fn test_skips_unparseable_lines() {
        assert!(RecordParser::parse_line("").is_none());
        assert!(RecordParser::parse_line("    ").is_none());
        assert!(RecordParser::parse_line("no delimiter here").is_none());
        assert!(RecordParser::parse_line("AAPL - $n/a - 2024-10-19").is_none());
        assert!(RecordParser::parse_line("AAPL - $NaN - 2024-10-19").is_none());
        assert!(
            RecordParser::parse_line(
                "Prediction - AAPL - Predicted Value: $190.12 - 2024-10-19 14:10:00"
            )
            .is_none()
        );
    }

    #[test]
    fn test_parse_keeps_log_order() {
        let lines = [
            "AAPL - $1.0 - 2024-10-01 10:00:00",
            "",
            "Prediction - AAPL - Predicted Value: $9.99 - 2024-10-01 10:01:00",
            "AAPL - $2.5 - 2024-10-02 10:00:00",
            "MSFT - $3.0 - 2024-10-02 10:00:00",
        ];

        let series = RecordParser::parse(lines).unwrap();
        assert_eq!(series.as_slice(), &[1.0, 2.5, 3.0]);

        let aapl = RecordParser::parse_symbol(lines, "AAPL").unwrap();
        assert_eq!(aapl.as_slice(), &[1.0, 2.5]);
    }

    #[test]
    fn test_no_prices_is_empty_dataset() {
        let lines = vec![
            "header line".to_string(),
            "Prediction - AAPL - Predicted Value: $9.99".to_string(),
        ];
        assert_eq!(RecordParser::parse(&lines), Err(ForecastError::EmptyDataset));
        assert_eq!(
            RecordParser::parse(Vec::<String>::new()),
            Err(ForecastError::EmptyDataset)
        );
    }
}
