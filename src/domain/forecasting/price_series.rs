use crate::domain::errors::ForecastError;
use serde::{Deserialize, Serialize};

/// One observation read from the price log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub symbol: String,
    pub price: f64,
}

/// Raw prices in chronological log order.
///
/// Never empty: every constructor rejects an empty input with
/// [`ForecastError::EmptyDataset`].
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    prices: Vec<f64>,
}

impl PriceSeries {
    pub fn new(prices: Vec<f64>) -> Result<Self, ForecastError> {
        if prices.is_empty() {
            return Err(ForecastError::EmptyDataset);
        }
        Ok(Self { prices })
    }

    pub fn from_records(records: &[PriceRecord]) -> Result<Self, ForecastError> {
        Self::new(records.iter().map(|r| r.price).collect())
    }

    /// Keeps only the records of `symbol` (case-insensitive).
    pub fn for_symbol(records: &[PriceRecord], symbol: &str) -> Result<Self, ForecastError> {
        Self::new(
            records
                .iter()
                .filter(|r| r.symbol.eq_ignore_ascii_case(symbol))
                .map(|r| r.price)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Always `false`: a series holds at least one price.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.prices
    }

    /// The most recent `n` prices (or all of them if fewer exist).
    pub fn tail(&self, n: usize) -> &[f64] {
        &self.prices[self.prices.len().saturating_sub(n)..]
    }

    pub fn last(&self) -> Option<f64> {
        self.prices.last().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(symbol: &str, price: f64) -> PriceRecord {
        PriceRecord {
            symbol: symbol.to_string(),
            price,
        }
    }

    #[test]
    fn test_empty_series_rejected() {
        assert_eq!(PriceSeries::new(vec![]), Err(ForecastError::EmptyDataset));
    }

    #[test]
    fn test_symbol_filter_is_case_insensitive() {
        let records = vec![
            record("AAPL", 180.0),
            record("MSFT", 410.0),
            record("aapl", 182.5),
        ];

        let series = PriceSeries::for_symbol(&records, "Aapl").unwrap();
        assert_eq!(series.as_slice(), &[180.0, 182.5]);

        assert_eq!(
            PriceSeries::for_symbol(&records, "TSLA"),
            Err(ForecastError::EmptyDataset)
        );
    }

    #[test]
    fn test_constructed_series_is_never_empty() {
        let series = PriceSeries::new(vec![42.0]).unwrap();
        assert!(!series.is_empty());
        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_tail() {
        let series = PriceSeries::new(vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(series.tail(2), &[3.0, 4.0]);
        assert_eq!(series.tail(10), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(series.last(), Some(4.0));
    }
}
