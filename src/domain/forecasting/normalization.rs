//! Min-max scaling shared between training and inference.
//!
//! A profile is computed once from the full training series and then reused
//! verbatim for every prediction, so forecasts made after the same `train`
//! call are comparable.

use crate::domain::errors::ForecastError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizationProfile {
    min: f64,
    max: f64,
}

impl NormalizationProfile {
    /// Builds a profile from explicit bounds. Callers must pass `max >= min`.
    pub fn new(min: f64, max: f64) -> Self {
        debug_assert!(
            max >= min,
            "normalization bounds out of order: min={} max={}",
            min,
            max
        );
        Self { min, max }
    }

    /// Computes (min, max) over the whole raw series.
    pub fn from_series(prices: &[f64]) -> Result<Self, ForecastError> {
        if prices.is_empty() {
            return Err(ForecastError::EmptyDataset);
        }

        let min = prices.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// True for a constant series (`max == min`).
    pub fn is_degenerate(&self) -> bool {
        self.range() == 0.0
    }

    /// `(x - min) / (max - min)`, or `0.0` for a degenerate profile.
    pub fn normalize(&self, x: f64) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        (x - self.min) / self.range()
    }

    /// `y * (max - min) + min`, or `min` for a degenerate profile.
    pub fn denormalize(&self, y: f64) -> f64 {
        if self.is_degenerate() {
            return self.min;
        }
        y * self.range() + self.min
    }

    pub fn normalize_all(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&x| self.normalize(x)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_within_bounds() {
        let profile = NormalizationProfile::new(12.5, 187.25);

        for x in [12.5, 13.0, 50.125, 99.9, 150.0, 187.25] {
            let back = profile.denormalize(profile.normalize(x));
            assert!((back - x).abs() < 1e-9, "{} came back as {}", x, back);
        }
    }

    #[test]
    fn test_bounds_map_to_unit_interval() {
        let profile = NormalizationProfile::from_series(&[3.0, 1.0, 6.0, 2.0]).unwrap();
        assert_eq!(profile.min(), 1.0);
        assert_eq!(profile.max(), 6.0);
        assert_eq!(profile.normalize(1.0), 0.0);
        assert_eq!(profile.normalize(6.0), 1.0);
        assert!((profile.normalize(3.5) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_values_are_not_clamped() {
        let profile = NormalizationProfile::new(10.0, 20.0);
        assert!((profile.normalize(0.0) - -1.0).abs() < 1e-12);
        assert!((profile.denormalize(2.0) - 30.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_profile_zero_fallback() {
        let profile = NormalizationProfile::from_series(&[5.0, 5.0, 5.0, 5.0]).unwrap();
        assert!(profile.is_degenerate());

        assert_eq!(profile.normalize(5.0), 0.0);
        assert_eq!(profile.normalize(0.0), 0.0);
        assert_eq!(profile.normalize(1000.0), 0.0);

        assert_eq!(profile.denormalize(0.0), 5.0);
        assert_eq!(profile.denormalize(0.73), 5.0);
        assert_eq!(profile.denormalize(-4.0), 5.0);
    }

    #[test]
    #[should_panic(expected = "bounds out of order")]
    fn test_reversed_bounds_panic() {
        NormalizationProfile::new(9.0, 3.0);
    }

    #[test]
    fn test_empty_series_rejected() {
        assert_eq!(
            NormalizationProfile::from_series(&[]),
            Err(ForecastError::EmptyDataset)
        );
    }
}
