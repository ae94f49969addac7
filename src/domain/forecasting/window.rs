//! Sliding-window construction of training pairs.

use super::normalization::NormalizationProfile;
use super::price_series::PriceSeries;
use crate::domain::errors::ForecastError;

/// A normalized input window and the normalized value that followed it.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingExample {
    pub window: Vec<f64>,
    pub target: f64,
}

/// Training pairs in series order plus the profile used to build them.
#[derive(Debug, Clone)]
pub struct TrainingSet {
    pub window_size: usize,
    pub profile: NormalizationProfile,
    pub examples: Vec<TrainingExample>,
}

impl TrainingSet {
    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Splits into the row-major input matrix and target vector a regressor
    /// consumes.
    pub fn to_xy(&self) -> (Vec<Vec<f64>>, Vec<f64>) {
        self.examples
            .iter()
            .map(|e| (e.window.clone(), e.target))
            .unzip()
    }
}

pub struct WindowBuilder {
    window_size: usize,
}

impl WindowBuilder {
    pub fn new(window_size: usize) -> Result<Self, ForecastError> {
        if window_size == 0 {
            return Err(ForecastError::InvalidWindowSize);
        }
        Ok(Self { window_size })
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Produces `len - window_size` examples; the window starting at `i`
    /// covers `[i, i + window_size)` and targets `i + window_size`.
    pub fn build(&self, series: &PriceSeries) -> Result<TrainingSet, ForecastError> {
        let len = series.len();
        if len <= self.window_size {
            return Err(ForecastError::InsufficientData {
                len,
                window_size: self.window_size,
            });
        }

        let profile = NormalizationProfile::from_series(series.as_slice())?;
        let normalized = profile.normalize_all(series.as_slice());

        let examples = normalized
            .windows(self.window_size + 1)
            .map(|w| TrainingExample {
                window: w[..self.window_size].to_vec(),
                target: w[self.window_size],
            })
            .collect();

        Ok(TrainingSet {
            window_size: self.window_size,
            profile,
            examples,
        })
    }
}
