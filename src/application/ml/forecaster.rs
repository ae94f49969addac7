//! Train-once, predict-on-demand price forecaster.
//!
//! The forecaster is either untrained or holds exactly one fitted model
//! together with the window size and normalization profile it was fitted
//! with. `train` replaces all three at once; `predict_next` reads them.

use super::regressor::RegressorConfig;
use crate::domain::errors::ForecastError;
use crate::domain::forecasting::{NormalizationProfile, PriceSeries, WindowBuilder};
use crate::domain::ports::Regressor;
use tracing::{debug, info};

struct TrainedModel {
    window_size: usize,
    profile: NormalizationProfile,
    model: Box<dyn Regressor>,
}

pub struct Forecaster {
    config: RegressorConfig,
    trained: Option<TrainedModel>,
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Forecaster {
    pub fn new() -> Self {
        Self::with_config(RegressorConfig::default())
    }

    pub fn with_config(config: RegressorConfig) -> Self {
        Self {
            config,
            trained: None,
        }
    }

    pub fn is_trained(&self) -> bool {
        self.trained.is_some()
    }

    pub fn window_size(&self) -> Option<usize> {
        self.trained.as_ref().map(|t| t.window_size)
    }

    pub fn profile(&self) -> Option<NormalizationProfile> {
        self.trained.as_ref().map(|t| t.profile)
    }

    pub fn model_name(&self) -> Option<&str> {
        self.trained.as_ref().map(|t| t.model.name())
    }

    /// Fits a fresh model on `series`. On success the previous model,
    /// window size and profile are discarded; on failure they are kept.
    pub fn train(
        &mut self,
        series: &PriceSeries,
        window_size: usize,
        epochs: usize,
    ) -> Result<(), ForecastError> {
        if epochs == 0 {
            return Err(ForecastError::InvalidEpochs);
        }

        let training_set = WindowBuilder::new(window_size)?.build(series)?;
        let (inputs, targets) = training_set.to_xy();

        let mut model = self.config.build();
        info!(
            "Training {} on {} windows (window_size={}, epochs={}, min={:.4}, max={:.4})",
            model.name(),
            training_set.len(),
            window_size,
            epochs,
            training_set.profile.min(),
            training_set.profile.max()
        );

        model.fit(&inputs, &targets, epochs)?;

        self.trained = Some(TrainedModel {
            window_size,
            profile: training_set.profile,
            model,
        });
        Ok(())
    }

    /// Forecasts the value following `recent`.
    ///
    /// `recent` is reconciled to the trained window size first (see
    /// [`reconcile_window`]), normalized with the training profile, and the
    /// model output is denormalized with that same profile.
    pub fn predict_next(&self, recent: &[f64]) -> Result<f64, ForecastError> {
        let trained = self.trained.as_ref().ok_or(ForecastError::NotTrained)?;

        let window = reconcile_window(recent, trained.window_size);
        let normalized = trained.profile.normalize_all(&window);

        let prediction = trained.model.predict_one(&normalized)?;
        let value = trained.profile.denormalize(prediction);

        debug!(
            "Predicted {:.4} from {} recent values (normalized output {:.6})",
            value,
            recent.len(),
            prediction
        );
        Ok(value)
    }
}

/// Fits `recent` to `window_size`: short inputs are right-padded with raw
/// `0.0`, long inputs keep their first `window_size` elements.
///
/// Raw zero usually lies far below the training minimum, so padded windows
/// are out of distribution for the model.
pub fn reconcile_window(recent: &[f64], window_size: usize) -> Vec<f64> {
    let mut window: Vec<f64> = recent.iter().take(window_size).copied().collect();
    window.resize(window_size, 0.0);
    window
}
