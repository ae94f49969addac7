use crate::application::ml::Forecaster;
use crate::config::ForecastConfig;
use crate::domain::forecasting::{NormalizationProfile, PriceSeries};
use crate::infrastructure::price_log::PriceLog;
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

/// Outcome of one train-then-predict run.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastReport {
    pub symbol: Option<String>,
    pub model: String,
    pub observations: usize,
    pub window_size: usize,
    pub epochs: usize,
    pub profile: NormalizationProfile,
    pub recent: Vec<f64>,
    pub prediction: f64,
}

/// Wires the price log, the forecaster and the configuration together.
pub struct ForecastService {
    config: ForecastConfig,
    log: PriceLog,
}

impl ForecastService {
    pub fn new(config: ForecastConfig) -> Self {
        let log = PriceLog::new(config.log_path.clone());
        Self { config, log }
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    pub fn log(&self) -> &PriceLog {
        &self.log
    }

    pub fn load_series(&self) -> Result<PriceSeries> {
        self.log.series(self.config.symbol.as_deref())
    }

    /// Trains on the log and forecasts from `recent`, or from the last
    /// `window_size` logged prices when `recent` is `None`.
    pub fn run(&self, recent: Option<Vec<f64>>) -> Result<ForecastReport> {
        let series = self.load_series()?;
        self.run_on(&series, recent)
    }

    pub fn run_on(&self, series: &PriceSeries, recent: Option<Vec<f64>>) -> Result<ForecastReport> {
        let mut forecaster = Forecaster::with_config(self.config.regressor.clone());
        forecaster
            .train(series, self.config.window_size, self.config.epochs)
            .context("Training failed")?;

        let recent = recent.unwrap_or_else(|| series.tail(self.config.window_size).to_vec());
        let prediction = forecaster
            .predict_next(&recent)
            .context("Prediction failed")?;

        let profile = forecaster
            .profile()
            .context("Forecaster lost its normalization profile")?;
        let model = forecaster.model_name().unwrap_or_default().to_string();

        info!(
            "Forecast for {}: {:.4}",
            self.config.symbol.as_deref().unwrap_or("all symbols"),
            prediction
        );

        Ok(ForecastReport {
            symbol: self.config.symbol.clone(),
            model,
            observations: series.len(),
            window_size: self.config.window_size,
            epochs: self.config.epochs,
            profile,
            recent,
            prediction,
        })
    }
}
