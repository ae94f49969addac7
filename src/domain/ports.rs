use crate::domain::errors::ForecastError;

/// A regression model mapping a fixed-width normalized window to the next
/// normalized value.
///
/// Implementations are created fresh for every training run, fitted once and
/// then only queried.
pub trait Regressor: Send {
    /// Fits the model to `inputs` (one row per example) and `targets`.
    /// Models without an iterative optimizer may ignore `epochs`.
    fn fit(
        &mut self,
        inputs: &[Vec<f64>],
        targets: &[f64],
        epochs: usize,
    ) -> Result<(), ForecastError>;

    /// Predicts one normalized scalar for one normalized window.
    fn predict_one(&self, input: &[f64]) -> Result<f64, ForecastError>;

    /// Get model name/type
    fn name(&self) -> &str;
}
