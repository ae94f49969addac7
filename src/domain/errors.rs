use thiserror::Error;

/// Errors raised by the forecasting core.
///
/// Every variant is returned synchronously from the call that detects it.
/// The core never logs or swallows these; presentation is up to the caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForecastError {
    #[error("No price data found. Check the log format (expected `SYMBOL - $price - timestamp`)")]
    EmptyDataset,

    #[error("Insufficient data: {len} prices cannot fill a window of {window_size} plus one target")]
    InsufficientData { len: usize, window_size: usize },

    #[error("Model is not trained yet")]
    NotTrained,

    #[error("Window size must be at least 1")]
    InvalidWindowSize,

    #[error("Epochs must be at least 1")]
    InvalidEpochs,

    #[error("Regression model failure: {0}")]
    Model(String),
}
