// Regression models and the forecaster
pub mod ml;

// Log-to-forecast orchestration
pub mod forecast_service;
