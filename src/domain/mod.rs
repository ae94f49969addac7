// Price series, normalization and training windows
pub mod forecasting;

// Port interfaces
pub mod ports;

// Domain-specific error types
pub mod errors;
