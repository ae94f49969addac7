pub mod normalization;
pub mod price_series;
pub mod record_parser;
pub mod window;

pub use normalization::NormalizationProfile;
pub use price_series::{PriceRecord, PriceSeries};
pub use record_parser::RecordParser;
pub use window::{TrainingExample, TrainingSet, WindowBuilder};
