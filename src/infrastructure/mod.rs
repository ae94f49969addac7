pub mod price_log;

pub use price_log::PriceLog;
