pub mod forecaster;
pub mod forest_regressor;
pub mod mlp_regressor;
pub mod regressor;

pub use forecaster::Forecaster;
pub use regressor::{RegressorConfig, RegressorKind};
