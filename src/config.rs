use crate::application::ml::forest_regressor::ForestParameters;
use crate::application::ml::mlp_regressor::MlpParameters;
use crate::application::ml::regressor::{RegressorConfig, RegressorKind};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct ForecastConfig {
    pub log_path: PathBuf,
    pub symbol: Option<String>,
    pub window_size: usize,
    pub epochs: usize,
    pub regressor: RegressorConfig,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("stock_data.txt"),
            symbol: None,
            window_size: 10,
            epochs: 15,
            regressor: RegressorConfig::default(),
        }
    }
}

impl ForecastConfig {
    /// Reads `PRICECAST_*` variables from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ForecastConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let log_path = PathBuf::from(var("PRICECAST_LOG_PATH", "stock_data.txt"));

        let symbol = lookup("PRICECAST_SYMBOL")
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty());

        let window_size = var("PRICECAST_WINDOW_SIZE", "10")
            .parse::<usize>()
            .context("Failed to parse PRICECAST_WINDOW_SIZE")?;

        let epochs = var("PRICECAST_EPOCHS", "15")
            .parse::<usize>()
            .context("Failed to parse PRICECAST_EPOCHS")?;

        let kind = RegressorKind::from_str(&var("PRICECAST_REGRESSOR", "mlp"))?;

        let mlp = MlpParameters {
            hidden_units: var("PRICECAST_HIDDEN_UNITS", "64")
                .parse::<usize>()
                .context("Failed to parse PRICECAST_HIDDEN_UNITS")?,
            learning_rate: var("PRICECAST_LEARNING_RATE", "0.001")
                .parse::<f64>()
                .context("Failed to parse PRICECAST_LEARNING_RATE")?,
            batch_size: var("PRICECAST_BATCH_SIZE", "16")
                .parse::<usize>()
                .context("Failed to parse PRICECAST_BATCH_SIZE")?,
            seed: var("PRICECAST_SEED", "42")
                .parse::<u64>()
                .context("Failed to parse PRICECAST_SEED")?,
        };

        let forest = ForestParameters {
            n_trees: var("PRICECAST_FOREST_TREES", "100")
                .parse::<usize>()
                .context("Failed to parse PRICECAST_FOREST_TREES")?,
            max_depth: var("PRICECAST_FOREST_MAX_DEPTH", "10")
                .parse::<u16>()
                .context("Failed to parse PRICECAST_FOREST_MAX_DEPTH")?,
            ..ForestParameters::default()
        };

        let config = Self {
            log_path,
            symbol,
            window_size,
            epochs,
            regressor: RegressorConfig { kind, mlp, forest },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            anyhow::bail!("PRICECAST_WINDOW_SIZE must be at least 1");
        }
        if self.epochs == 0 {
            anyhow::bail!("PRICECAST_EPOCHS must be at least 1");
        }
        if self.regressor.mlp.batch_size == 0 {
            anyhow::bail!("PRICECAST_BATCH_SIZE must be at least 1");
        }
        if self.regressor.mlp.hidden_units == 0 {
            anyhow::bail!("PRICECAST_HIDDEN_UNITS must be at least 1");
        }
        let lr = self.regressor.mlp.learning_rate;
        if lr.is_nan() || lr <= 0.0 {
            anyhow::bail!("PRICECAST_LEARNING_RATE must be positive");
        }
        if self.regressor.forest.n_trees == 0 {
            anyhow::bail!("PRICECAST_FOREST_TREES must be at least 1");
        }
        Ok(())
    }
}
