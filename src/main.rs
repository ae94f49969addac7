//! pricecast - train a windowed price forecaster on a price log and predict
//! the next value.
//!
//! # Usage
//! ```sh
//! cargo run -- --log stock_data.txt --symbol AAPL --window-size 10 --epochs 15
//! cargo run -- --symbol AAPL --recent 189.3,190.1,188.7 --append
//! ```
//!
//! Defaults come from `PRICECAST_*` environment variables (a `.env` file is
//! honoured); flags override them.

use anyhow::Result;
use clap::Parser;
use pricecast::application::forecast_service::ForecastService;
use pricecast::application::ml::RegressorKind;
use pricecast::config::ForecastConfig;
use std::path::PathBuf;
use tracing::{Level, info};
use tracing_subscriber::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the price log
    #[arg(long)]
    log: Option<PathBuf>,

    /// Only use records of this symbol
    #[arg(long)]
    symbol: Option<String>,

    /// Number of past prices the model sees
    #[arg(long)]
    window_size: Option<usize>,

    /// Training epochs (ignored by the forest regressor)
    #[arg(long)]
    epochs: Option<usize>,

    /// Regression backend: mlp or forest
    #[arg(long)]
    regressor: Option<RegressorKind>,

    /// Recent prices to forecast from, comma separated. Defaults to the last
    /// `window_size` logged prices.
    #[arg(long, value_delimiter = ',')]
    recent: Option<Vec<f64>>,

    /// Append the prediction record to the log (requires --symbol)
    #[arg(long)]
    append: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn apply(&self, config: &mut ForecastConfig) {
        if let Some(log) = &self.log {
            config.log_path = log.clone();
        }
        if let Some(symbol) = &self.symbol {
            config.symbol = Some(symbol.trim().to_uppercase());
        }
        if let Some(window_size) = self.window_size {
            config.window_size = window_size;
        }
        if let Some(epochs) = self.epochs {
            config.epochs = epochs;
        }
        if let Some(kind) = self.regressor {
            config.regressor.kind = kind;
        }
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with(stderr_layer)
        .init();

    let mut config = ForecastConfig::from_env()?;
    args.apply(&mut config);
    config.validate()?;

    if args.append && config.symbol.is_none() {
        anyhow::bail!("--append needs --symbol (or PRICECAST_SYMBOL) to label the prediction");
    }

    info!(
        "Configuration loaded: Log={:?}, Symbol={:?}, Window={}, Epochs={}, Regressor={}",
        config.log_path, config.symbol, config.window_size, config.epochs, config.regressor.kind
    );

    let service = ForecastService::new(config);
    let report = service.run(args.recent.clone())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} | {} observations | window {} | range [{:.2}, {:.2}]",
            report.model,
            report.observations,
            report.window_size,
            report.profile.min(),
            report.profile.max()
        );
        println!("Predicted Value: ${:.2}", report.prediction);
    }

    if args.append {
        if let Some(symbol) = &report.symbol {
            let line = service.log().append_prediction(
                symbol,
                report.prediction,
                chrono::Local::now().naive_local(),
            )?;
            info!("Appended to {:?}: {}", service.log().path(), line);
        }
    }

    Ok(())
}
