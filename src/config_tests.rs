use crate::application::ml::regressor::RegressorKind;
use crate::config::ForecastConfig;
use std::collections::HashMap;
use std::path::PathBuf;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn test_config_defaults() {
    let config = ForecastConfig::from_lookup(lookup(&[])).unwrap();

    assert_eq!(config.log_path, PathBuf::from("stock_data.txt"));
    assert_eq!(config.symbol, None);
    assert_eq!(config.window_size, 10);
    assert_eq!(config.epochs, 15);
    assert_eq!(config.regressor.kind, RegressorKind::Mlp);
    assert_eq!(config.regressor.mlp.batch_size, 16);
    assert!((config.regressor.mlp.learning_rate - 0.001).abs() < 1e-12);
    assert_eq!(config.regressor.forest.n_trees, 100);
}

#[test]
fn test_config_overrides() {
    let config = ForecastConfig::from_lookup(lookup(&[
        ("PRICECAST_LOG_PATH", "/tmp/crypto_data.txt"),
        ("PRICECAST_SYMBOL", " btc "),
        ("PRICECAST_WINDOW_SIZE", "4"),
        ("PRICECAST_EPOCHS", "200"),
        ("PRICECAST_REGRESSOR", "forest"),
        ("PRICECAST_FOREST_TREES", "25"),
        ("PRICECAST_FOREST_MAX_DEPTH", "6"),
        ("PRICECAST_SEED", "7"),
    ]))
    .unwrap();

    assert_eq!(config.log_path, PathBuf::from("/tmp/crypto_data.txt"));
    assert_eq!(config.symbol.as_deref(), Some("BTC"));
    assert_eq!(config.window_size, 4);
    assert_eq!(config.epochs, 200);
    assert_eq!(config.regressor.kind, RegressorKind::Forest);
    assert_eq!(config.regressor.forest.n_trees, 25);
    assert_eq!(config.regressor.forest.max_depth, 6);
    assert_eq!(config.regressor.mlp.seed, 7);
}

#[test]
fn test_config_rejects_bad_values() {
    let err = ForecastConfig::from_lookup(lookup(&[("PRICECAST_WINDOW_SIZE", "ten")])).unwrap_err();
    assert!(err.to_string().contains("PRICECAST_WINDOW_SIZE"));

    assert!(ForecastConfig::from_lookup(lookup(&[("PRICECAST_EPOCHS", "0")])).is_err());
    assert!(ForecastConfig::from_lookup(lookup(&[("PRICECAST_REGRESSOR", "lstm")])).is_err());
    assert!(ForecastConfig::from_lookup(lookup(&[("PRICECAST_LEARNING_RATE", "-0.1")])).is_err());
}

#[test]
fn test_blank_symbol_means_all_symbols() {
    let config = ForecastConfig::from_lookup(lookup(&[("PRICECAST_SYMBOL", "   ")])).unwrap();
    assert_eq!(config.symbol, None);
}
