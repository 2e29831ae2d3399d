//! Configuration Loader - File Loading and Validation
//!
//! Handles loading `config.toml`, validating all parameters,
//! and providing clear error messages for misconfiguration.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::AppConfig;

/// Load and validate configuration from a TOML file.
///
/// # Arguments
/// * `path` - Path to the config.toml file
///
/// # Errors
/// Returns detailed error if:
/// - File doesn't exist or can't be read
/// - TOML parsing fails
/// - Validation rules are violated
pub fn load_config(path: &str) -> Result<AppConfig> {
  let path = Path::new(path);

  let content = std::fs::read_to_string(path)
    .with_context(|| format!("Failed to read config file: {}", path.display()))?;

  let config = parse_config(&content)?;

  info!(
    datastore = %config.datastore.dir,
    watcher = config.watcher.enabled,
    "Configuration loaded successfully"
  );

  Ok(config)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<AppConfig> {
  let config: AppConfig =
    toml::from_str(content).with_context(|| "Failed to parse config.toml")?;

  validate_config(&config)?;
  Ok(config)
}

/// Validate all configuration parameters.
///
/// Checks for:
/// - Non-empty names and paths
/// - Distinct data files per configuration class
/// - A positive watcher poll interval
fn validate_config(config: &AppConfig) -> Result<()> {
  anyhow::ensure!(
    !config.service.name.trim().is_empty(),
    "Service name must not be empty"
  );

  // Datastore validation
  let ds = &config.datastore;
  anyhow::ensure!(!ds.dir.trim().is_empty(), "Datastore dir must not be empty");

  for (field, value) in [
    ("strategies_file", &ds.strategies_file),
    ("strategies_schema", &ds.strategies_schema),
    ("markets_file", &ds.markets_file),
    ("markets_schema", &ds.markets_schema),
    ("exchange_file", &ds.exchange_file),
    ("exchange_schema", &ds.exchange_schema),
  ] {
    anyhow::ensure!(
      !value.trim().is_empty(),
      "Datastore {} must not be empty",
      field
    );
  }

  anyhow::ensure!(
    ds.strategies_file != ds.markets_file
      && ds.strategies_file != ds.exchange_file
      && ds.markets_file != ds.exchange_file,
    "Strategies, markets and exchange must use distinct data files"
  );

  // Watcher validation
  anyhow::ensure!(
    config.watcher.poll_interval_seconds > 0,
    "Watcher poll_interval_seconds must be positive, got {}",
    config.watcher.poll_interval_seconds
  );

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_load_nonexistent_file() {
    let result = load_config("nonexistent.toml");
    assert!(result.is_err());
  }

  #[test]
  fn test_empty_config_uses_defaults() {
    let config = parse_config("").unwrap();
    assert_eq!(config.datastore.dir, "datastore");
    assert_eq!(config.datastore.markets_schema, "markets.schema.json");
    assert_eq!(config.service.log_level, "info");
    assert!(config.watcher.enabled);
    assert_eq!(config.watcher.poll_interval_seconds, 60);
  }

  #[test]
  fn test_shipped_config_is_valid() {
    let config = parse_config(include_str!("../../config.toml")).unwrap();
    assert_eq!(config.service.name, "tradebot-config-store");
    assert!(config.datastore.exchange_location().data_path.ends_with("exchange.json"));
  }

  #[test]
  fn test_shared_data_file_rejected() {
    let err = parse_config(
      r#"
      [datastore]
      markets_file = "strategies.json"
      "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("distinct"));
  }

  #[test]
  fn test_zero_poll_interval_rejected() {
    let err = parse_config("[watcher]\npoll_interval_seconds = 0\n").unwrap_err();
    assert!(err.to_string().contains("poll_interval_seconds"));
  }
}
