//! Configuration Module - TOML-based Service Configuration
//!
//! Loads and validates the store's own settings from `config.toml`:
//! where the configuration documents and their schemas live, logging,
//! and document hot-reload. Not to be confused with the trading
//! configuration documents themselves, which the repositories manage.

pub mod hot_reload;
pub mod loader;

use serde::Deserialize;

use crate::ports::document_store::DocumentLocation;

/// Top-level service configuration.
///
/// Loaded from `config.toml` at startup. Every section is optional and
/// falls back to defaults matching the shipped `datastore/` directory.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
  /// Service identity and logging.
  #[serde(default)]
  pub service: ServiceConfig,
  /// Document and schema file locations.
  #[serde(default)]
  pub datastore: DatastoreConfig,
  /// Document hot-reload.
  #[serde(default)]
  pub watcher: WatcherConfig,
}

/// Service identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
  /// Human-readable service name.
  #[serde(default = "default_service_name")]
  pub name: String,
  /// Log level (trace, debug, info, warn, error).
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

/// Datastore layout.
///
/// Each configuration class has a data file and a schema file, all in `dir`.
#[derive(Debug, Clone, Deserialize)]
pub struct DatastoreConfig {
  /// Directory holding data and schema files.
  #[serde(default = "default_dir")]
  pub dir: String,
  #[serde(default = "default_strategies_file")]
  pub strategies_file: String,
  #[serde(default = "default_strategies_schema")]
  pub strategies_schema: String,
  #[serde(default = "default_markets_file")]
  pub markets_file: String,
  #[serde(default = "default_markets_schema")]
  pub markets_schema: String,
  #[serde(default = "default_exchange_file")]
  pub exchange_file: String,
  #[serde(default = "default_exchange_schema")]
  pub exchange_schema: String,
}

impl DatastoreConfig {
  pub fn strategies_location(&self) -> DocumentLocation {
    DocumentLocation::in_dir(&self.dir, &self.strategies_file, &self.strategies_schema)
  }

  pub fn markets_location(&self) -> DocumentLocation {
    DocumentLocation::in_dir(&self.dir, &self.markets_file, &self.markets_schema)
  }

  pub fn exchange_location(&self) -> DocumentLocation {
    DocumentLocation::in_dir(&self.dir, &self.exchange_file, &self.exchange_schema)
  }
}

/// Document hot-reload configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WatcherConfig {
  /// Poll the data files for changes.
  #[serde(default = "default_true")]
  pub enabled: bool,
  /// Seconds between polls.
  #[serde(default = "default_poll_interval")]
  pub poll_interval_seconds: u64,
}

impl Default for ServiceConfig {
  fn default() -> Self {
    Self {
      name: default_service_name(),
      log_level: default_log_level(),
    }
  }
}

impl Default for DatastoreConfig {
  fn default() -> Self {
    Self {
      dir: default_dir(),
      strategies_file: default_strategies_file(),
      strategies_schema: default_strategies_schema(),
      markets_file: default_markets_file(),
      markets_schema: default_markets_schema(),
      exchange_file: default_exchange_file(),
      exchange_schema: default_exchange_schema(),
    }
  }
}

impl Default for WatcherConfig {
  fn default() -> Self {
    Self {
      enabled: default_true(),
      poll_interval_seconds: default_poll_interval(),
    }
  }
}

// Default value functions for serde

fn default_service_name() -> String {
  "tradebot-config-store".to_string()
}

fn default_log_level() -> String {
  "info".to_string()
}

fn default_dir() -> String {
  "datastore".to_string()
}

fn default_strategies_file() -> String {
  "strategies.json".to_string()
}

fn default_strategies_schema() -> String {
  "strategies.schema.json".to_string()
}

fn default_markets_file() -> String {
  "markets.json".to_string()
}

fn default_markets_schema() -> String {
  "markets.schema.json".to_string()
}

fn default_exchange_file() -> String {
  "exchange.json".to_string()
}

fn default_exchange_schema() -> String {
  "exchange.schema.json".to_string()
}

const fn default_true() -> bool {
  true
}

const fn default_poll_interval() -> u64 {
  60
}
