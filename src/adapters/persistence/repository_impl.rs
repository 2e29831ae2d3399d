//! Repository Wiring — Concrete Adapters for the Repository Ports
//!
//! Builds the three configuration repositories over one shared
//! `JsonDocumentStore`, with file locations taken from the datastore
//! section of `config.toml`.
//!
//! This is the hexagonal architecture glue: callers only see the
//! `ConfigRepository` / `ExchangeConfigRepository` traits, never files.

use std::path::PathBuf;
use std::sync::Arc;

use super::collection::{MarketRepository, StrategyRepository};
use super::exchange::ExchangeRepository;
use super::json_store::JsonDocumentStore;
use crate::config::DatastoreConfig;
use crate::ports::repository::RepositoryError;
use crate::usecases::snapshot::ConfigSnapshot;

/// The strategy, market and exchange repositories backed by JSON files.
#[derive(Clone)]
pub struct ConfigRepositories {
    pub strategies: Arc<StrategyRepository<JsonDocumentStore>>,
    pub markets: Arc<MarketRepository<JsonDocumentStore>>,
    pub exchange: Arc<ExchangeRepository<JsonDocumentStore>>,
}

impl ConfigRepositories {
    /// Create the repositories from the datastore settings.
    pub fn from_config(config: &DatastoreConfig) -> Self {
        let store = Arc::new(JsonDocumentStore::new());

        Self {
            strategies: Arc::new(StrategyRepository::new(
                Arc::clone(&store),
                config.strategies_location(),
            )),
            markets: Arc::new(MarketRepository::new(
                Arc::clone(&store),
                config.markets_location(),
            )),
            exchange: Arc::new(ExchangeRepository::new(store, config.exchange_location())),
        }
    }

    /// Data files behind the three repositories.
    pub fn data_paths(&self) -> Vec<PathBuf> {
        vec![
            self.strategies.location().data_path.clone(),
            self.markets.location().data_path.clone(),
            self.exchange.location().data_path.clone(),
        ]
    }

    /// Load and validate all three documents.
    pub fn snapshot(&self) -> Result<ConfigSnapshot, RepositoryError> {
        ConfigSnapshot::load(
            self.strategies.as_ref(),
            self.markets.as_ref(),
            self.exchange.as_ref(),
        )
    }
}
