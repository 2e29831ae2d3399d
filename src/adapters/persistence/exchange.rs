//! Exchange Repository - Singleton Exchange Document
//!
//! The exchange document holds exactly one entry, so there is no id
//! lookup and no create/delete. Saving replaces the caller-visible
//! fields and carries the stored authentication block over untouched,
//! since callers never see (and so cannot send back) credentials.

use std::sync::{Arc, Mutex};

use tracing::{debug, info, instrument};

use super::documents::ExchangeDocument;
use super::locks::document_lock;
use super::mapper;
use crate::domain::ExchangeConfig;
use crate::ports::document_store::{DocumentLocation, DocumentStore};
use crate::ports::repository::{ExchangeConfigRepository, RepositoryError};

/// Repository over the exchange document.
pub struct ExchangeRepository<S> {
    store: Arc<S>,
    location: DocumentLocation,
    write_lock: Arc<Mutex<()>>,
}

impl<S: DocumentStore<ExchangeDocument>> ExchangeRepository<S> {
    pub fn new(store: Arc<S>, location: DocumentLocation) -> Self {
        let write_lock = document_lock(&location.data_path);
        Self {
            store,
            location,
            write_lock,
        }
    }

    /// Files backing this repository.
    pub const fn location(&self) -> &DocumentLocation {
        &self.location
    }
}

impl<S: DocumentStore<ExchangeDocument>> ExchangeConfigRepository for ExchangeRepository<S> {
    #[instrument(skip(self))]
    fn get(&self) -> Result<ExchangeConfig, RepositoryError> {
        let document = self.store.load(&self.location)?;
        debug!(exchange = %document.exchange.name, "Fetched exchange config");
        Ok(mapper::exchange_to_external(&document.exchange)?)
    }

    #[instrument(skip_all, fields(exchange = %config.name))]
    fn save(&self, config: &ExchangeConfig) -> Result<ExchangeConfig, RepositoryError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut document = self.store.load(&self.location)?;
        let authentication = document.exchange.authentication_config.take();
        document.exchange = mapper::exchange_to_internal(config, authentication);
        self.store.save(&document, &self.location)?;

        let reloaded = self.store.load(&self.location)?;
        info!(adapter = %reloaded.exchange.adapter, "Exchange config saved");
        Ok(mapper::exchange_to_external(&reloaded.exchange)?)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::adapters::persistence::documents::{
        ConfigItem, ConfigItems, ExchangeEntry, NetworkConfigEntry,
    };
    use crate::adapters::persistence::memory_store::MemoryDocumentStore;
    use crate::domain::NetworkConfig;

    fn stored_document() -> ExchangeDocument {
        ExchangeDocument {
            exchange: ExchangeEntry {
                name: "Bitstamp".to_string(),
                adapter: "com.gazbert.bxbot.exchanges.BitstampExchangeAdapter".to_string(),
                authentication_config: Some(ConfigItems {
                    config_items: vec![ConfigItem {
                        name: "secret".to_string(),
                        value: "s3cr3t".to_string(),
                    }],
                }),
                network_config: NetworkConfigEntry {
                    connection_timeout: 15,
                    non_fatal_error_codes: vec![502, 503],
                    non_fatal_error_messages: vec!["Connection reset".to_string()],
                },
                other_config: None,
            },
        }
    }

    fn repository() -> (
        Arc<MemoryDocumentStore<ExchangeDocument>>,
        ExchangeRepository<MemoryDocumentStore<ExchangeDocument>>,
    ) {
        let store = Arc::new(MemoryDocumentStore::new(stored_document()));
        let repo = ExchangeRepository::new(
            Arc::clone(&store),
            DocumentLocation::new("mem/exchange.json", "mem/exchange.schema.json"),
        );
        (store, repo)
    }

    #[test]
    fn test_get_maps_without_credentials() {
        let (store, repo) = repository();
        let config = repo.get().unwrap();

        assert_eq!(config.name, "Bitstamp");
        assert_eq!(config.network_config.non_fatal_error_http_status_codes, vec![502, 503]);
        assert!(config.other_config.is_empty());
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_save_replaces_fields_and_keeps_credentials() {
        let (store, repo) = repository();
        let config = ExchangeConfig {
            name: "GDAX".to_string(),
            class_name: "com.gazbert.bxbot.exchanges.GdaxExchangeAdapter".to_string(),
            network_config: NetworkConfig {
                connection_timeout: 60,
                non_fatal_error_http_status_codes: vec![520],
                non_fatal_error_messages: Vec::new(),
            },
            other_config: BTreeMap::from([("sell-fee".to_string(), "0.1".to_string())]),
        };

        assert_eq!(repo.save(&config).unwrap(), config);

        let stored = store.snapshot().exchange;
        assert_eq!(stored.adapter, config.class_name);
        assert_eq!(stored.authentication_config, stored_document().exchange.authentication_config);
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.load_count(), 2);
    }
}
