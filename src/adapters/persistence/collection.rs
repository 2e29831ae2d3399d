//! Collection Repository - CRUD over Identified Entries
//!
//! One implementation serves every document that is an ordered list of
//! entries keyed by a string id (strategies, markets). Each operation
//! loads the document fresh; mutating operations hold the file's write
//! lock from load to final reload and always rewrite the whole document.

use std::marker::PhantomData;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info, instrument, warn};

use super::documents::{MarketEntry, MarketsDocument, StrategiesDocument, StrategyEntry};
use super::locks::document_lock;
use super::mapper;
use crate::domain::{Identified, MarketConfig, StrategyConfig};
use crate::ports::document_store::{DocumentLocation, DocumentStore};
use crate::ports::repository::{ConfigRepository, MappingError, Outcome, RepositoryError};

/// A persisted document holding an ordered collection of identified entries.
pub trait EntryCollection: Send + Sync + 'static {
    /// Persisted entry shape.
    type Entry;
    /// Caller-facing entity shape.
    type Entity: Identified;

    /// Entity name used in log fields.
    const KIND: &'static str;

    fn entries(&self) -> &[Self::Entry];
    fn entries_mut(&mut self) -> &mut Vec<Self::Entry>;
    fn entry_id(entry: &Self::Entry) -> &str;
    fn to_external(entry: &Self::Entry) -> Result<Self::Entity, MappingError>;
    fn to_internal(entity: &Self::Entity) -> Self::Entry;

    /// Overwrite every field of `entry` except its identifier.
    fn apply_update(entry: &mut Self::Entry, entity: &Self::Entity);
}

impl EntryCollection for StrategiesDocument {
    type Entry = StrategyEntry;
    type Entity = StrategyConfig;

    const KIND: &'static str = "strategy";

    fn entries(&self) -> &[StrategyEntry] {
        &self.strategies
    }

    fn entries_mut(&mut self) -> &mut Vec<StrategyEntry> {
        &mut self.strategies
    }

    fn entry_id(entry: &StrategyEntry) -> &str {
        &entry.id
    }

    fn to_external(entry: &StrategyEntry) -> Result<StrategyConfig, MappingError> {
        mapper::strategy_to_external(entry)
    }

    fn to_internal(entity: &StrategyConfig) -> StrategyEntry {
        mapper::strategy_to_internal(entity)
    }

    fn apply_update(entry: &mut StrategyEntry, entity: &StrategyConfig) {
        let updated = mapper::strategy_to_internal(entity);
        entry.name = updated.name;
        entry.description = updated.description;
        entry.class_name = updated.class_name;
        entry.optional_config = updated.optional_config;
    }
}

impl EntryCollection for MarketsDocument {
    type Entry = MarketEntry;
    type Entity = MarketConfig;

    const KIND: &'static str = "market";

    fn entries(&self) -> &[MarketEntry] {
        &self.markets
    }

    fn entries_mut(&mut self) -> &mut Vec<MarketEntry> {
        &mut self.markets
    }

    fn entry_id(entry: &MarketEntry) -> &str {
        &entry.id
    }

    fn to_external(entry: &MarketEntry) -> Result<MarketConfig, MappingError> {
        Ok(mapper::market_to_external(entry))
    }

    fn to_internal(entity: &MarketConfig) -> MarketEntry {
        mapper::market_to_internal(entity)
    }

    fn apply_update(entry: &mut MarketEntry, entity: &MarketConfig) {
        entry.name.clone_from(&entity.name);
        entry.base_currency.clone_from(&entity.base_currency);
        entry.counter_currency.clone_from(&entity.counter_currency);
        entry.enabled = entity.enabled;
        entry.trading_strategy_id.clone_from(&entity.trading_strategy_id);
    }
}

/// Position of the first entry with identifier `id`.
fn position<D: EntryCollection>(document: &D, id: &str) -> Option<usize> {
    document.entries().iter().position(|e| D::entry_id(e) == id)
}

/// Repository over a collection document of type `D` persisted by store `S`.
pub struct CollectionRepository<D, S> {
    /// Injected document store.
    store: Arc<S>,
    /// Data and schema files backing this repository.
    location: DocumentLocation,
    /// Write lock shared by all writers of `location.data_path`.
    write_lock: Arc<Mutex<()>>,
    _document: PhantomData<fn() -> D>,
}

/// Strategies repository.
pub type StrategyRepository<S> = CollectionRepository<StrategiesDocument, S>;

/// Markets repository.
pub type MarketRepository<S> = CollectionRepository<MarketsDocument, S>;

impl<D, S> CollectionRepository<D, S>
where
    D: EntryCollection,
    S: DocumentStore<D>,
{
    /// Create a repository reading and writing `location` through `store`.
    pub fn new(store: Arc<S>, location: DocumentLocation) -> Self {
        let write_lock = document_lock(&location.data_path);
        Self {
            store,
            location,
            write_lock,
            _document: PhantomData,
        }
    }

    /// Files backing this repository.
    pub const fn location(&self) -> &DocumentLocation {
        &self.location
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, RepositoryError> {
        self.write_lock
            .lock()
            .map_err(|_| RepositoryError::LockPoisoned)
    }

    fn load(&self) -> Result<D, RepositoryError> {
        Ok(self.store.load(&self.location)?)
    }

    fn save(&self, document: &D) -> Result<(), RepositoryError> {
        self.store.save(document, &self.location)?;
        Ok(())
    }

    /// Re-read the document and map the entry `id`, confirming the write landed.
    fn reload_entry(&self, id: &str) -> Result<D::Entity, RepositoryError> {
        let document = self.load()?;
        let index = position(&document, id).ok_or_else(|| RepositoryError::WriteNotConfirmed {
            id: id.to_string(),
        })?;
        Ok(D::to_external(&document.entries()[index])?)
    }
}

impl<D, S> ConfigRepository<D::Entity> for CollectionRepository<D, S>
where
    D: EntryCollection,
    S: DocumentStore<D>,
{
    #[instrument(skip(self), fields(kind = D::KIND))]
    fn find_all(&self) -> Result<Vec<D::Entity>, RepositoryError> {
        let document = self.load()?;
        let entities = document
            .entries()
            .iter()
            .map(D::to_external)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = entities.len(), "Fetched all entries");
        Ok(entities)
    }

    #[instrument(skip(self), fields(kind = D::KIND))]
    fn find_by_id(&self, id: &str) -> Result<Option<D::Entity>, RepositoryError> {
        let document = self.load()?;
        match position(&document, id) {
            Some(index) => Ok(Some(D::to_external(&document.entries()[index])?)),
            None => {
                debug!("No entry with this id");
                Ok(None)
            }
        }
    }

    #[instrument(skip_all, fields(kind = D::KIND, id = %entity.id()))]
    fn create(&self, entity: &D::Entity) -> Result<Outcome<D::Entity>, RepositoryError> {
        let _guard = self.lock()?;
        let mut document = self.load()?;

        if position(&document, entity.id()).is_some() {
            warn!("Entry already exists, create rejected");
            return Ok(Outcome::Conflict);
        }

        document.entries_mut().push(D::to_internal(entity));
        self.save(&document)?;

        let created = self.reload_entry(entity.id())?;
        info!(count = document.entries().len(), "Entry created");
        Ok(Outcome::Found(created))
    }

    #[instrument(skip_all, fields(kind = D::KIND, id = %entity.id()))]
    fn update(&self, entity: &D::Entity) -> Result<Outcome<D::Entity>, RepositoryError> {
        let _guard = self.lock()?;
        let mut document = self.load()?;

        let Some(index) = position(&document, entity.id()) else {
            debug!("No entry with this id, nothing updated");
            return Ok(Outcome::NotFound);
        };

        D::apply_update(&mut document.entries_mut()[index], entity);
        self.save(&document)?;

        let updated = self.reload_entry(entity.id())?;
        info!(position = index, "Entry updated");
        Ok(Outcome::Found(updated))
    }

    #[instrument(skip(self), fields(kind = D::KIND))]
    fn delete_by_id(&self, id: &str) -> Result<Outcome<D::Entity>, RepositoryError> {
        let _guard = self.lock()?;
        let mut document = self.load()?;

        let Some(index) = position(&document, id) else {
            debug!("No entry with this id, nothing deleted");
            return Ok(Outcome::NotFound);
        };

        // Pre-image: callers get what was removed, not a re-read.
        let deleted = D::to_external(&document.entries()[index])?;
        document.entries_mut().remove(index);
        self.save(&document)?;

        info!(count = document.entries().len(), "Entry deleted");
        Ok(Outcome::Found(deleted))
    }
}
