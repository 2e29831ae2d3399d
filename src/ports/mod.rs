//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the use cases and callers
//! require from the persistence side. Adapters implement these traits.
//!
//! Port categories:
//! - `DocumentStore`: Whole-document load/save with schema validation
//! - `ConfigRepository`: CRUD over strategies and markets
//! - `ExchangeConfigRepository`: Get/replace the singleton exchange document

pub mod document_store;
pub mod repository;

pub use document_store::{DocumentLocation, DocumentStore, StoreError};
pub use repository::{
  ConfigRepository, ExchangeConfigRepository, MappingError, Outcome, RepositoryError,
};
