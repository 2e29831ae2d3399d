//! Persistence Adapters - JSON Document Storage
//!
//! Implements the DocumentStore port with schema-validated JSON files
//! written atomically, and the repository ports on top of it. No
//! database dependency: each configuration class is one small file.

pub mod collection;
pub mod documents;
pub mod exchange;
pub mod json_store;
pub mod locks;
pub mod mapper;
pub mod memory_store;
pub mod repository_impl;

pub use collection::{CollectionRepository, EntryCollection, MarketRepository, StrategyRepository};
pub use exchange::ExchangeRepository;
pub use json_store::JsonDocumentStore;
pub use memory_store::MemoryDocumentStore;
pub use repository_impl::ConfigRepositories;
