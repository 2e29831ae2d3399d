//! Domain layer - Caller-facing configuration entities.
//!
//! These are the flat representations exchanged with higher layers
//! (HTTP API, trading engine). They know nothing about how or where
//! configuration is persisted (hexagonal architecture inner ring).

pub mod exchange;
pub mod market;
pub mod strategy;

// Re-export core types for convenience
pub use exchange::{ExchangeConfig, NetworkConfig};
pub use market::MarketConfig;
pub use strategy::StrategyConfig;

/// An entity addressed by a caller-supplied string identifier.
pub trait Identified {
    /// The entity's identifier. Empty means "unset".
    fn id(&self) -> &str;
}
