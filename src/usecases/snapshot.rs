//! Config Snapshot - Consistent View of All Configuration Documents
//!
//! Reads strategies, markets and exchange in one go, e.g. for the
//! trading engine at startup or after a hot reload. Cross-document
//! references are reported here but never enforced.

use std::collections::HashSet;

use tracing::warn;

use crate::domain::{ExchangeConfig, MarketConfig, StrategyConfig};
use crate::ports::repository::{ConfigRepository, ExchangeConfigRepository, RepositoryError};

/// All trading configuration at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSnapshot {
  pub strategies: Vec<StrategyConfig>,
  pub markets: Vec<MarketConfig>,
  pub exchange: ExchangeConfig,
}

impl ConfigSnapshot {
  /// Load every document through its repository.
  ///
  /// Any store or mapping fault aborts the whole snapshot.
  pub fn load(
    strategies: &impl ConfigRepository<StrategyConfig>,
    markets: &impl ConfigRepository<MarketConfig>,
    exchange: &impl ExchangeConfigRepository,
  ) -> Result<Self, RepositoryError> {
    let snapshot = Self {
      strategies: strategies.find_all()?,
      markets: markets.find_all()?,
      exchange: exchange.get()?,
    };

    for market in snapshot.dangling_strategy_refs() {
      warn!(
        market = %market.id,
        strategy = %market.trading_strategy_id,
        "Market references an unknown strategy"
      );
    }

    Ok(snapshot)
  }

  /// Markets whose strategy id matches no strategy in this snapshot.
  pub fn dangling_strategy_refs(&self) -> Vec<&MarketConfig> {
    let known: HashSet<&str> = self.strategies.iter().map(|s| s.id.as_str()).collect();
    self
      .markets
      .iter()
      .filter(|m| !known.contains(m.trading_strategy_id.as_str()))
      .collect()
  }

  /// Enabled markets only.
  pub fn enabled_markets(&self) -> impl Iterator<Item = &MarketConfig> {
    self.markets.iter().filter(|m| m.enabled)
  }
}
