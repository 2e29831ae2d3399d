//! Market configuration as seen by callers.

use serde::{Deserialize, Serialize};

use super::Identified;

/// A market the bot can trade on, bound to one strategy.
///
/// `trading_strategy_id` is not checked against the strategies document
/// here; a dangling reference is accepted and only reported by
/// [`crate::usecases::snapshot::ConfigSnapshot::dangling_strategy_refs`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketConfig {
    /// Unique market identifier, e.g. `btc_usd`.
    pub id: String,
    /// Display name, e.g. `BTC/USD`.
    pub name: String,
    /// Base currency code.
    pub base_currency: String,
    /// Counter currency code.
    pub counter_currency: String,
    /// Whether the engine should trade this market.
    pub enabled: bool,
    /// Strategy executed on this market.
    pub trading_strategy_id: String,
}

impl Identified for MarketConfig {
    fn id(&self) -> &str {
        &self.id
    }
}
