//! Entity Mapper - Persisted Entries ↔ Caller-Facing Entities
//!
//! Pure conversions, no I/O. Settings blocks become maps on the way
//! out (an absent block maps to an empty map) and are always written
//! back as a present, possibly empty, block on the way in.
//!
//! Caller-facing maps are keyed, so items are written in key order.
//! Anything written through this module therefore reads back to the
//! same entry; a hand-written block in another order is normalized on
//! its next save.

use std::collections::BTreeMap;

use super::documents::{
    ConfigItem, ConfigItems, ExchangeEntry, MarketEntry, NetworkConfigEntry, StrategyEntry,
};
use crate::domain::{ExchangeConfig, MarketConfig, NetworkConfig, StrategyConfig};
use crate::ports::MappingError;

/// Flatten a settings block into a map.
///
/// Duplicate names would silently lose a value, so they are rejected.
pub fn items_to_map(
    owner: &str,
    items: Option<&ConfigItems>,
) -> Result<BTreeMap<String, String>, MappingError> {
    let mut map = BTreeMap::new();
    for item in items.map(|c| c.config_items.as_slice()).unwrap_or_default() {
        if map.insert(item.name.clone(), item.value.clone()).is_some() {
            return Err(MappingError {
                entry: owner.to_string(),
                reason: format!("duplicate config item '{}'", item.name),
            });
        }
    }
    Ok(map)
}

/// Expand a map into a settings block, in key order.
pub fn map_to_items(map: &BTreeMap<String, String>) -> ConfigItems {
    ConfigItems {
        config_items: map
            .iter()
            .map(|(name, value)| ConfigItem {
                name: name.clone(),
                value: value.clone(),
            })
            .collect(),
    }
}

pub fn strategy_to_external(entry: &StrategyEntry) -> Result<StrategyConfig, MappingError> {
    Ok(StrategyConfig {
        id: entry.id.clone(),
        name: entry.name.clone(),
        description: entry.description.clone(),
        class_name: entry.class_name.clone(),
        config_items: items_to_map(&entry.id, entry.optional_config.as_ref())?,
    })
}

pub fn strategy_to_internal(config: &StrategyConfig) -> StrategyEntry {
    StrategyEntry {
        id: config.id.clone(),
        name: config.name.clone(),
        description: config.description.clone(),
        class_name: config.class_name.clone(),
        optional_config: Some(map_to_items(&config.config_items)),
    }
}

pub fn market_to_external(entry: &MarketEntry) -> MarketConfig {
    MarketConfig {
        id: entry.id.clone(),
        name: entry.name.clone(),
        base_currency: entry.base_currency.clone(),
        counter_currency: entry.counter_currency.clone(),
        enabled: entry.enabled,
        trading_strategy_id: entry.trading_strategy_id.clone(),
    }
}

pub fn market_to_internal(config: &MarketConfig) -> MarketEntry {
    MarketEntry {
        id: config.id.clone(),
        name: config.name.clone(),
        base_currency: config.base_currency.clone(),
        counter_currency: config.counter_currency.clone(),
        enabled: config.enabled,
        trading_strategy_id: config.trading_strategy_id.clone(),
    }
}

/// Map the exchange entry, dropping its authentication block.
pub fn exchange_to_external(entry: &ExchangeEntry) -> Result<ExchangeConfig, MappingError> {
    Ok(ExchangeConfig {
        name: entry.name.clone(),
        class_name: entry.adapter.clone(),
        network_config: NetworkConfig {
            connection_timeout: entry.network_config.connection_timeout,
            non_fatal_error_http_status_codes: entry.network_config.non_fatal_error_codes.clone(),
            non_fatal_error_messages: entry.network_config.non_fatal_error_messages.clone(),
        },
        other_config: items_to_map(&entry.name, entry.other_config.as_ref())?,
    })
}

/// Build an exchange entry carrying over the given authentication block.
pub fn exchange_to_internal(
    config: &ExchangeConfig,
    authentication_config: Option<ConfigItems>,
) -> ExchangeEntry {
    ExchangeEntry {
        name: config.name.clone(),
        adapter: config.class_name.clone(),
        authentication_config,
        network_config: NetworkConfigEntry {
            connection_timeout: config.network_config.connection_timeout,
            non_fatal_error_codes: config.network_config.non_fatal_error_http_status_codes.clone(),
            non_fatal_error_messages: config.network_config.non_fatal_error_messages.clone(),
        },
        other_config: Some(map_to_items(&config.other_config)),
    }
}
