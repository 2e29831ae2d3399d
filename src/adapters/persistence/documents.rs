//! Persisted Document Shapes
//!
//! Plain serde structs mirroring the JSON data files one-to-one. The
//! schema files in the datastore directory describe the same shapes;
//! keys are kebab-case and optional settings blocks may be omitted.

use serde::{Deserialize, Serialize};

/// A single `{name, value}` setting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigItem {
    pub name: String,
    pub value: String,
}

/// An ordered list of settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigItems {
    #[serde(default)]
    pub config_items: Vec<ConfigItem>,
}

// ── strategies.json ─────────────────────────────────────────

/// Root of `strategies.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategiesDocument {
    #[serde(default)]
    pub strategies: Vec<StrategyEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StrategyEntry {
    pub id: String,
    pub name: String,
    pub description: String,
    pub class_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optional_config: Option<ConfigItems>,
}

// ── markets.json ────────────────────────────────────────────

/// Root of `markets.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketsDocument {
    #[serde(default)]
    pub markets: Vec<MarketEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MarketEntry {
    pub id: String,
    pub name: String,
    pub base_currency: String,
    pub counter_currency: String,
    pub enabled: bool,
    pub trading_strategy_id: String,
}

// ── exchange.json ───────────────────────────────────────────

/// Root of `exchange.json`. Holds exactly one exchange.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeDocument {
    pub exchange: ExchangeEntry,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ExchangeEntry {
    pub name: String,
    /// Adapter implementation name.
    pub adapter: String,
    /// API credentials. Never mapped to the caller-facing type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authentication_config: Option<ConfigItems>,
    pub network_config: NetworkConfigEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_config: Option<ConfigItems>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfigEntry {
    /// Seconds.
    pub connection_timeout: u32,
    #[serde(default)]
    pub non_fatal_error_codes: Vec<u16>,
    #[serde(default)]
    pub non_fatal_error_messages: Vec<String>,
}
