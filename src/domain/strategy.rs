//! Trading strategy configuration as seen by callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Identified;

/// A trading strategy definition.
///
/// `config_items` carries the strategy-specific settings handed to the
/// algorithm at startup. It is always present; a strategy without
/// settings has an empty map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyConfig {
    /// Unique strategy identifier, e.g. `macd-long-position`.
    pub id: String,
    /// Human-readable strategy name.
    pub name: String,
    /// Free-form description of what the strategy does.
    pub description: String,
    /// Fully-qualified name of the algorithm implementation.
    pub class_name: String,
    /// Strategy settings (key → value).
    #[serde(default)]
    pub config_items: BTreeMap<String, String>,
}

impl StrategyConfig {
    /// Create a strategy with no config items.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            class_name: class_name.into(),
            config_items: BTreeMap::new(),
        }
    }

    /// Builder-style helper adding a single config item.
    #[must_use]
    pub fn with_config_item(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config_items.insert(name.into(), value.into());
        self
    }
}

impl Identified for StrategyConfig {
    fn id(&self) -> &str {
        &self.id
    }
}
