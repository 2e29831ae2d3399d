//! Exchange adapter configuration as seen by callers.
//!
//! Authentication credentials are absent: they live only in
//! the persisted document and are never read back out through this type.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The single exchange adapter the bot connects to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeConfig {
    /// Exchange display name.
    pub name: String,
    /// Fully-qualified name of the exchange adapter implementation.
    pub class_name: String,
    /// Network behaviour of the adapter.
    pub network_config: NetworkConfig,
    /// Adapter-specific settings (key → value).
    #[serde(default)]
    pub other_config: BTreeMap<String, String>,
}

/// Network settings for the exchange adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Connection timeout in seconds.
    pub connection_timeout: u32,
    /// HTTP status codes that are retried rather than treated as fatal.
    #[serde(default)]
    pub non_fatal_error_http_status_codes: Vec<u16>,
    /// Error message fragments that are retried rather than treated as fatal.
    #[serde(default)]
    pub non_fatal_error_messages: Vec<String>,
}
