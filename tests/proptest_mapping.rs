//! Property-Based Tests — Mapping and Repository Invariants
//!
//! Uses `proptest` to verify that entities survive the trip through
//! the persisted shape, and that arbitrary create sequences never
//! produce duplicate identifiers.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use proptest::prelude::*;

use tradebot_config_store::adapters::persistence::documents::{
    ExchangeEntry, MarketEntry, NetworkConfigEntry, StrategiesDocument, StrategyEntry,
};
use tradebot_config_store::adapters::persistence::mapper;
use tradebot_config_store::adapters::persistence::{MemoryDocumentStore, StrategyRepository};
use tradebot_config_store::domain::{ExchangeConfig, MarketConfig, NetworkConfig, StrategyConfig};
use tradebot_config_store::ports::document_store::DocumentLocation;
use tradebot_config_store::ports::repository::{ConfigRepository, Outcome};

// ── Strategies ──────────────────────────────────────────────

fn settings() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map("[a-z][a-z0-9-]{0,15}", ".{0,12}", 0..6)
}

fn strategy_config() -> impl Strategy<Value = StrategyConfig> {
    (
        "[a-z][a-z0-9-]{0,20}",
        ".{1,30}",
        ".{0,60}",
        "[a-z]{1,8}(\\.[A-Za-z]{1,12}){1,3}",
        settings(),
    )
        .prop_map(|(id, name, description, class_name, config_items)| StrategyConfig {
            id,
            name,
            description,
            class_name,
            config_items,
        })
}

fn market_config() -> impl Strategy<Value = MarketConfig> {
    (
        "[a-z]{3}_[a-z]{3}",
        ".{1,12}",
        "[A-Z]{3}",
        "[A-Z]{3}",
        any::<bool>(),
        "[a-z][a-z0-9-]{0,20}",
    )
        .prop_map(
            |(id, name, base_currency, counter_currency, enabled, trading_strategy_id)| {
                MarketConfig {
                    id,
                    name,
                    base_currency,
                    counter_currency,
                    enabled,
                    trading_strategy_id,
                }
            },
        )
}

fn exchange_config() -> impl Strategy<Value = ExchangeConfig> {
    (
        ".{1,20}",
        "[a-z]{1,8}(\\.[A-Za-z]{1,12}){1,3}",
        1u32..600,
        prop::collection::vec(400u16..600, 0..6),
        prop::collection::vec(".{1,40}", 0..4),
        settings(),
    )
        .prop_map(|(name, class_name, timeout, codes, messages, other_config)| ExchangeConfig {
            name,
            class_name,
            network_config: NetworkConfig {
                connection_timeout: timeout,
                non_fatal_error_http_status_codes: codes,
                non_fatal_error_messages: messages,
            },
            other_config,
        })
}

// Persisted entries as the mapper writes them: settings blocks present,
// sorted by name, names unique.

fn strategy_entry() -> impl Strategy<Value = StrategyEntry> {
    strategy_config().prop_map(|config| StrategyEntry {
        id: config.id,
        name: config.name,
        description: config.description,
        class_name: config.class_name,
        optional_config: Some(mapper::map_to_items(&config.config_items)),
    })
}

fn market_entry() -> impl Strategy<Value = MarketEntry> {
    market_config().prop_map(|config| MarketEntry {
        id: config.id,
        name: config.name,
        base_currency: config.base_currency,
        counter_currency: config.counter_currency,
        enabled: config.enabled,
        trading_strategy_id: config.trading_strategy_id,
    })
}

fn exchange_entry() -> impl Strategy<Value = ExchangeEntry> {
    (exchange_config(), prop::option::of(settings())).prop_map(|(config, credentials)| {
        ExchangeEntry {
            name: config.name,
            adapter: config.class_name,
            authentication_config: credentials.as_ref().map(mapper::map_to_items),
            network_config: NetworkConfigEntry {
                connection_timeout: config.network_config.connection_timeout,
                non_fatal_error_codes: config.network_config.non_fatal_error_http_status_codes,
                non_fatal_error_messages: config.network_config.non_fatal_error_messages,
            },
            other_config: Some(mapper::map_to_items(&config.other_config)),
        }
    })
}

// ── Round Trips ─────────────────────────────────────────────

proptest! {
    /// A strategy reads back equal after being written, settings included.
    #[test]
    fn strategy_round_trips(config in strategy_config()) {
        let entry = mapper::strategy_to_internal(&config);
        prop_assert!(entry.optional_config.is_some(), "settings block must always be written");
        prop_assert_eq!(mapper::strategy_to_external(&entry).unwrap(), config);
    }

    /// A market reads back equal after being written.
    #[test]
    fn market_round_trips(config in market_config()) {
        let entry = mapper::market_to_internal(&config);
        prop_assert_eq!(mapper::market_to_external(&entry), config);
    }

    /// An exchange reads back equal, and the credentials handed in are kept.
    #[test]
    fn exchange_round_trips(config in exchange_config(), credentials in settings()) {
        let auth = mapper::map_to_items(&credentials);
        let entry = mapper::exchange_to_internal(&config, Some(auth.clone()));
        prop_assert_eq!(entry.authentication_config.as_ref(), Some(&auth));
        prop_assert_eq!(mapper::exchange_to_external(&entry).unwrap(), config);
    }

    /// Strategies with no settings stay empty rather than absent.
    #[test]
    fn empty_settings_round_trip(mut config in strategy_config()) {
        config.config_items.clear();
        let entry = mapper::strategy_to_internal(&config);
        prop_assert_eq!(entry.optional_config.as_ref().map(|c| c.config_items.len()), Some(0));
        prop_assert!(mapper::strategy_to_external(&entry).unwrap().config_items.is_empty());
    }
}

proptest! {
    /// A stored strategy entry is written back exactly as it was read.
    #[test]
    fn strategy_entry_round_trips(entry in strategy_entry()) {
        let config = mapper::strategy_to_external(&entry).unwrap();
        prop_assert_eq!(mapper::strategy_to_internal(&config), entry);
    }

    /// A stored market entry is written back exactly as it was read.
    #[test]
    fn market_entry_round_trips(entry in market_entry()) {
        let config = mapper::market_to_external(&entry);
        prop_assert_eq!(mapper::market_to_internal(&config), entry);
    }

    /// A stored exchange entry comes back unchanged once its credentials
    /// are handed back in.
    #[test]
    fn exchange_entry_round_trips(entry in exchange_entry()) {
        let config = mapper::exchange_to_external(&entry).unwrap();
        let written = mapper::exchange_to_internal(&config, entry.authentication_config.clone());
        prop_assert_eq!(written, entry);
    }
}

// ── Repository Invariants ───────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Any sequence of creates leaves every id at most once, and the
    /// first create of an id wins.
    #[test]
    fn creates_never_duplicate_ids(ids in prop::collection::vec("[a-d]", 1..12)) {
        let store = Arc::new(MemoryDocumentStore::new(StrategiesDocument::default()));
        let repo = StrategyRepository::new(
            Arc::clone(&store),
            DocumentLocation::new("prop/strategies.json", "prop/strategies.schema.json"),
        );

        let mut seen = HashSet::new();
        for id in &ids {
            let outcome = repo
                .create(&StrategyConfig::new(id.as_str(), "Name", "", "x.Algo"))
                .unwrap();
            if seen.insert(id.clone()) {
                prop_assert!(outcome.is_found());
            } else {
                prop_assert_eq!(outcome, Outcome::Conflict);
            }
        }

        let stored: Vec<String> = store.snapshot().strategies.into_iter().map(|s| s.id).collect();
        let unique: HashSet<&String> = stored.iter().collect();
        prop_assert_eq!(unique.len(), stored.len());
        prop_assert_eq!(stored.len(), seen.len());
    }
}
