//! Settings registry: the only shared mutable state in the execution pipeline.
//!
//! Entries are keyed by (venue, asset class, pair) with the venue name compared
//! case-insensitively. Every operation takes the same lock, so a backtest
//! evaluating instruments on several threads sees consistent settings.

use super::types::Settings;
use crate::domain::{AssetClass, CurrencyPair};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SettingsError {
    #[error("no settings found for {exchange} {asset} {pair}")]
    NotFound {
        exchange: String,
        asset: String,
        pair: CurrencyPair,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SettingsKey {
    exchange: String,
    asset: AssetClass,
    pair: CurrencyPair,
}

impl SettingsKey {
    fn new(exchange: &str, asset: AssetClass, pair: &CurrencyPair) -> Self {
        Self {
            exchange: exchange.to_lowercase(),
            asset,
            pair: pair.clone(),
        }
    }
}

/// Registry of per-instrument settings.
///
/// After [`SettingsRegistry::reset`] the registry is uninitialized again: it
/// holds no collection at all until the next upsert.
#[derive(Debug, Default)]
pub struct SettingsRegistry {
    entries: Mutex<Option<HashMap<SettingsKey, Settings>>>,
}

impl SettingsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<HashMap<SettingsKey, Settings>>> {
        // the map is never left half-written, so a poisoned lock is still usable
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert settings for a key, replacing any existing entry for it.
    ///
    /// An empty venue name or pair cannot identify an instrument; such calls
    /// store nothing.
    pub fn upsert(&self, exchange: &str, asset: AssetClass, pair: &CurrencyPair, mut settings: Settings) {
        if exchange.is_empty() || pair.is_empty() {
            warn!(exchange, %asset, %pair, "ignoring settings with empty exchange or pair");
            return;
        }
        settings.exchange_name = exchange.to_string();
        settings.asset = asset;
        settings.pair = pair.clone();

        let key = SettingsKey::new(exchange, asset, pair);
        let replaced = self
            .lock()
            .get_or_insert_with(HashMap::new)
            .insert(key, settings)
            .is_some();
        debug!(exchange, %asset, %pair, replaced, "settings upserted");
    }

    /// Settings for a key, cloned out of the registry.
    pub fn lookup(
        &self,
        exchange: &str,
        asset: AssetClass,
        pair: &CurrencyPair,
    ) -> Result<Settings, SettingsError> {
        let key = SettingsKey::new(exchange, asset, pair);
        self.lock()
            .as_ref()
            .and_then(|entries| entries.get(&key))
            .cloned()
            .ok_or_else(|| SettingsError::NotFound {
                exchange: exchange.to_string(),
                asset: asset.to_string(),
                pair: pair.clone(),
            })
    }

    /// Drop every entry and return to the uninitialized state.
    pub fn reset(&self) {
        *self.lock() = None;
        debug!("settings registry reset");
    }

    pub fn len(&self) -> usize {
        self.lock().as_ref().map_or(0, HashMap::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// False until the first successful upsert, and again after a reset.
    pub fn is_initialized(&self) -> bool {
        self.lock().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const TEST_EXCHANGE: &str = "binance";

    fn btc_usdt() -> CurrencyPair {
        CurrencyPair::new("BTC", "USDT")
    }

    fn settings(initial_funds: f64) -> Settings {
        Settings {
            initial_funds,
            ..Settings::new(TEST_EXCHANGE, AssetClass::Spot, btc_usdt())
        }
    }

    #[test]
    fn reset_returns_to_uninitialized() {
        let registry = SettingsRegistry::new();
        registry.upsert(TEST_EXCHANGE, AssetClass::Spot, &btc_usdt(), settings(1.0));
        assert!(registry.is_initialized());

        registry.reset();
        assert!(!registry.is_initialized());
        assert_eq!(registry.len(), 0);
        assert!(matches!(
            registry.lookup(TEST_EXCHANGE, AssetClass::Spot, &btc_usdt()),
            Err(SettingsError::NotFound { .. })
        ));
    }

    #[test]
    fn empty_key_is_ignored() {
        let registry = SettingsRegistry::new();
        registry.upsert("", AssetClass::Spot, &CurrencyPair::default(), Settings::default());
        assert_eq!(registry.len(), 0);
        assert!(!registry.is_initialized());
    }

    #[test]
    fn upsert_then_lookup() {
        let registry = SettingsRegistry::new();
        registry.upsert(TEST_EXCHANGE, AssetClass::Spot, &btc_usdt(), settings(1337.0));
        let found = registry.lookup(TEST_EXCHANGE, AssetClass::Spot, &btc_usdt()).unwrap();
        assert_eq!(found.initial_funds, 1337.0);
    }

    #[test]
    fn second_upsert_replaces() {
        let registry = SettingsRegistry::new();
        registry.upsert(TEST_EXCHANGE, AssetClass::Spot, &btc_usdt(), settings(1337.0));
        registry.upsert(TEST_EXCHANGE, AssetClass::Spot, &btc_usdt(), settings(42.0));
        assert_eq!(registry.len(), 1);
        let found = registry.lookup(TEST_EXCHANGE, AssetClass::Spot, &btc_usdt()).unwrap();
        assert_eq!(found.initial_funds, 42.0);
    }

    #[test]
    fn venue_name_is_case_insensitive() {
        let registry = SettingsRegistry::new();
        registry.upsert("Binance", AssetClass::Spot, &btc_usdt(), settings(1.0));
        registry.upsert("BINANCE", AssetClass::Spot, &btc_usdt(), settings(2.0));
        assert_eq!(registry.len(), 1);
        assert!(registry.lookup("binance", AssetClass::Spot, &btc_usdt()).is_ok());
    }

    #[test]
    fn asset_and_pair_are_part_of_the_key() {
        let registry = SettingsRegistry::new();
        registry.upsert(TEST_EXCHANGE, AssetClass::Spot, &btc_usdt(), settings(1.0));
        registry.upsert(TEST_EXCHANGE, AssetClass::Futures, &btc_usdt(), settings(2.0));
        registry.upsert(TEST_EXCHANGE, AssetClass::Spot, &CurrencyPair::new("ETH", "USDT"), settings(3.0));
        assert_eq!(registry.len(), 3);
        assert!(registry.lookup(TEST_EXCHANGE, AssetClass::Margin, &btc_usdt()).is_err());
    }

    #[test]
    fn upsert_overwrites_identity_fields() {
        let registry = SettingsRegistry::new();
        registry.upsert("Kraken", AssetClass::Margin, &btc_usdt(), Settings::default());
        let found = registry.lookup("kraken", AssetClass::Margin, &btc_usdt()).unwrap();
        assert_eq!(found.exchange_name, "Kraken");
        assert_eq!(found.asset, AssetClass::Margin);
        assert_eq!(found.pair, btc_usdt());
    }

    #[test]
    fn lookup_on_empty_registry_fails() {
        let registry = SettingsRegistry::new();
        assert!(registry.lookup(TEST_EXCHANGE, AssetClass::Spot, &btc_usdt()).is_err());
    }

    #[test]
    fn concurrent_upserts_keep_one_entry_per_key() {
        let registry = Arc::new(SettingsRegistry::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        registry.upsert(TEST_EXCHANGE, AssetClass::Spot, &btc_usdt(), settings(i as f64));
                        let _ = registry.lookup(TEST_EXCHANGE, AssetClass::Spot, &btc_usdt());
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(registry.len(), 1);
    }
}
