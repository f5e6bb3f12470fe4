//! Execution configuration loaded from TOML.
//!
//! ```toml
//! seed = 42
//!
//! [[settings]]
//! exchange_name = "binance"
//! asset = "spot"
//! pair = { base = "BTC", quote = "USDT" }
//! initial_funds = 1337.0
//! exchange_fee = 0.001
//! minimum_slippage_rate = 0.95
//! maximum_slippage_rate = 1.0
//! ```

use crate::execution::{RandomSlippage, SeededSlippage, SlippageRateSource};
use crate::settings::{Settings, SettingsRegistry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read execution config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse execution config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Master seed for slippage draws. Absent means non-reproducible draws.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub settings: Vec<Settings>,
}

impl ExecutionConfig {
    /// Load a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Fresh registry holding every configured entry. Later entries with the
    /// same key replace earlier ones.
    pub fn into_registry(self) -> SettingsRegistry {
        let registry = SettingsRegistry::new();
        for settings in self.settings {
            let exchange = settings.exchange_name.clone();
            let pair = settings.pair.clone();
            registry.upsert(&exchange, settings.asset, &pair, settings);
        }
        info!(entries = registry.len(), "settings registry loaded");
        registry
    }

    pub fn slippage_source(&self) -> Box<dyn SlippageRateSource> {
        match self.seed {
            Some(seed) => Box::new(SeededSlippage::new(seed)),
            None => Box::new(RandomSlippage::from_entropy()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetClass, CurrencyPair};
    use crate::settings::ExecutionMode;

    const CONFIG: &str = r#"
seed = 42

[[settings]]
exchange_name = "Binance"
asset = "spot"
pair = { base = "BTC", quote = "USDT" }
initial_funds = 1337.0
exchange_fee = 0.001
minimum_slippage_rate = 0.95
maximum_slippage_rate = 1.0

[settings.buy_side]
minimum_size = 0.001
maximum_size = 2.0

[settings.leverage]
can_use_leverage = true
maximum_leverage_rate = 2.0

[[settings]]
exchange_name = "kraken"
asset = "futures"
pair = { base = "ETH", quote = "USD" }
mode = "live"
can_use_exchange_limits = true
"#;

    #[test]
    fn parses_full_config() {
        let config = ExecutionConfig::from_toml(CONFIG).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.settings.len(), 2);

        let binance = &config.settings[0];
        assert_eq!(binance.initial_funds, 1337.0);
        assert_eq!(binance.buy_side.maximum_size, 2.0);
        assert_eq!(binance.sell_side.maximum_size, 0.0);
        assert_eq!(binance.leverage.multiplier(), 2.0);
        assert_eq!(config.settings[1].mode, ExecutionMode::Live);
    }

    #[test]
    fn into_registry_keys_entries() {
        let registry = ExecutionConfig::from_toml(CONFIG).unwrap().into_registry();
        assert_eq!(registry.len(), 2);
        let found = registry
            .lookup("binance", AssetClass::Spot, &CurrencyPair::new("BTC", "USDT"))
            .unwrap();
        assert_eq!(found.exchange_fee, 0.001);
        assert!(registry
            .lookup("kraken", AssetClass::Futures, &CurrencyPair::new("ETH", "USD"))
            .is_ok());
    }

    #[test]
    fn lowercase_pair_is_found() {
        let config = ExecutionConfig::from_toml(
            r#"
[[settings]]
exchange_name = "binance"
asset = "spot"
pair = { base = "btc", quote = "usdt" }
"#,
        )
        .unwrap();
        assert_eq!(config.settings[0].pair, CurrencyPair::new("BTC", "USDT"));
        let registry = config.into_registry();
        assert!(registry
            .lookup("binance", AssetClass::Spot, &CurrencyPair::new("BTC", "USDT"))
            .is_ok());
    }

    #[test]
    fn empty_config_is_valid() {
        let config = ExecutionConfig::from_toml("").unwrap();
        assert!(config.seed.is_none());
        assert!(!config.into_registry().is_initialized());
    }

    #[test]
    fn slippage_source_follows_seed() {
        let seeded = ExecutionConfig { seed: Some(7), ..Default::default() };
        assert_eq!(seeded.slippage_source().name(), "SeededSlippage");
        assert_eq!(ExecutionConfig::default().slippage_source().name(), "RandomSlippage");
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = ExecutionConfig::from_toml("seed = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = ExecutionConfig::from_file(Path::new("/nonexistent/execution.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
