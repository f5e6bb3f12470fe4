//! Currency pair: the instrument an order trades.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Base/quote pair, e.g. BTC/USDT.
///
/// Currency codes are upper-cased on construction so that two pairs naming the
/// same currencies compare equal regardless of how the caller spelled them.
/// Deserialization goes through the same path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawPair")]
pub struct CurrencyPair {
    pub base: String,
    pub quote: String,
}

impl CurrencyPair {
    pub fn new(base: &str, quote: &str) -> Self {
        Self {
            base: base.trim().to_uppercase(),
            quote: quote.trim().to_uppercase(),
        }
    }

    /// True when either side of the pair is unset.
    pub fn is_empty(&self) -> bool {
        self.base.is_empty() || self.quote.is_empty()
    }
}

#[derive(Deserialize)]
struct RawPair {
    base: String,
    quote: String,
}

impl From<RawPair> for CurrencyPair {
    fn from(raw: RawPair) -> Self {
        Self::new(&raw.base, &raw.quote)
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_normalizes_case() {
        assert_eq!(CurrencyPair::new("btc", "usdt"), CurrencyPair::new("BTC", "USDT"));
    }

    #[test]
    fn deserialize_normalizes_case() {
        let pair: CurrencyPair = serde_json::from_str(r#"{"base": " btc", "quote": "usdt"}"#).unwrap();
        assert_eq!(pair, CurrencyPair::new("BTC", "USDT"));
        assert_eq!(serde_json::to_string(&pair).unwrap(), r#"{"base":"BTC","quote":"USDT"}"#);
    }

    #[test]
    fn default_pair_is_empty() {
        assert!(CurrencyPair::default().is_empty());
        assert!(CurrencyPair::new("BTC", "").is_empty());
        assert!(!CurrencyPair::new("BTC", "USDT").is_empty());
    }

    #[test]
    fn display_uses_slash() {
        assert_eq!(CurrencyPair::new("eth", "btc").to_string(), "ETH/BTC");
    }
}
