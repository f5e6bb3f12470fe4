//! Market context: what the candle for the current period says about the market.

use serde::{Deserialize, Serialize};

/// Close, high, low and traded volume for one historical period.
///
/// Volume is the notional traded in the period (price × amount units), which
/// is what the liquidity clamp bounds fills against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    pub close: f64,
    pub high: f64,
    pub low: f64,
    pub volume: f64,
}

impl MarketContext {
    pub fn new(close: f64, high: f64, low: f64, volume: f64) -> Self {
        Self { close, high, low, volume }
    }

    /// Returns true if the candle cannot be used to bound a fill.
    pub fn is_unusable(&self) -> bool {
        candle_is_unusable(self.high, self.low, self.volume)
    }
}

/// A candle with high < low, with all of high/low/volume at zero, or with any
/// NaN field carries no usable price range.
pub fn candle_is_unusable(high: f64, low: f64, volume: f64) -> bool {
    if high.is_nan() || low.is_nan() || volume.is_nan() {
        return true;
    }
    high < low || (high == 0.0 && low == 0.0 && volume == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_zero_candle_is_unusable() {
        assert!(MarketContext::default().is_unusable());
    }

    #[test]
    fn inverted_range_is_unusable() {
        assert!(MarketContext::new(5.0, 4.0, 6.0, 100.0).is_unusable());
    }

    #[test]
    fn nan_is_unusable() {
        assert!(candle_is_unusable(f64::NAN, 1.0, 1.0));
    }

    #[test]
    fn flat_candle_with_volume_is_usable() {
        assert!(!MarketContext::new(1.0, 1.0, 1.0, 1.0).is_unusable());
    }

    #[test]
    fn zero_volume_with_range_is_usable() {
        // volume alone being zero does not invalidate the range
        assert!(!candle_is_unusable(10.0, 2.0, 0.0));
    }
}
