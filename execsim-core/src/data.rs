//! Market-data provider trait and an in-memory candle series.
//!
//! The provider abstracts over however the backtest loads history, so the
//! execution handler only ever asks "what did the market look like at this step?".

use crate::domain::{AssetClass, CurrencyPair, Interval, MarketContext};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MarketDataError {
    #[error("no market data for {exchange} {asset:?} {pair} at {timestamp}")]
    NoData {
        exchange: String,
        asset: Option<AssetClass>,
        pair: CurrencyPair,
        timestamp: DateTime<Utc>,
    },

    #[error("market data unavailable: {0}")]
    Unavailable(String),
}

/// What the handler asks the provider for.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketQuery<'a> {
    pub exchange: &'a str,
    pub asset: Option<AssetClass>,
    pub pair: &'a CurrencyPair,
    pub timestamp: DateTime<Utc>,
    pub interval: Interval,
}

/// Source of the current period's candle.
pub trait MarketDataProvider: Send + Sync {
    fn current(&self, query: &MarketQuery<'_>) -> Result<MarketContext, MarketDataError>;
}

/// Timestamped candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn context(&self) -> MarketContext {
        MarketContext::new(self.close, self.high, self.low, self.volume)
    }
}

/// Candles for one (venue, asset, pair), sorted by time.
///
/// Answers a query with the latest candle at or before the requested
/// timestamp; queries for other instruments get [`MarketDataError::NoData`].
#[derive(Debug, Clone)]
pub struct CandleSeries {
    exchange: String,
    asset: AssetClass,
    pair: CurrencyPair,
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(exchange: &str, asset: AssetClass, pair: CurrencyPair, mut candles: Vec<Candle>) -> Self {
        candles.sort_by(|a, b| a.time.cmp(&b.time));
        Self {
            exchange: exchange.to_string(),
            asset,
            pair,
            candles,
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    fn matches(&self, query: &MarketQuery<'_>) -> bool {
        self.exchange.eq_ignore_ascii_case(query.exchange)
            && query.asset == Some(self.asset)
            && *query.pair == self.pair
    }
}

impl MarketDataProvider for CandleSeries {
    fn current(&self, query: &MarketQuery<'_>) -> Result<MarketContext, MarketDataError> {
        let no_data = || MarketDataError::NoData {
            exchange: query.exchange.to_string(),
            asset: query.asset,
            pair: query.pair.clone(),
            timestamp: query.timestamp,
        };
        if !self.matches(query) {
            return Err(no_data());
        }
        // candles are sorted, so the partition point is the first candle after the query
        let idx = self.candles.partition_point(|c| c.time <= query.timestamp);
        if idx == 0 {
            return Err(no_data());
        }
        Ok(self.candles[idx - 1].context())
    }
}
