//! Order requests emitted by the backtest loop.

use super::asset::AssetClass;
use super::pair::CurrencyPair;
use super::side::Direction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Candle interval of the simulation clock, in seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval(pub u64);

impl Interval {
    pub const ONE_MIN: Interval = Interval(60);
    pub const FIFTEEN_MIN: Interval = Interval(15 * 60);
    pub const ONE_HOUR: Interval = Interval(60 * 60);
    pub const ONE_DAY: Interval = Interval(24 * 60 * 60);

    pub fn seconds(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Which configured fee rate applies to an order.
///
/// The caller knows whether it is resting or crossing; nothing downstream
/// infers it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeKind {
    #[default]
    Exchange,
    Maker,
    Taker,
}

/// A proposed trade at one simulated time step.
///
/// Buys may be expressed as `funds` instead of `amount`; the handler derives
/// the amount from the close price when `amount` is not positive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub exchange: String,
    pub pair: CurrencyPair,
    /// `None` means the strategy never set it; the router rejects such orders.
    pub asset: Option<AssetClass>,
    pub direction: Direction,
    pub timestamp: DateTime<Utc>,
    pub interval: Interval,
    pub amount: f64,
    pub funds: f64,
    #[serde(default)]
    pub fee_kind: FeeKind,
}

impl OrderRequest {
    pub fn new(
        exchange: &str,
        asset: AssetClass,
        pair: CurrencyPair,
        direction: Direction,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            exchange: exchange.to_string(),
            pair,
            asset: Some(asset),
            direction,
            timestamp,
            interval: Interval::default(),
            amount: 0.0,
            funds: 0.0,
            fee_kind: FeeKind::default(),
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_funds(mut self, funds: f64) -> Self {
        self.funds = funds;
        self
    }

    pub fn with_interval(mut self, interval: Interval) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_fee_kind(mut self, fee_kind: FeeKind) -> Self {
        self.fee_kind = fee_kind;
        self
    }
}

impl Default for OrderRequest {
    fn default() -> Self {
        Self {
            exchange: String::new(),
            pair: CurrencyPair::default(),
            asset: None,
            direction: Direction::default(),
            timestamp: DateTime::<Utc>::default(),
            interval: Interval::default(),
            amount: 0.0,
            funds: 0.0,
            fee_kind: FeeKind::default(),
        }
    }
}
