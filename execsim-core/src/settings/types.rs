//! Per-instrument execution settings.

use crate::domain::{AssetClass, CurrencyPair, Direction, ExecutionLimits, FeeKind};
use serde::{Deserialize, Serialize};

/// Whether orders for an instrument are simulated against history or sent to a venue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    #[default]
    Simulated,
    Live,
}

/// Size bounds for one side of the book. Zero means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MinMax {
    #[serde(default)]
    pub minimum_size: f64,
    #[serde(default)]
    pub maximum_size: f64,
    /// Ceiling on notional (price × amount) for a single order.
    #[serde(default)]
    pub maximum_total: f64,
}

impl MinMax {
    pub fn new(minimum_size: f64, maximum_size: f64, maximum_total: f64) -> Self {
        Self { minimum_size, maximum_size, maximum_total }
    }

    pub fn is_below_minimum(&self, amount: f64) -> bool {
        self.minimum_size > 0.0 && amount < self.minimum_size
    }

    pub fn is_above_maximum(&self, amount: f64) -> bool {
        self.maximum_size > 0.0 && amount > self.maximum_size
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Leverage {
    #[serde(default)]
    pub can_use_leverage: bool,
    #[serde(default)]
    pub maximum_leverage_rate: f64,
}

impl Leverage {
    /// Multiplier applied to initial funds. Never below 1.
    pub fn multiplier(&self) -> f64 {
        if self.can_use_leverage && self.maximum_leverage_rate > 1.0 {
            self.maximum_leverage_rate
        } else {
            1.0
        }
    }
}

fn one() -> f64 {
    1.0
}

/// Execution configuration for one (venue, asset class, pair).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub exchange_name: String,
    pub asset: AssetClass,
    pub pair: CurrencyPair,
    #[serde(default)]
    pub mode: ExecutionMode,
    #[serde(default)]
    pub initial_funds: f64,
    #[serde(default)]
    pub exchange_fee: f64,
    #[serde(default)]
    pub maker_fee: f64,
    #[serde(default)]
    pub taker_fee: f64,
    /// Lower bound of the slippage rate draw, in (0, 1]. 1 disables slippage.
    #[serde(default = "one")]
    pub minimum_slippage_rate: f64,
    #[serde(default = "one")]
    pub maximum_slippage_rate: f64,
    #[serde(default)]
    pub buy_side: MinMax,
    #[serde(default)]
    pub sell_side: MinMax,
    #[serde(default)]
    pub leverage: Leverage,
    /// Allow sizing against venue-reported execution limits.
    #[serde(default)]
    pub can_use_exchange_limits: bool,
    /// Skip fitting offline orders into the candle's range and volume.
    #[serde(default)]
    pub skip_candle_volume_fitting: bool,
    /// Snapshot of the venue's limits, when one was fetched ahead of time.
    #[serde(default)]
    pub limits: Option<ExecutionLimits>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            exchange_name: String::new(),
            asset: AssetClass::Spot,
            pair: CurrencyPair::default(),
            mode: ExecutionMode::Simulated,
            initial_funds: 0.0,
            exchange_fee: 0.0,
            maker_fee: 0.0,
            taker_fee: 0.0,
            minimum_slippage_rate: 1.0,
            maximum_slippage_rate: 1.0,
            buy_side: MinMax::default(),
            sell_side: MinMax::default(),
            leverage: Leverage::default(),
            can_use_exchange_limits: false,
            skip_candle_volume_fitting: false,
            limits: None,
        }
    }
}

impl Settings {
    pub fn new(exchange_name: &str, asset: AssetClass, pair: CurrencyPair) -> Self {
        Self {
            exchange_name: exchange_name.to_string(),
            asset,
            pair,
            ..Self::default()
        }
    }

    pub fn is_live(&self) -> bool {
        self.mode == ExecutionMode::Live
    }

    pub fn fee_rate(&self, kind: FeeKind) -> f64 {
        match kind {
            FeeKind::Exchange => self.exchange_fee,
            FeeKind::Maker => self.maker_fee,
            FeeKind::Taker => self.taker_fee,
        }
    }

    /// Size bounds for the side an order trades on.
    pub fn side(&self, direction: Direction) -> Option<&MinMax> {
        match direction {
            Direction::Buy => Some(&self.buy_side),
            Direction::Sell => Some(&self.sell_side),
            Direction::DoNothing => None,
        }
    }

    /// Notional ceiling for a single order in `direction`.
    ///
    /// The smallest positive value among leveraged initial funds, the side's
    /// `maximum_total`, and the request's `funds`. `None` when none is set,
    /// meaning the order is not capped by the portfolio.
    pub fn allocated_total(&self, direction: Direction, funds: f64) -> Option<f64> {
        let leveraged = self.initial_funds * self.leverage.multiplier();
        let side_total = self.side(direction).map_or(0.0, |s| s.maximum_total);
        [leveraged, side_total, funds]
            .into_iter()
            .filter(|v| *v > 0.0)
            .reduce(f64::min)
    }
}
