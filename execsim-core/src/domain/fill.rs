//! Fill: the outcome of attempting to execute an order request.

use super::asset::AssetClass;
use super::order::{FeeKind, Interval, OrderRequest};
use super::pair::CurrencyPair;
use super::side::Direction;
use crate::error::ExecutionError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fill record handed back to the portfolio/statistics side of the backtest.
///
/// A fill may carry a non-fatal `error` (e.g. the live venue refused the
/// credentials, or the sized amount fell below the configured minimum). The
/// price and amount it reports are still the ones the pipeline computed, so the
/// caller can decide whether to book the step as a no-fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fill {
    pub exchange: String,
    pub pair: CurrencyPair,
    pub asset: Option<AssetClass>,
    pub direction: Direction,
    pub timestamp: DateTime<Utc>,
    pub interval: Interval,
    pub fee_kind: FeeKind,
    /// Amount the request asked for (funds-derived for buys that only set funds).
    pub requested_amount: f64,
    pub funds: f64,
    pub close_price: f64,
    /// Price after fitting into the candle (offline) or walking the book (online).
    pub volume_adjusted_price: f64,
    /// Final execution price, after slippage.
    pub price: f64,
    /// Final executed amount.
    pub amount: f64,
    pub fee: f64,
    pub fee_rate: f64,
    /// Rate drawn for slippage; 1.0 means none was applied.
    pub slippage_rate: f64,
    pub order_id: Option<String>,
    /// Human-readable notes for every adjustment made along the way.
    pub reasons: Vec<String>,
    #[serde(skip)]
    pub error: Option<ExecutionError>,
}

impl Fill {
    /// Start a fill from a request and the current close.
    ///
    /// Sells size from `amount`. Buys size from `amount` when positive, otherwise
    /// from `funds / close`.
    pub fn from_request(request: &OrderRequest, close_price: f64) -> Self {
        let requested_amount = match request.direction {
            Direction::Buy if request.amount <= 0.0 && request.funds > 0.0 && close_price > 0.0 => {
                request.funds / close_price
            }
            _ => request.amount,
        };

        Self {
            exchange: request.exchange.clone(),
            pair: request.pair.clone(),
            asset: request.asset,
            direction: request.direction,
            timestamp: request.timestamp,
            interval: request.interval,
            fee_kind: request.fee_kind,
            requested_amount,
            funds: request.funds,
            close_price,
            volume_adjusted_price: close_price,
            price: close_price,
            amount: requested_amount,
            fee: 0.0,
            fee_rate: 0.0,
            slippage_rate: 1.0,
            order_id: None,
            reasons: Vec::new(),
            error: None,
        }
    }

    pub fn append_reason(&mut self, reason: impl Into<String>) {
        self.reasons.push(reason.into());
    }

    /// Notional paid or received, fee included on buys and deducted on sells.
    pub fn total(&self) -> f64 {
        let notional = self.price * self.amount;
        match self.direction {
            Direction::Sell => notional - self.fee,
            _ => notional + self.fee,
        }
    }

    pub fn is_executed(&self) -> bool {
        self.error.is_none() && self.order_id.is_some()
    }
}
