//! Order sizer: turn a requested (price, amount) into one that could execute.
//!
//! Offline sizing bounds the order to the historical candle; online sizing
//! bounds it to the venue's orderbook and, optionally, its execution limits.
//! Both then apply the portfolio ceiling and the side's maximum size.

use super::liquidity::fit_to_market;
use super::portfolio_limit::cap_to_portfolio;
use crate::domain::{candle_is_unusable, ExecutionLimits, Fill};
use crate::settings::{ExecutionMode, Settings};
use crate::venue::{VenueConnector, VenueError};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SizingError {
    #[error("received nil arguments, cannot size order")]
    NilArguments,

    #[error("data may be incorrect: high {high}, low {low}, volume {volume}")]
    DataMayBeIncorrect { high: f64, low: f64, volume: f64 },

    #[error(transparent)]
    Venue(#[from] VenueError),
}

/// Which bounds an order is sized against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingMode {
    /// Candle range and volume.
    Offline,
    /// Venue orderbook and execution limits.
    Online,
}

impl From<ExecutionMode> for SizingMode {
    fn from(mode: ExecutionMode) -> Self {
        match mode {
            ExecutionMode::Simulated => SizingMode::Offline,
            ExecutionMode::Live => SizingMode::Online,
        }
    }
}

/// Sized price and amount, with a note for every adjustment made.
#[derive(Debug, Clone, PartialEq)]
pub struct SizedOrder {
    pub price: f64,
    pub amount: f64,
    pub reasons: Vec<String>,
}

fn require<'a>(
    settings: Option<&'a Settings>,
    fill: Option<&'a Fill>,
) -> Result<(&'a Settings, &'a Fill), SizingError> {
    match (settings, fill) {
        (Some(s), Some(f)) => Ok((s, f)),
        _ => Err(SizingError::NilArguments),
    }
}

/// Size an order against the current candle.
///
/// With `can_use_exchange_limits` set, the amount is also conformed to the
/// settings' limits snapshot, if one was loaded.
pub fn size_offline(
    high: f64,
    low: f64,
    volume: f64,
    settings: Option<&Settings>,
    fill: Option<&Fill>,
) -> Result<SizedOrder, SizingError> {
    let (settings, fill) = require(settings, fill)?;
    if candle_is_unusable(high, low, volume) {
        return Err(SizingError::DataMayBeIncorrect { high, low, volume });
    }

    let mut reasons = Vec::new();
    let requested = fill.requested_amount;
    let (price, amount) = if settings.skip_candle_volume_fitting {
        (fill.close_price, requested)
    } else {
        let (price, amount) = fit_to_market(fill.close_price, requested, high, low, volume);
        if price != fill.close_price {
            reasons.push(format!(
                "price adjusted from {} to {} to fit candle range {}-{}",
                fill.close_price, price, low, high
            ));
        }
        if amount != requested {
            reasons.push(format!(
                "amount reduced from {requested} to {amount} to fit candle volume {volume}"
            ));
        }
        (price, amount)
    };

    if amount <= 0.0 && requested > 0.0 {
        warn!(high, low, volume, requested, "candle left nothing to trade");
        return Err(SizingError::DataMayBeIncorrect { high, low, volume });
    }

    let mut amount = bound_to_settings(price, amount, settings, fill, &mut reasons);
    if settings.can_use_exchange_limits {
        if let Some(limits) = settings.limits {
            amount = conform_to_limits(&limits, amount, &settings.exchange_name, &mut reasons);
        }
    }
    debug!(price, amount, "sized offline order");
    Ok(SizedOrder { price, amount, reasons })
}

/// Size an order against the venue's current orderbook.
///
/// Prices at the volume-weighted average of the levels the order would
/// consume, falling back to the close when that side of the book is empty.
/// Venue failures are returned as they were reported.
pub async fn size_online(
    venue: &dyn VenueConnector,
    settings: Option<&Settings>,
    fill: Option<&Fill>,
) -> Result<SizedOrder, SizingError> {
    let (settings, fill) = require(settings, fill)?;
    let mut reasons = Vec::new();
    let requested = fill.requested_amount;

    let book = venue.fetch_orderbook(&fill.pair, settings.asset).await?;
    let (price, mut amount) = match book.walk(fill.direction, requested) {
        Some(walked) => {
            if walked.amount < requested {
                reasons.push(format!(
                    "amount reduced from {requested} to {} to fit orderbook depth",
                    walked.amount
                ));
            }
            (walked.average_price, walked.amount)
        }
        None => (fill.close_price, requested),
    };

    amount = bound_to_settings(price, amount, settings, fill, &mut reasons);

    if settings.can_use_exchange_limits {
        let limits = match settings.limits {
            Some(limits) => limits,
            None => venue.execution_limits(settings.asset, &fill.pair).await?,
        };
        amount = conform_to_limits(&limits, amount, venue.name(), &mut reasons);
    }

    debug!(venue = venue.name(), price, amount, "sized online order");
    Ok(SizedOrder { price, amount, reasons })
}

fn conform_to_limits(
    limits: &ExecutionLimits,
    amount: f64,
    venue: &str,
    reasons: &mut Vec<String>,
) -> f64 {
    let conformed = limits.conform_amount(amount);
    if conformed != amount {
        reasons.push(format!(
            "amount adjusted from {amount} to {conformed} to respect {venue} limits"
        ));
    }
    conformed
}

/// Portfolio ceiling, then the side's maximum size.
fn bound_to_settings(
    price: f64,
    amount: f64,
    settings: &Settings,
    fill: &Fill,
    reasons: &mut Vec<String>,
) -> f64 {
    let mut amount = amount;
    if let Some(total) = settings.allocated_total(fill.direction, fill.funds) {
        let capped = cap_to_portfolio(price, amount, total);
        if capped < amount {
            warn!(amount, capped, total, "order capped to allocated funds");
            reasons.push(format!(
                "amount reduced from {amount} to {capped} to fit allocated total {total}"
            ));
            amount = capped;
        }
    }
    if let Some(side) = settings.side(fill.direction) {
        if side.is_above_maximum(amount) {
            reasons.push(format!(
                "amount reduced from {amount} to maximum size {}",
                side.maximum_size
            ));
            amount = side.maximum_size;
        }
    }
    amount
}
