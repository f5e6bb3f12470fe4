//! Liquidity clamp: bound a simulated order to what a historical candle could have filled.
//!
//! A candle cannot prove a trade of any size was fillable at any price. The
//! price is pulled into the candle's range, and the candle's volume is read as
//! the most notional (price × amount) that could have traded during the period.

/// Relative margin taken off an amount reduced to volume, so the recomputed
/// notional stays strictly under the volume after rounding.
pub const VOLUME_SAFETY_MARGIN: f64 = 1e-8;

/// Clamp `price` into `[low, high]` and shrink `amount` so that
/// `amount × price` does not exceed `volume`.
///
/// Never fails. Callers check the candle with
/// [`crate::domain::candle_is_unusable`] first.
pub fn fit_to_market(price: f64, amount: f64, high: f64, low: f64, volume: f64) -> (f64, f64) {
    let price = if price > high {
        high
    } else if price < low {
        low
    } else {
        price
    };

    let amount = if amount * price > volume {
        volume / price * (1.0 - VOLUME_SAFETY_MARGIN)
    } else {
        amount
    };

    (price, amount)
}
