//! Venue-reported execution limits: order size bounds and step sizes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Execution limits a venue enforces for one instrument.
///
/// A zero field means the venue does not enforce that bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionLimits {
    #[serde(default)]
    pub minimum_amount: f64,
    #[serde(default)]
    pub maximum_amount: f64,
    #[serde(default)]
    pub amount_step: f64,
    #[serde(default)]
    pub price_step: f64,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LimitViolation {
    #[error("amount {amount} below venue minimum {minimum}")]
    BelowMinimumAmount { amount: f64, minimum: f64 },

    #[error("amount {amount} above venue maximum {maximum}")]
    AboveMaximumAmount { amount: f64, maximum: f64 },

    #[error("amount {amount} does not respect amount step {step}")]
    AmountStep { amount: f64, step: f64 },

    #[error("price {price} does not respect price step {step}")]
    PriceStep { price: f64, step: f64 },
}

/// Tolerance used when deciding whether a value sits on a step grid.
const STEP_EPSILON: f64 = 1e-9;

impl ExecutionLimits {
    pub fn new(minimum_amount: f64, maximum_amount: f64, amount_step: f64, price_step: f64) -> Self {
        Self { minimum_amount, maximum_amount, amount_step, price_step }
    }

    /// Reduce `amount` until the venue would accept it.
    ///
    /// Floors to the amount step, then clamps to the maximum. Returns zero when
    /// the result falls below the minimum, since no smaller order is valid.
    pub fn conform_amount(&self, amount: f64) -> f64 {
        if amount <= 0.0 {
            return 0.0;
        }
        let mut conformed = amount;
        if self.amount_step > 0.0 {
            // nudge before flooring so 0.3 / 0.1 = 2.9999999 still lands on 3 steps
            let steps = (conformed / self.amount_step + STEP_EPSILON).floor();
            conformed = steps * self.amount_step;
        }
        if self.maximum_amount > 0.0 && conformed > self.maximum_amount {
            conformed = self.maximum_amount;
            if self.amount_step > 0.0 {
                conformed = (conformed / self.amount_step + STEP_EPSILON).floor() * self.amount_step;
            }
        }
        if self.minimum_amount > 0.0 && conformed < self.minimum_amount {
            return 0.0;
        }
        conformed
    }

    /// Check a price/amount pair against every limit without adjusting it.
    pub fn check(&self, price: f64, amount: f64) -> Result<(), LimitViolation> {
        if self.minimum_amount > 0.0 && amount < self.minimum_amount {
            return Err(LimitViolation::BelowMinimumAmount {
                amount,
                minimum: self.minimum_amount,
            });
        }
        if self.maximum_amount > 0.0 && amount > self.maximum_amount {
            return Err(LimitViolation::AboveMaximumAmount {
                amount,
                maximum: self.maximum_amount,
            });
        }
        if self.amount_step > 0.0 && !on_grid(amount, self.amount_step) {
            return Err(LimitViolation::AmountStep { amount, step: self.amount_step });
        }
        if self.price_step > 0.0 && !on_grid(price, self.price_step) {
            return Err(LimitViolation::PriceStep { price, step: self.price_step });
        }
        Ok(())
    }
}

fn on_grid(value: f64, step: f64) -> bool {
    let steps = value / step;
    (steps - steps.round()).abs() < STEP_EPSILON * steps.abs().max(1.0)
}
