//! Orderbook snapshot as reported by a venue.

use super::side::Direction;
use serde::{Deserialize, Serialize};

/// One price level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub price: f64,
    pub amount: f64,
}

impl Level {
    pub fn new(price: f64, amount: f64) -> Self {
        Self { price, amount }
    }
}

/// Bids sorted best (highest) first, asks sorted best (lowest) first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Orderbook {
    pub bids: Vec<Level>,
    pub asks: Vec<Level>,
}

/// Result of walking the book for a market order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookFill {
    /// Volume-weighted average price of the consumed levels.
    pub average_price: f64,
    /// Amount the book could absorb (≤ the requested amount).
    pub amount: f64,
}

impl Orderbook {
    pub fn new(bids: Vec<Level>, asks: Vec<Level>) -> Self {
        Self { bids, asks }
    }

    /// Levels a market order in `direction` would consume: asks for buys, bids for sells.
    pub fn side_for(&self, direction: Direction) -> &[Level] {
        match direction {
            Direction::Buy => &self.asks,
            Direction::Sell => &self.bids,
            Direction::DoNothing => &[],
        }
    }

    /// Walk the book for `amount`, best level first.
    ///
    /// Returns `None` when the relevant side is empty or `amount` is not positive.
    /// If the book is shallower than `amount`, the returned amount is the total depth.
    pub fn walk(&self, direction: Direction, amount: f64) -> Option<BookFill> {
        if amount <= 0.0 {
            return None;
        }
        let mut remaining = amount;
        let mut notional = 0.0;
        let mut filled = 0.0;
        for level in self.side_for(direction) {
            if remaining <= 0.0 {
                break;
            }
            if level.amount <= 0.0 || level.price <= 0.0 {
                continue;
            }
            let take = remaining.min(level.amount);
            notional += take * level.price;
            filled += take;
            remaining -= take;
        }
        if filled <= 0.0 {
            return None;
        }
        Some(BookFill {
            average_price: notional / filled,
            amount: filled,
        })
    }
}
