use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of an order request.
///
/// `DoNothing` is what a strategy emits when it decides not to trade on a bar;
/// it is carried through the pipeline but never sized or routed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Buy,
    Sell,
    #[default]
    DoNothing,
}

impl Direction {
    /// True for directions a venue can execute.
    pub fn is_tradable(&self) -> bool {
        matches!(self, Direction::Buy | Direction::Sell)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Buy => f.write_str("buy"),
            Direction::Sell => f.write_str("sell"),
            Direction::DoNothing => f.write_str("do_nothing"),
        }
    }
}
