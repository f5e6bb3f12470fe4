use serde::{Deserialize, Serialize};
use std::fmt;

/// Market segment an instrument trades in on a venue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Spot,
    Margin,
    Futures,
    PerpetualSwap,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Spot => "spot",
            AssetClass::Margin => "margin",
            AssetClass::Futures => "futures",
            AssetClass::PerpetualSwap => "perpetual_swap",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
