//! Domain types for order execution

pub mod asset;
pub mod fill;
pub mod limits;
pub mod market;
pub mod order;
pub mod orderbook;
pub mod pair;
pub mod side;

pub use asset::AssetClass;
pub use fill::Fill;
pub use limits::{ExecutionLimits, LimitViolation};
pub use market::{candle_is_unusable, MarketContext};
pub use order::{FeeKind, Interval, OrderRequest};
pub use orderbook::{BookFill, Level, Orderbook};
pub use pair::CurrencyPair;
pub use side::Direction;
