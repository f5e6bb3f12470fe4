//! Execution math: how a requested order becomes an executable one.
//!
//! - **Liquidity**: fit price and amount into the candle
//! - **Portfolio limit**: cap notional to allocated funds
//! - **Sizer**: offline (candle) or online (orderbook) sizing
//! - **Slippage**: directional price penalty and its rate sources
//! - **Fee**: notional × rate

pub mod fee;
pub mod liquidity;
pub mod portfolio_limit;
pub mod sizer;
pub mod slippage;

pub use fee::calculate_fee;
pub use liquidity::{fit_to_market, VOLUME_SAFETY_MARGIN};
pub use portfolio_limit::cap_to_portfolio;
pub use sizer::{size_offline, size_online, SizedOrder, SizingError, SizingMode};
pub use slippage::{
    apply_slippage, normalize_bounds, FixedSlippageRate, RandomSlippage, SeededSlippage,
    SlippageKey, SlippageRateSource,
};
