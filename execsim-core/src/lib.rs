//! Execsim Core: order-execution simulation for a trading backtester.
//!
//! Given a proposed trade and the market at a historical time step, this crate
//! works out what executing it would realistically have produced:
//! - Per-instrument settings held in a synchronized registry
//! - Offline sizing against the candle, online sizing against the orderbook
//! - Portfolio ceiling, slippage, and fees
//! - Routing to a simulated acknowledgment or a live venue behind one seam
//!
//! [`handler::ExecutionHandler::execute_order`] is the entry point.

pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod execution;
pub mod handler;
pub mod router;
pub mod settings;
pub mod venue;

pub use error::ExecutionError;
pub use handler::ExecutionHandler;
