//! Top-level error for one execution attempt.

use crate::data::MarketDataError;
use crate::execution::SizingError;
use crate::router::RouterError;
use crate::settings::SettingsError;
use thiserror::Error;

/// Everything that can go wrong while executing an order request.
///
/// Returned from [`crate::handler::ExecutionHandler::execute_order`] when fatal,
/// or attached to a [`crate::domain::Fill`] when the step can still be booked.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExecutionError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    #[error(transparent)]
    Sizing(#[from] SizingError),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error("sized amount {amount} is below the minimum order size {minimum}")]
    BelowMinimumSize { amount: f64, minimum: f64 },

    #[error("sized amount is zero, nothing to trade")]
    NothingToTrade,
}

impl ExecutionError {
    /// Fatal errors abort the step; the rest ride along on the fill.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            ExecutionError::Router(RouterError::Venue(_))
                | ExecutionError::BelowMinimumSize { .. }
                | ExecutionError::NothingToTrade
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CurrencyPair;
    use crate::venue::VenueError;

    #[test]
    fn venue_failures_are_carried() {
        let err: ExecutionError = RouterError::Venue(VenueError::Authentication("no keys".into())).into();
        assert!(!err.is_fatal());
        assert!(!ExecutionError::BelowMinimumSize { amount: 0.1, minimum: 1.0 }.is_fatal());
        assert!(!ExecutionError::NothingToTrade.is_fatal());
    }

    #[test]
    fn validation_failures_are_fatal() {
        let not_found: ExecutionError = SettingsError::NotFound {
            exchange: "binance".into(),
            asset: "spot".into(),
            pair: CurrencyPair::new("BTC", "USDT"),
        }
        .into();
        assert!(not_found.is_fatal());
        assert!(ExecutionError::from(RouterError::NilEvent).is_fatal());
        assert!(ExecutionError::from(SizingError::NilArguments).is_fatal());
    }

    #[test]
    fn messages_pass_through() {
        let err = ExecutionError::from(RouterError::MissingVenue);
        assert_eq!(err.to_string(), "order venue must be specified");
    }
}
