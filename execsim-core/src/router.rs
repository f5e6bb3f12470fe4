//! Order router: validate an order and either acknowledge it in simulation or
//! submit it to the venue.

use crate::domain::{AssetClass, OrderRequest};
use crate::settings::ExecutionMode;
use crate::venue::{OrderAck, OrderSubmission, VenueConnector, VenueError};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RouterError {
    #[error("received nil event, cannot place order")]
    NilEvent,

    #[error("order venue must be specified")]
    MissingVenue,

    #[error("order asset class must be specified")]
    MissingAssetClass,

    #[error("order direction is not buy or sell")]
    UnrecognizedDirection,

    /// Reported by the venue connector and passed through as-is.
    #[error(transparent)]
    Venue(#[from] VenueError),
}

/// Places orders. Simulated acknowledgments get sequential `SIM-` ids.
#[derive(Debug)]
pub struct OrderRouter {
    next_id: AtomicU64,
}

impl Default for OrderRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderRouter {
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
        }
    }

    fn next_client_id(&self) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        format!("SIM-{id:06}")
    }

    /// Place an order at `price` for `amount`.
    ///
    /// Validation runs before anything else, in this order: missing request,
    /// empty venue, empty pair, missing asset class, non-tradable direction.
    ///
    /// In simulated mode the acknowledgment is synthesized without I/O and
    /// cannot fail once validation passes. Venue limits are applied while
    /// sizing, not here.
    ///
    /// In live mode the venue's answer is returned as-is. Nothing is retried;
    /// a caller wanting a timeout wraps this future.
    pub async fn place(
        &self,
        price: f64,
        amount: f64,
        mode: ExecutionMode,
        request: Option<&OrderRequest>,
        venue: &dyn VenueConnector,
    ) -> Result<OrderAck, RouterError> {
        let request = request.ok_or(RouterError::NilEvent)?;
        let asset = validate(request)?;

        let submission = OrderSubmission {
            client_order_id: self.next_client_id(),
            exchange: request.exchange.clone(),
            pair: request.pair.clone(),
            asset,
            direction: request.direction,
            price,
            amount,
            timestamp: request.timestamp,
        };

        match mode {
            ExecutionMode::Simulated => {
                debug!(order_id = %submission.client_order_id, price, amount, "simulated order acknowledged");
                Ok(OrderAck {
                    order_id: submission.client_order_id,
                    price,
                    amount,
                    fully_matched: true,
                    live: false,
                })
            }
            ExecutionMode::Live => {
                let ack = venue.submit(&submission).await?;
                info!(
                    venue = venue.name(),
                    order_id = %ack.order_id,
                    pair = %submission.pair,
                    direction = %submission.direction,
                    price,
                    amount,
                    "live order submitted"
                );
                Ok(ack)
            }
        }
    }
}

fn validate(request: &OrderRequest) -> Result<AssetClass, RouterError> {
    if request.exchange.is_empty() {
        return Err(RouterError::MissingVenue);
    }
    if request.pair.is_empty() {
        return Err(VenueError::PairIsEmpty.into());
    }
    let asset = request.asset.ok_or(RouterError::MissingAssetClass)?;
    if !request.direction.is_tradable() {
        return Err(RouterError::UnrecognizedDirection);
    }
    Ok(asset)
}
