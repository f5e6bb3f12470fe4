//! Order-routing collaborator: the seam between simulated and live order flow.
//!
//! The [`VenueConnector`] trait abstracts over whatever talks to a real venue
//! (REST/WebSocket clients live outside this crate). [`PaperVenue`] is an
//! in-memory connector for paper trading and tests.

use crate::domain::{AssetClass, CurrencyPair, Direction, ExecutionLimits, Orderbook};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Result type for venue operations.
pub type VenueResult<T> = Result<T, VenueError>;

/// Errors reported by a venue connector.
///
/// The execution pipeline never interprets these beyond carrying them: they
/// reach the caller exactly as the connector produced them.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum VenueError {
    #[error("currency pair is empty")]
    PairIsEmpty,

    #[error("authentication error: {0}")]
    Authentication(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("execution limits unavailable: {0}")]
    LimitsUnavailable(String),

    #[error("orderbook unavailable: {0}")]
    OrderbookUnavailable(String),

    #[error("order rejected: {0}")]
    Rejected(String),
}

/// Order as handed to a venue for execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderSubmission {
    pub client_order_id: String,
    pub exchange: String,
    pub pair: CurrencyPair,
    pub asset: AssetClass,
    pub direction: Direction,
    pub price: f64,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

/// Acknowledgment of an order, simulated or venue-issued.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAck {
    pub order_id: String,
    pub price: f64,
    pub amount: f64,
    pub fully_matched: bool,
    pub live: bool,
}

/// Connector to a trading venue.
#[async_trait]
pub trait VenueConnector: Send + Sync {
    /// Human-readable name of this venue.
    fn name(&self) -> &str;

    /// Current orderbook snapshot for an instrument.
    async fn fetch_orderbook(&self, pair: &CurrencyPair, asset: AssetClass) -> VenueResult<Orderbook>;

    /// Order size and step limits the venue enforces for an instrument.
    async fn execution_limits(
        &self,
        asset: AssetClass,
        pair: &CurrencyPair,
    ) -> VenueResult<ExecutionLimits>;

    /// Submit an order. Fails once, immediately; no retries.
    async fn submit(&self, order: &OrderSubmission) -> VenueResult<OrderAck>;
}

/// API credentials for a venue account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(key: &str, secret: &str) -> Self {
        Self {
            key: key.to_string(),
            secret: secret.to_string(),
        }
    }

    fn is_set(&self) -> bool {
        !self.key.is_empty() && !self.secret.is_empty()
    }
}

/// In-memory venue: serves a fixed orderbook and limits, fills submissions in full.
///
/// Submitting without credentials fails with [`VenueError::Authentication`],
/// the same way a real connector refuses unset API keys.
#[derive(Debug)]
pub struct PaperVenue {
    name: String,
    orderbook: Orderbook,
    limits: Option<ExecutionLimits>,
    credentials: Option<Credentials>,
    next_order_id: AtomicU64,
}

impl PaperVenue {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            orderbook: Orderbook::default(),
            limits: None,
            credentials: None,
            next_order_id: AtomicU64::new(1),
        }
    }

    pub fn with_orderbook(mut self, orderbook: Orderbook) -> Self {
        self.orderbook = orderbook;
        self
    }

    pub fn with_limits(mut self, limits: ExecutionLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }
}

#[async_trait]
impl VenueConnector for PaperVenue {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_orderbook(&self, pair: &CurrencyPair, _asset: AssetClass) -> VenueResult<Orderbook> {
        if pair.is_empty() {
            return Err(VenueError::PairIsEmpty);
        }
        Ok(self.orderbook.clone())
    }

    async fn execution_limits(
        &self,
        _asset: AssetClass,
        pair: &CurrencyPair,
    ) -> VenueResult<ExecutionLimits> {
        if pair.is_empty() {
            return Err(VenueError::PairIsEmpty);
        }
        self.limits
            .ok_or_else(|| VenueError::LimitsUnavailable(format!("{} {pair}", self.name)))
    }

    async fn submit(&self, order: &OrderSubmission) -> VenueResult<OrderAck> {
        if order.pair.is_empty() {
            return Err(VenueError::PairIsEmpty);
        }
        match &self.credentials {
            Some(c) if c.is_set() => {}
            _ => {
                return Err(VenueError::Authentication(format!(
                    "{} unset/default API keys",
                    self.name
                )))
            }
        }
        if let Some(limits) = &self.limits {
            limits
                .check(order.price, order.amount)
                .map_err(|v| VenueError::Rejected(v.to_string()))?;
        }
        let id = self.next_order_id.fetch_add(1, Ordering::Relaxed);
        Ok(OrderAck {
            order_id: format!("{}-{id:06}", self.name.to_uppercase()),
            price: order.price,
            amount: order.amount,
            fully_matched: true,
            live: true,
        })
    }
}
