//! Execution handler: the entry point that turns an order request into a fill.
//!
//! Pipeline per request:
//! settings lookup → market context → sizing → slippage → fee → routing → fill.
//!
//! Fatal failures (unknown settings, missing data, unusable candle, invalid
//! order) come back as `Err`. Failures the caller can book as a no-fill (venue
//! refused the order, amount below the configured minimum) are carried on the
//! returned [`Fill`].

use crate::data::{MarketDataProvider, MarketQuery};
use crate::domain::{Direction, Fill, OrderRequest};
use crate::error::ExecutionError;
use crate::execution::{
    apply_slippage, calculate_fee, size_offline, size_online, SizedOrder, SizingMode, SlippageKey,
    SlippageRateSource,
};
use crate::router::{OrderRouter, RouterError};
use crate::settings::{Settings, SettingsRegistry};
use crate::venue::VenueConnector;
use tracing::{debug, warn};

pub struct ExecutionHandler {
    registry: SettingsRegistry,
    router: OrderRouter,
    slippage: Box<dyn SlippageRateSource>,
}

impl ExecutionHandler {
    pub fn new(registry: SettingsRegistry, slippage: Box<dyn SlippageRateSource>) -> Self {
        Self {
            registry,
            router: OrderRouter::new(),
            slippage,
        }
    }

    pub fn registry(&self) -> &SettingsRegistry {
        &self.registry
    }

    pub fn router(&self) -> &OrderRouter {
        &self.router
    }

    /// Execute one order request against the current market.
    pub async fn execute_order(
        &self,
        request: &OrderRequest,
        data: &dyn MarketDataProvider,
        venue: &dyn VenueConnector,
    ) -> Result<Fill, ExecutionError> {
        let asset = request.asset.ok_or(RouterError::MissingAssetClass)?;
        let settings = self.registry.lookup(&request.exchange, asset, &request.pair)?;

        let market = data.current(&MarketQuery {
            exchange: &request.exchange,
            asset: request.asset,
            pair: &request.pair,
            timestamp: request.timestamp,
            interval: request.interval,
        })?;

        let mut fill = Fill::from_request(request, market.close);
        if request.direction == Direction::DoNothing {
            return Ok(fill);
        }

        let sized = match SizingMode::from(settings.mode) {
            SizingMode::Offline => {
                size_offline(market.high, market.low, market.volume, Some(&settings), Some(&fill))?
            }
            SizingMode::Online => size_online(venue, Some(&settings), Some(&fill)).await?,
        };
        let SizedOrder { price, amount, reasons } = sized;
        fill.volume_adjusted_price = price;
        fill.price = price;
        fill.amount = amount;
        fill.reasons.extend(reasons);

        if amount <= 0.0 {
            warn!(pair = %fill.pair, "sized amount is zero, order not routed");
            fill.append_reason(format!("nothing to {} {}: sized amount is zero", fill.direction, fill.pair));
            fill.error = Some(ExecutionError::NothingToTrade);
            return Ok(fill);
        }

        if let Some(side) = settings.side(fill.direction) {
            if side.is_below_minimum(amount) {
                warn!(amount, minimum = side.minimum_size, "could not {} {}", fill.direction, fill.pair);
                fill.append_reason(format!(
                    "could not {} {}: amount {amount} below minimum size {}",
                    fill.direction, fill.pair, side.minimum_size
                ));
                fill.error = Some(ExecutionError::BelowMinimumSize {
                    amount,
                    minimum: side.minimum_size,
                });
                return Ok(fill);
            }
        }

        if !settings.is_live() {
            self.apply_slippage(&settings, &mut fill);
        }

        fill.fee_rate = settings.fee_rate(fill.fee_kind);
        fill.fee = calculate_fee(fill.price, fill.amount, fill.fee_rate);
        debug!(fee = fill.fee, rate = fill.fee_rate, "fee calculated");

        let routed = self
            .router
            .place(fill.price, fill.amount, settings.mode, Some(request), venue)
            .await;
        match routed {
            Ok(ack) => {
                fill.order_id = Some(ack.order_id);
                fill.append_reason(format!(
                    "order {} placed for {} at {}",
                    if ack.live { "live" } else { "simulated" },
                    ack.amount,
                    ack.price
                ));
            }
            Err(err @ RouterError::Venue(_)) => {
                warn!(error = %err, "venue did not accept order");
                fill.append_reason(format!("order not placed: {err}"));
                fill.error = Some(err.into());
            }
            Err(err) => return Err(err.into()),
        }

        Ok(fill)
    }

    fn apply_slippage(&self, settings: &Settings, fill: &mut Fill) {
        let rate = self.slippage.rate(
            SlippageKey {
                exchange: &settings.exchange_name,
                asset: settings.asset,
                pair: &settings.pair,
            },
            settings.minimum_slippage_rate,
            settings.maximum_slippage_rate,
        );
        fill.slippage_rate = rate;
        if rate != 1.0 {
            let slipped = apply_slippage(fill.direction, fill.price, rate);
            fill.append_reason(format!(
                "price adjusted from {} to {slipped} by slippage rate {rate}",
                fill.price
            ));
            fill.price = slipped;
        }
        debug!(rate, price = fill.price, source = self.slippage.name(), "slippage applied");
    }
}
