//! # Checkout Commands
//!
//! Quote, order placement and order tracking.
//!
//! ## Checkout Page
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ○ Delivery  ○ Pickup            ──► quote_order()                      │
//! │                                                                         │
//! │  Subtotal                        R$ 35,00                              │
//! │  Delivery fee                    R$ 5,00   (free from R$ 40,00)        │
//! │  ───────────────────────────────────────                               │
//! │  TOTAL                           R$ 40,00                              │
//! │                                                                         │
//! │  [ Place order ]                 ──► place_order()                      │
//! │                                        │                                │
//! │                                        ▼                                │
//! │  Order tracking page             ──► get_order_status()                 │
//! │                                      start_order_tracking()             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use crate::checkout::{
    self, CheckoutDetails, DeliveryType, OrderReceipt, OrderStatus, OrderSubmitter, OrderTotals,
};
use crate::error::ApiError;
use crate::state::{CartState, StorefrontConfig};
use crate::tracking::{OrderStatusSource, OrderTracker, TrackerHandle};

/// Subtotal, delivery fee and total for the current cart.
pub fn quote_order(
    cart: &CartState,
    config: &StorefrontConfig,
    delivery_type: DeliveryType,
) -> OrderTotals {
    debug!(?delivery_type, "quote_order command");
    let subtotal = cart.with_cart(|c| c.total_price());
    checkout::order_totals(&config.delivery, delivery_type, subtotal)
}

/// Places the order and takes the ordered lines out of the cart once the
/// order API accepts it.
///
/// ## Errors
/// - `CHECKOUT_ERROR` for an empty cart, a missing or incomplete delivery
///   address, card payments without brand and type, or a failed submission
pub async fn place_order<S: OrderSubmitter>(
    cart: &CartState,
    config: &StorefrontConfig,
    details: CheckoutDetails,
    submitter: &S,
) -> Result<OrderReceipt, ApiError> {
    debug!(delivery_type = ?details.delivery_type, "place_order command");
    let receipt = checkout::place_order(cart, &details, &config.delivery, submitter).await?;
    Ok(receipt)
}

/// Fetches an order's status once, for the tracking page's first render.
///
/// ## Errors
/// - `NOT_FOUND` for an order the API does not know
/// - `TRACKING_ERROR` when the order API is unavailable
pub async fn get_order_status<S: OrderStatusSource>(
    source: &S,
    order_id: &str,
) -> Result<OrderStatus, ApiError> {
    debug!(order_id, "get_order_status command");
    let status = source.fetch_status(order_id).await?;
    Ok(status)
}

/// Spawns a tracker for a placed order and returns its handle.
///
/// Must be called from within a tokio runtime.
pub fn start_order_tracking<S: OrderStatusSource>(
    source: Arc<S>,
    order_id: &str,
    config: &StorefrontConfig,
) -> TrackerHandle {
    debug!(order_id, "start_order_tracking command");

    let (tracker, handle) = OrderTracker::from_settings(source, order_id, &config.tracking);
    tokio::spawn(async move {
        let outcome = tracker.run().await;
        info!(?outcome, "Order tracking finished");
    });

    handle
}
