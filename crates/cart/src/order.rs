use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{CartId, OrderId};

use crate::cart::{CheckedOut, LineItem};
use crate::checkout::DeliveryInfo;
use crate::pricing::{CartSummary, PricingPolicy};

/// Finalized order produced by a successful checkout.
///
/// This is what the seller receives; the cart itself is already empty by the
/// time a `PlacedOrder` exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedOrder {
    pub order_id: OrderId,
    pub cart_id: CartId,
    pub lines: Vec<LineItem>,
    pub summary: CartSummary,
    pub delivery: DeliveryInfo,
    pub placed_at: DateTime<Utc>,
}

impl PlacedOrder {
    pub fn from_checkout(event: &CheckedOut, pricing: &PricingPolicy) -> Self {
        Self {
            order_id: event.order_id,
            cart_id: event.cart_id,
            summary: pricing.summarize(&event.lines),
            lines: event.lines.clone(),
            delivery: event.delivery.clone(),
            placed_at: event.occurred_at,
        }
    }
}
