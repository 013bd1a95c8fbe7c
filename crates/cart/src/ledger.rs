//! Session-facing cart service.
//!
//! `CartLedger` owns one [`Cart`] aggregate and runs every user intent through
//! the same pipeline:
//!
//! ```text
//! intent → command → Cart::handle (decide) → Cart::apply (evolve) → EventBus::publish
//! ```
//!
//! Rejected commands leave the cart untouched and publish nothing. Accepted
//! commands are applied before they are published, so subscribers never see an
//! event the ledger has not already absorbed.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use storefront_catalog::{Product, ProductId};
use storefront_core::{AggregateRoot, CartId, DomainError, OrderId};
use storefront_events::{EventBus, EventEnvelope, InMemoryEventBus, Subscription, execute};

use crate::cart::{
    AddItem, Cart, CartCommand, CartEvent, CartState, Checkout, LineItem, OpenCart, RemoveItem,
    SetQuantity,
};
use crate::checkout::DeliveryInfo;
use crate::config::StorefrontConfig;
use crate::order::PlacedOrder;
use crate::pricing::{CartSummary, PricingPolicy};

/// Aggregate type stamped on every cart envelope.
pub const AGGREGATE_TYPE: &str = "cart";

pub type CartEnvelope = EventEnvelope<CartEvent>;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// The command was rejected; cart state is unchanged.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// State was updated but subscribers could not be notified.
    #[error("failed to publish cart event: {0}")]
    Publish(String),
}

impl LedgerError {
    /// True for errors meant to be shown next to the checkout form.
    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Domain(e) if e.is_validation())
    }
}

/// One shopper's cart plus the pricing rules and the bus observers listen on.
#[derive(Debug)]
pub struct CartLedger<B = InMemoryEventBus<CartEnvelope>> {
    cart: Cart,
    pricing: PricingPolicy,
    bus: B,
}

impl CartLedger<InMemoryEventBus<CartEnvelope>> {
    /// Open a fresh cart backed by an in-memory bus.
    pub fn open(pricing: PricingPolicy) -> Result<Self, LedgerError> {
        Self::with_bus(CartId::new(), pricing, InMemoryEventBus::new())
    }

    pub fn from_config(config: &StorefrontConfig) -> Result<Self, LedgerError> {
        Self::open(config.pricing()?)
    }
}

impl<B> CartLedger<B>
where
    B: EventBus<CartEnvelope>,
{
    /// Open cart `cart_id` and publish its `CartOpened` event on `bus`.
    pub fn with_bus(cart_id: CartId, pricing: PricingPolicy, bus: B) -> Result<Self, LedgerError> {
        let mut ledger = Self {
            cart: Cart::empty(cart_id),
            pricing,
            bus,
        };

        ledger.dispatch(CartCommand::OpenCart(OpenCart {
            cart_id,
            occurred_at: Utc::now(),
        }))?;

        tracing::debug!(cart_id = %cart_id, "cart opened");
        Ok(ledger)
    }

    pub fn id(&self) -> CartId {
        self.cart.id_typed()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn lines(&self) -> &[LineItem] {
        self.cart.lines()
    }

    pub fn state(&self) -> CartState {
        self.cart.state()
    }

    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Observe every event applied from now on.
    pub fn subscribe(&self) -> Subscription<CartEnvelope> {
        self.bus.subscribe()
    }

    /// Add one unit of `product`, merging with an existing line.
    ///
    /// Returns the line's new quantity.
    pub fn add_item(&mut self, product: &Product) -> Result<u32, LedgerError> {
        let cart_id = self.id();
        self.dispatch(CartCommand::AddItem(AddItem::from_product(
            cart_id,
            product,
            Utc::now(),
        )))?;

        let quantity = self.cart.quantity_of(product.id_typed());
        tracing::debug!(
            cart_id = %cart_id,
            product_id = %product.id_typed(),
            quantity,
            "item added"
        );
        Ok(quantity)
    }

    /// Replace a line's quantity (values below 1 become 1).
    ///
    /// Fails with `NotFound` when the product is not in the cart. Returns the
    /// stored quantity.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> Result<u32, LedgerError> {
        let cart_id = self.id();
        self.dispatch(CartCommand::SetQuantity(SetQuantity {
            cart_id,
            product_id,
            quantity,
            occurred_at: Utc::now(),
        }))?;

        let stored = self.cart.quantity_of(product_id);
        tracing::debug!(
            cart_id = %cart_id,
            product_id = %product_id,
            requested = quantity,
            quantity = stored,
            "quantity updated"
        );
        Ok(stored)
    }

    /// Drop a line. Returns whether anything was removed.
    pub fn remove_item(&mut self, product_id: ProductId) -> Result<bool, LedgerError> {
        let cart_id = self.id();
        let events = self.dispatch(CartCommand::RemoveItem(RemoveItem {
            cart_id,
            product_id,
            occurred_at: Utc::now(),
        }))?;

        let removed = !events.is_empty();
        tracing::debug!(cart_id = %cart_id, product_id = %product_id, removed, "item removed");
        Ok(removed)
    }

    /// Current totals, recomputed on every call.
    pub fn summary(&self) -> CartSummary {
        self.pricing.summarize(self.cart.lines())
    }

    /// Validate delivery details, finalize the order and empty the cart.
    pub fn submit_checkout(&mut self, delivery: DeliveryInfo) -> Result<PlacedOrder, LedgerError> {
        let cart_id = self.id();
        let command = CartCommand::Checkout(Checkout {
            cart_id,
            order_id: OrderId::new(),
            delivery,
            occurred_at: Utc::now(),
        });

        let events = match self.dispatch(command) {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(cart_id = %cart_id, error = %err, "checkout rejected");
                return Err(err);
            }
        };

        let order = events
            .iter()
            .find_map(|ev| match ev {
                CartEvent::CheckedOut(e) => Some(PlacedOrder::from_checkout(e, &self.pricing)),
                _ => None,
            })
            .ok_or_else(|| DomainError::invariant("checkout produced no order"))?;

        tracing::info!(
            cart_id = %cart_id,
            order_id = %order.order_id,
            lines = order.lines.len(),
            total = %order.summary.total,
            "order placed"
        );
        Ok(order)
    }

    fn dispatch(&mut self, command: CartCommand) -> Result<Vec<CartEvent>, LedgerError> {
        let base = self.cart.version();
        let events = execute(&mut self.cart, &command)?;

        let aggregate_id = *self.cart.id_typed().as_uuid();
        for (offset, event) in events.iter().enumerate() {
            let envelope = EventEnvelope::new(
                Uuid::now_v7(),
                aggregate_id,
                AGGREGATE_TYPE,
                base + offset as u64 + 1,
                event.clone(),
            );
            self.bus
                .publish(envelope)
                .map_err(|e| LedgerError::Publish(e.to_string()))?;
        }

        Ok(events)
    }
}
