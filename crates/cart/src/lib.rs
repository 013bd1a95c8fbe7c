//! Cart ledger domain module (event-sourced).
//!
//! Line items, pricing summaries and checkout, implemented as deterministic
//! domain logic. [`CartLedger`] is the session-facing service: it runs commands
//! against the [`Cart`] aggregate and publishes the resulting events so the
//! presentation layer can re-render.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod format;
pub mod ledger;
pub mod order;
pub mod pricing;

pub use cart::{
    AddItem, Cart, CartCommand, CartEvent, CartOpened, CartState, CheckedOut, Checkout,
    ItemAdded, ItemQuantityChanged, ItemRemoved, LineItem, OpenCart, RemoveItem, SetQuantity,
};
pub use checkout::DeliveryInfo;
pub use config::StorefrontConfig;
pub use format::CurrencyFormat;
pub use ledger::{CartEnvelope, CartLedger, LedgerError};
pub use order::PlacedOrder;
pub use pricing::{CartSummary, PricingPolicy};
