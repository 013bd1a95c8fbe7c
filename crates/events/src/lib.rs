//! Domain events and their in-process distribution.
//!
//! Aggregates emit events; the ledger wraps them in envelopes and fans them out
//! to subscribers (the presentation layer) through an [`EventBus`].

pub mod bus;
pub mod envelope;
pub mod event;
pub mod handler;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use handler::execute;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
