//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus is how the presentation layer observes the cart ledger: every
//! applied event is published, and each subscriber receives its own copy.
//!
//! - **Transport-agnostic**: in-memory channels today, anything with
//!   broadcast semantics tomorrow
//! - **Ordered per publisher**: a single ledger publishes sequentially
//! - **No persistence**: the bus distributes, it does not store

use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvError, RecvTimeoutError, TryRecvError};
use std::time::Duration;

/// A subscription to an event stream.
///
/// ```ignore
/// let subscription = ledger.subscribe();
/// ledger.add_item(&product)?;
///
/// for envelope in subscription.drain() {
///     render(envelope.payload());
/// }
/// ```
///
/// Subscriptions are meant for single-threaded consumption; one consumer per
/// subscription.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Collect every message already delivered, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// ```text
/// Command → Aggregate (handle + apply) → Event Bus (publish) → Subscribers
///                                                                ├─ cart badge
///                                                                └─ cart page
/// ```
///
/// Events are applied to the aggregate first and published second, so a
/// failed publish never leaves subscribers ahead of the ledger's state.
///
/// Implementations must be `Send + Sync` so subscriptions can be handed to
/// another thread.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + core::fmt::Display + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
