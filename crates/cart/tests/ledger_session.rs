//! End-to-end storefront session against the demo catalog.

use std::sync::Arc;

use storefront_cart::{
    CartEnvelope, CartEvent, CartLedger, CartState, DeliveryInfo, LedgerError, StorefrontConfig,
};
use storefront_catalog::{Catalog, CatalogQuery, ProductId};
use storefront_core::{CartId, DomainError, Money};
use storefront_events::{Event, EventBus, InMemoryEventBus};

fn demo_catalog() -> Catalog {
    Catalog::demo().expect("demo catalog is valid")
}

#[test]
fn browse_fill_and_check_out() {
    let catalog = demo_catalog();
    let config = StorefrontConfig::default();
    let mut ledger = CartLedger::from_config(&config).unwrap();
    let events = ledger.subscribe();

    let electronics = catalog.filter(&CatalogQuery::default().in_category("Electronics"));
    assert_eq!(electronics.len(), 2);

    for product in &electronics {
        ledger.add_item(product).unwrap();
    }
    let headphones = catalog.require(ProductId::new(1)).unwrap();
    ledger.add_item(headphones).unwrap();

    // Headphones x2 + speaker x1.
    let summary = ledger.summary();
    assert_eq!(summary.item_count, 2);
    assert_eq!(summary.unit_count, 3);
    assert_eq!(summary.subtotal, Money::new(12_990 * 2 + 6_990));
    assert_eq!(summary.total, Money::new(12_990 * 2 + 6_990 + 300));

    let fmt = config.currency_format();
    assert_eq!(fmt.format(summary.total), "33\u{a0}270\u{a0}₽");

    // Minus button on a single unit stays at one.
    let speaker = ProductId::new(5);
    assert_eq!(ledger.set_quantity(speaker, 0).unwrap(), 1);

    let err = ledger
        .submit_checkout(DeliveryInfo::new("   ", "+7 999 123-45-67"))
        .unwrap_err();
    assert!(err.is_validation());
    assert_eq!(ledger.state(), CartState::Populated);

    let order = ledger
        .submit_checkout(DeliveryInfo::new("12 Main St", "+7 999 123-45-67"))
        .unwrap();
    assert_eq!(order.summary, summary);
    assert_eq!(ledger.state(), CartState::Empty);

    let received: Vec<CartEnvelope> = events.drain();
    let last = received.last().expect("events were published");
    assert_eq!(last.payload().event_type(), "cart.checked_out");
    match last.payload() {
        CartEvent::CheckedOut(e) => assert_eq!(e.order_id, order.order_id),
        other => panic!("Expected CheckedOut, got {other:?}"),
    }

    // The cart stays usable after checkout.
    assert_eq!(ledger.add_item(headphones).unwrap(), 1);
}

#[test]
fn shared_bus_sees_cart_opened() {
    let bus = Arc::new(InMemoryEventBus::<CartEnvelope>::new());
    let early = bus.subscribe();
    let pricing = StorefrontConfig::default().pricing().unwrap();
    let cart_id = CartId::new();

    let ledger = CartLedger::with_bus(cart_id, pricing, Arc::clone(&bus)).unwrap();

    let opened = early.try_recv().unwrap();
    assert_eq!(opened.sequence_number(), 1);
    assert_eq!(opened.payload().event_type(), "cart.opened");
    assert_eq!(ledger.id(), cart_id);
}

#[test]
fn empty_cart_cannot_check_out() {
    let mut ledger = CartLedger::from_config(&StorefrontConfig::default()).unwrap();
    let err = ledger.submit_checkout(DeliveryInfo::new("A", "B")).unwrap_err();
    match err {
        LedgerError::Domain(DomainError::Validation(msg)) => {
            assert_eq!(msg, "cannot check out an empty cart")
        }
        other => panic!("Expected validation error, got {other:?}"),
    }
}
