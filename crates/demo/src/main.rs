//! Scripted storefront session: browse, fill the cart, check out.
//!
//! Usage: `storefront-demo [search text]`. The delivery fee and currency locale
//! come from `STOREFRONT_DELIVERY_FEE` / `STOREFRONT_CURRENCY_LOCALE`.

use anyhow::{Context, Result, bail};

use storefront_cart::{CartLedger, CurrencyFormat, DeliveryInfo, PlacedOrder, StorefrontConfig};
use storefront_catalog::{Catalog, CatalogQuery};
use storefront_events::Event;

fn main() -> Result<()> {
    storefront_observability::init();

    let config = StorefrontConfig::from_env();
    let fmt = config.currency_format();
    let catalog = Catalog::demo().context("demo catalog is invalid")?;

    let search = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let matches = catalog.filter(&CatalogQuery::search(search.clone()));
    tracing::info!(search = %search, matches = matches.len(), "catalog filtered");

    if matches.is_empty() {
        bail!("no products match {search:?}");
    }

    let mut ledger = CartLedger::from_config(&config).context("failed to open cart")?;
    let updates = ledger.subscribe();

    for product in matches.iter().take(3) {
        ledger.add_item(product)?;
    }
    if let Some(first) = matches.first() {
        ledger.add_item(first)?;
    }

    for envelope in updates.drain() {
        tracing::info!(
            sequence = envelope.sequence_number(),
            event = envelope.payload().event_type(),
            "cart updated"
        );
    }

    let summary = ledger.summary();
    tracing::info!(
        items = summary.item_count,
        units = summary.unit_count,
        total = %fmt.format(summary.total),
        "cart ready for checkout"
    );

    let delivery = DeliveryInfo::new("12 Main St, apt 4", "+7 (999) 123-45-67")
        .with_comment("Call before delivery");
    let order = ledger.submit_checkout(delivery)?;

    println!("{}", receipt(&order, &fmt));
    println!("{}", serde_json::to_string_pretty(&order)?);
    Ok(())
}

fn receipt(order: &PlacedOrder, fmt: &CurrencyFormat) -> String {
    let mut out = format!("Order {}\n", order.order_id);
    for line in &order.lines {
        out.push_str(&format!(
            "  {:<28} {} x {} = {}\n",
            line.name,
            fmt.format(line.unit_price),
            line.quantity,
            fmt.format(line.line_total()),
        ));
    }
    out.push_str(&format!("  Items ({}): {}\n", order.summary.item_count, fmt.format(order.summary.subtotal)));
    out.push_str(&format!("  Delivery: {}\n", fmt.format(order.summary.delivery_fee)));
    out.push_str(&format!("  Total: {}\n", fmt.format(order.summary.total)));
    out.push_str(&format!("  Ship to: {} ({})", order.delivery.address, order.delivery.phone));
    out
}
