//! Cart totals.

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Money, ValueObject};

use crate::cart::LineItem;

/// Flat delivery fee charged on any cart with a positive subtotal.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PricingPolicy {
    fixed_delivery_fee: Money,
}

impl PricingPolicy {
    pub fn new(fixed_delivery_fee: Money) -> DomainResult<Self> {
        if fixed_delivery_fee.is_zero() {
            return Err(DomainError::validation("delivery fee must be positive"));
        }
        Ok(Self { fixed_delivery_fee })
    }

    pub fn fixed_delivery_fee(&self) -> Money {
        self.fixed_delivery_fee
    }

    pub fn delivery_fee(&self, subtotal: Money) -> Money {
        if subtotal.is_zero() {
            Money::ZERO
        } else {
            self.fixed_delivery_fee
        }
    }

    /// Derive totals from the given lines. Pure; callers recompute on every read.
    pub fn summarize(&self, lines: &[LineItem]) -> CartSummary {
        let subtotal: Money = lines.iter().map(LineItem::line_total).sum();
        let delivery_fee = self.delivery_fee(subtotal);

        CartSummary {
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
            item_count: lines.len(),
            unit_count: lines.iter().map(|l| u64::from(l.quantity)).sum(),
        }
    }
}

/// Derived cart totals.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
    /// Distinct line items.
    pub item_count: usize,
    /// Sum of quantities across lines.
    pub unit_count: u64,
}

impl ValueObject for CartSummary {}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_catalog::ProductId;

    fn line(id: u64, price: u64, quantity: u32) -> LineItem {
        LineItem {
            product_id: ProductId::new(id),
            name: format!("Product {id}"),
            unit_price: Money::new(price),
            image: String::new(),
            quantity,
        }
    }

    fn policy() -> PricingPolicy {
        PricingPolicy::new(Money::new(300)).unwrap()
    }

    #[test]
    fn empty_cart_has_no_delivery_fee() {
        let summary = policy().summarize(&[]);
        assert_eq!(summary.subtotal, Money::ZERO);
        assert_eq!(summary.delivery_fee, Money::ZERO);
        assert_eq!(summary.total, Money::ZERO);
        assert_eq!(summary.item_count, 0);
    }

    #[test]
    fn totals_include_flat_fee() {
        let summary = policy().summarize(&[line(1, 12_990, 2), line(2, 2_990, 1)]);
        assert_eq!(summary.subtotal, Money::new(28_970));
        assert_eq!(summary.delivery_fee, Money::new(300));
        assert_eq!(summary.total, Money::new(29_270));
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.unit_count, 3);
    }

    #[test]
    fn zero_fee_is_rejected() {
        assert!(PricingPolicy::new(Money::ZERO).unwrap_err().is_validation());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: subtotal is Σ price×qty, the fee is zero iff the
            /// subtotal is zero, and summarizing twice gives the same answer.
            #[test]
            fn summary_is_consistent(
                raw in proptest::collection::vec((0u64..100_000, 1u32..50), 0..12),
                fee in 1u64..10_000,
            ) {
                let policy = PricingPolicy::new(Money::new(fee)).unwrap();
                let lines: Vec<LineItem> = raw
                    .iter()
                    .enumerate()
                    .map(|(i, (price, qty))| line(i as u64, *price, *qty))
                    .collect();

                let summary = policy.summarize(&lines);
                let expected: u64 = raw.iter().map(|(p, q)| p * u64::from(*q)).sum();

                prop_assert_eq!(summary.subtotal.amount(), expected);
                prop_assert_eq!(summary.delivery_fee.is_zero(), expected == 0);
                if expected > 0 {
                    prop_assert_eq!(summary.delivery_fee, Money::new(fee));
                }
                prop_assert_eq!(summary.total, summary.subtotal + summary.delivery_fee);
                prop_assert_eq!(summary, policy.summarize(&lines));
            }
        }
    }
}
