//! Money value object.

use core::iter::Sum;
use core::ops::Add;

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// Non-negative amount in the smallest currency unit.
///
/// Arithmetic saturates at `u64::MAX` instead of wrapping; catalog prices
/// are nowhere near that bound.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn new(amount: u64) -> Self {
        Self(amount)
    }

    pub const fn amount(self) -> u64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Price of `quantity` units at this unit price.
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl ValueObject for Money {}

impl From<u64> for Money {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl core::fmt::Display for Money {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_multiplies_unit_price() {
        assert_eq!(Money::new(12_990).times(3), Money::new(38_970));
        assert_eq!(Money::new(500).times(0), Money::ZERO);
    }

    #[test]
    fn arithmetic_saturates() {
        assert_eq!(Money::new(u64::MAX) + Money::new(1), Money::new(u64::MAX));
        assert_eq!(Money::new(u64::MAX).times(2), Money::new(u64::MAX));
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&Money::new(300)).unwrap();
        assert_eq!(json, "300");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: summing line totals matches summing raw amounts.
            #[test]
            fn sum_matches_raw_sum(prices in proptest::collection::vec(0u64..1_000_000, 0..32)) {
                let expected: u64 = prices.iter().sum();
                let total: Money = prices.iter().copied().map(Money::new).sum();
                prop_assert_eq!(total.amount(), expected);
            }
        }
    }
}
