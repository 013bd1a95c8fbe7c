//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by their attribute values. In this
/// workspace `Money`, delivery details and cart summaries are value objects,
/// while catalog products are entities (identified by their product id).
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Money(u64);
///
/// impl ValueObject for Money {}
///
/// assert_eq!(Money(100), Money(100));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
