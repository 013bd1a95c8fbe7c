use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, Entity, Money};

/// Product identifier (unique within a catalog).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl ProductId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Customer rating with one decimal place, stored in tenths (48 = 4.8).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MAX_TENTHS: u8 = 50;

    pub fn from_tenths(tenths: u8) -> DomainResult<Self> {
        if tenths > Self::MAX_TENTHS {
            return Err(DomainError::validation("rating cannot exceed 5.0"));
        }
        Ok(Self(tenths))
    }

    pub const fn tenths(self) -> u8 {
        self.0
    }
}

impl core::fmt::Display for Rating {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Unvalidated product listing, as supplied by whoever curates the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
    /// Price in smallest currency unit.
    pub price: Money,
    pub category: String,
    /// Rating in tenths (0..=50).
    pub rating: u8,
    pub description: String,
    pub image: String,
}

/// A purchasable catalog listing.
///
/// Immutable once constructed; the cart copies the fields it needs into its
/// own line snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NewProduct")]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
    category: String,
    rating: Rating,
    description: String,
    image: String,
}

impl Product {
    pub fn new(listing: NewProduct) -> DomainResult<Self> {
        if listing.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        if listing.category.trim().is_empty() {
            return Err(DomainError::validation("category cannot be empty"));
        }

        let rating = Rating::from_tenths(listing.rating)?;

        Ok(Self {
            id: listing.id,
            name: listing.name,
            price: listing.price,
            category: listing.category,
            rating,
            description: listing.description,
            image: listing.image,
        })
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// Case-insensitive substring match on name or description.
    ///
    /// `needle` must already be lowercased.
    pub(crate) fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TryFrom<NewProduct> for Product {
    type Error = DomainError;

    fn try_from(value: NewProduct) -> Result<Self, Self::Error> {
        Product::new(value)
    }
}

impl From<Product> for NewProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            name: value.name,
            price: value.price,
            category: value.category,
            rating: value.rating.tenths(),
            description: value.description,
            image: value.image,
        }
    }
}
