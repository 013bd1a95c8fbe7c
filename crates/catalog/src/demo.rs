//! The storefront's built-in demo catalog.

use storefront_core::{DomainResult, Money};

use crate::catalog::Catalog;
use crate::product::{NewProduct, Product, ProductId};

const UNSPLASH: &str = "https://images.unsplash.com";

struct Listing {
    id: u64,
    name: &'static str,
    price: u64,
    image: &'static str,
    category: &'static str,
    rating: u8,
    description: &'static str,
}

const LISTINGS: [Listing; 8] = [
    Listing {
        id: 1,
        name: "Wireless Headphones Pro",
        price: 12_990,
        image: "photo-1505740420928-5e560c06d30e",
        category: "Electronics",
        rating: 48,
        description: "Premium wireless headphones with active noise cancelling",
    },
    Listing {
        id: 2,
        name: "Smart Watch Ultra",
        price: 24_990,
        image: "photo-1523275335684-37898b6baf30",
        category: "Gadgets",
        rating: 49,
        description: "Smart watch packed with health and fitness features",
    },
    Listing {
        id: 3,
        name: "Designer Sneakers",
        price: 8_990,
        image: "photo-1542291026-7eec264c27ff",
        category: "Footwear",
        rating: 47,
        description: "Stylish designer sneakers for everyday wear",
    },
    Listing {
        id: 4,
        name: "Premium Backpack",
        price: 5_490,
        image: "photo-1553062407-98eeb64c6a62",
        category: "Accessories",
        rating: 46,
        description: "Roomy backpack made from quality materials",
    },
    Listing {
        id: 5,
        name: "Bluetooth Speaker",
        price: 6_990,
        image: "photo-1608043152269-423dbba4e7e1",
        category: "Electronics",
        rating: 45,
        description: "Portable speaker with powerful sound and long battery life",
    },
    Listing {
        id: 6,
        name: "Laptop Stand",
        price: 3_490,
        image: "photo-1527864550417-7fd91fc51a46",
        category: "Accessories",
        rating: 44,
        description: "Ergonomic laptop stand",
    },
    Listing {
        id: 7,
        name: "Fitness Tracker",
        price: 4_990,
        image: "photo-1575311373937-040b8e1fd5b6",
        category: "Gadgets",
        rating: 43,
        description: "Fitness band for tracking your activity",
    },
    Listing {
        id: 8,
        name: "Sunglasses Classic",
        price: 2_990,
        image: "photo-1511499767150-a48a237f0083",
        category: "Accessories",
        rating: 42,
        description: "Classic sunglasses",
    },
];

impl Catalog {
    /// The eight-product demo catalog shown on the storefront's catalog page.
    pub fn demo() -> DomainResult<Self> {
        let products = LISTINGS
            .iter()
            .map(|l| {
                Product::new(NewProduct {
                    id: ProductId::new(l.id),
                    name: l.name.to_string(),
                    price: Money::new(l.price),
                    category: l.category.to_string(),
                    rating: l.rating,
                    description: l.description.to_string(),
                    image: format!("{UNSPLASH}/{}?w=500&h=500&fit=crop", l.image),
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;

        Catalog::new(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CatalogQuery;

    #[test]
    fn demo_catalog_loads() {
        let catalog = Catalog::demo().unwrap();

        assert_eq!(catalog.len(), 8);
        assert_eq!(
            catalog.categories(),
            vec!["Electronics", "Gadgets", "Footwear", "Accessories"]
        );
        assert_eq!(
            catalog.get(ProductId::new(2)).unwrap().price(),
            Money::new(24_990)
        );
    }

    #[test]
    fn demo_images_point_at_unsplash() {
        let catalog = Catalog::demo().unwrap();
        assert!(catalog
            .products()
            .iter()
            .all(|p| p.image().starts_with("https://images.unsplash.com/photo-")));
    }

    #[test]
    fn accessories_filter_returns_three_products() {
        let catalog = Catalog::demo().unwrap();
        let query = CatalogQuery::default().in_category("Accessories");
        assert_eq!(catalog.filter(&query).len(), 3);
    }
}
