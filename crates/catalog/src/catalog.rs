use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult};

use crate::product::{Product, ProductId};

/// Category selection on the catalog page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    pub fn named(category: impl Into<String>) -> Self {
        Self::Named(category.into())
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => name == category,
        }
    }
}

/// Search box text plus selected category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub search: String,
    pub category: CategoryFilter,
}

impl CatalogQuery {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search: text.into(),
            category: CategoryFilter::All,
        }
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = CategoryFilter::named(category);
        self
    }
}

/// Static, insertion-ordered list of purchasable products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product ids.
    pub fn new(products: Vec<Product>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id_typed()) {
                return Err(DomainError::conflict(format!(
                    "duplicate product id {}",
                    product.id_typed()
                )));
            }
        }

        tracing::debug!(products = products.len(), "catalog loaded");
        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id_typed() == id)
    }

    /// Look up a product, failing with `NotFound` for unknown ids.
    pub fn require(&self, id: ProductId) -> DomainResult<&Product> {
        self.get(id).ok_or_else(DomainError::not_found)
    }

    /// Distinct category labels in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.products
            .iter()
            .map(Product::category)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Products matching both the search text and the category selection.
    pub fn filter(&self, query: &CatalogQuery) -> Vec<&Product> {
        let needle = query.search.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.matches_search(&needle) && query.category.matches(p.category()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::NewProduct;
    use storefront_core::Money;

    fn product(id: u64, name: &str, category: &str, description: &str) -> Product {
        Product::new(NewProduct {
            id: ProductId::new(id),
            name: name.to_string(),
            price: Money::new(1_000 * id),
            category: category.to_string(),
            rating: 45,
            description: description.to_string(),
            image: format!("{id}.jpg"),
        })
        .unwrap()
    }

    fn sample() -> Catalog {
        Catalog::new(vec![
            product(1, "Bluetooth Speaker", "Electronics", "Portable speaker"),
            product(2, "Laptop Stand", "Accessories", "Ergonomic stand"),
            product(3, "Smart Watch", "Gadgets", "Tracks your health"),
            product(4, "Premium Backpack", "Accessories", "Roomy and portable"),
        ])
        .unwrap()
    }

    fn ids(products: Vec<&Product>) -> Vec<u64> {
        products.iter().map(|p| p.id_typed().get()).collect()
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = Catalog::new(vec![
            product(1, "A", "X", ""),
            product(1, "B", "Y", ""),
        ])
        .unwrap_err();

        match err {
            DomainError::Conflict(msg) => assert!(msg.contains("duplicate product id 1")),
            _ => panic!("Expected Conflict error"),
        }
    }

    #[test]
    fn categories_are_distinct_in_first_seen_order() {
        assert_eq!(
            sample().categories(),
            vec!["Electronics", "Accessories", "Gadgets"]
        );
    }

    #[test]
    fn default_query_returns_everything() {
        assert_eq!(ids(sample().filter(&CatalogQuery::default())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn search_matches_name_or_description() {
        let catalog = sample();
        assert_eq!(ids(catalog.filter(&CatalogQuery::search("PORTABLE"))), vec![1, 4]);
        assert_eq!(ids(catalog.filter(&CatalogQuery::search("watch"))), vec![3]);
        assert!(catalog.filter(&CatalogQuery::search("sunglasses")).is_empty());
    }

    #[test]
    fn search_and_category_are_combined() {
        let query = CatalogQuery::search("portable").in_category("Accessories");
        assert_eq!(ids(sample().filter(&query)), vec![4]);
    }

    #[test]
    fn require_reports_unknown_ids() {
        let catalog = sample();
        assert_eq!(catalog.require(ProductId::new(2)).unwrap().name(), "Laptop Stand");
        assert_eq!(catalog.require(ProductId::new(99)).unwrap_err(), DomainError::NotFound);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every filtered product satisfies both predicates, and
            /// the filtered list is a subsequence of the catalog.
            #[test]
            fn filter_results_satisfy_query(
                search in "[a-zA-Z ]{0,6}",
                category in prop::sample::select(vec!["Electronics", "Accessories", "Gadgets", "Shoes"]),
                use_category in any::<bool>(),
            ) {
                let catalog = sample();
                let mut query = CatalogQuery::search(search.clone());
                if use_category {
                    query = query.in_category(category);
                }

                let results = catalog.filter(&query);
                let needle = search.to_lowercase();

                for p in &results {
                    prop_assert!(
                        p.name().to_lowercase().contains(&needle)
                            || p.description().to_lowercase().contains(&needle)
                    );
                    if use_category {
                        prop_assert_eq!(p.category(), category);
                    }
                }

                let all_ids = ids(catalog.products().iter().collect());
                let found = ids(results);
                let mut cursor = all_ids.iter();
                for id in &found {
                    prop_assert!(cursor.any(|candidate| candidate == id));
                }
            }
        }
    }
}
