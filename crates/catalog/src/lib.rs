//! Catalog provider.
//!
//! Immutable product listings plus the search/category filtering the
//! storefront's catalog page offers. Pure domain logic: no IO, no storage.

pub mod catalog;
pub mod demo;
pub mod product;

pub use catalog::{Catalog, CatalogQuery, CategoryFilter};
pub use product::{NewProduct, Product, ProductId, Rating};
