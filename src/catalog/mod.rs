//! Catalog store: the static product collection every other component queries.

pub mod models;
pub mod seed;
pub mod service;

pub use models::{Product, Rating};
pub use service::{CatalogService, LocalCatalog};

use crate::error::{StoreError, StoreResult};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// An ordered, immutable set of products.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Creates a catalog from products, validating ids.
    pub fn new(products: Vec<Product>) -> StoreResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if product.id == 0 {
                return Err(StoreError::invalid(format!(
                    "product '{}' has id 0; ids must be positive",
                    product.name
                )));
            }
            if !seen.insert(product.id) {
                return Err(StoreError::invalid(format!("duplicate product id {}", product.id)));
            }
        }
        Ok(Self { products })
    }

    /// The built-in catalog.
    pub fn seed() -> Self {
        Self { products: seed::products() }
    }

    /// Parses a catalog from a JSON array of products.
    pub fn from_json_str(json: &str) -> StoreResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if !value.is_array() {
            return Err(StoreError::invalid("catalog JSON must be a list of products"));
        }
        let products: Vec<Product> = serde_json::from_value(value)?;
        Self::new(products)
    }

    /// Loads a catalog file.
    pub fn from_json_file(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        debug!("Loading catalog from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Looks up a product by id.
    pub fn get(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<String> {
        distinct(self.products.iter().map(|p| p.category.as_str()))
    }

    /// Distinct brands in first-seen order.
    pub fn brands(&self) -> Vec<String> {
        distinct(self.products.iter().filter_map(|p| p.brand.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values.filter(|v| !v.is_empty() && seen.insert(*v)).map(str::to_string).collect()
}
