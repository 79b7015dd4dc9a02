//! Availability and sale filters.

use super::Filter;
use crate::catalog::Product;

/// Filters to only include products that are in stock.
pub struct StockFilter;

impl StockFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StockFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StockFilter {
    fn matches(&self, product: &Product) -> bool {
        product.in_stock
    }

    fn description(&self) -> String {
        "In stock only".to_string()
    }
}

/// Filters to only include discounted products.
pub struct SaleFilter;

impl SaleFilter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SaleFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for SaleFilter {
    fn matches(&self, product: &Product) -> bool {
        product.is_on_sale()
    }

    fn description(&self) -> String {
        "On sale only".to_string()
    }
}
