//! Price range filter.

use super::Filter;
use crate::catalog::Product;

/// Filters products by an inclusive price range.
pub struct PriceFilter {
    min: f64,
    max: f64,
}

impl PriceFilter {
    /// Creates a filter with both bounds, inclusive. Bounds given in reverse are swapped.
    pub fn range(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Creates a filter with only a minimum price.
    pub fn min(price: f64) -> Self {
        Self { min: price, max: f64::INFINITY }
    }

    /// Creates a filter with only a maximum price.
    pub fn max(price: f64) -> Self {
        Self { min: 0.0, max: price }
    }
}

impl Filter for PriceFilter {
    fn matches(&self, product: &Product) -> bool {
        product.price >= self.min && product.price <= self.max
    }

    fn description(&self) -> String {
        if self.max.is_infinite() {
            format!("Price: >= ${:.2}", self.min)
        } else {
            format!("Price: ${:.2} - ${:.2}", self.min, self.max)
        }
    }
}
