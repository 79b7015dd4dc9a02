//! Product filtering system with composable filters.

pub mod attribute;
pub mod keyword;
pub mod price;
pub mod rating;
pub mod stock;

use crate::catalog::Product;
use serde::{Deserialize, Serialize};

pub use attribute::{BrandFilter, CategoryFilter, ColorFilter, SizeFilter};
pub use keyword::KeywordFilter;
pub use price::PriceFilter;
pub use rating::RatingFilter;
pub use stock::{SaleFilter, StockFilter};

/// Default inclusive price bounds.
pub const DEFAULT_PRICE_RANGE: (f64, f64) = (0.0, 1000.0);

/// Trait for filtering products.
pub trait Filter: Send + Sync {
    /// Returns true if the product passes the filter.
    fn matches(&self, product: &Product) -> bool;

    /// Returns a description of this filter.
    fn description(&self) -> String;
}

/// A chain of filters that must all pass.
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    /// Creates an empty filter chain.
    pub fn new() -> Self {
        Self { filters: Vec::new() }
    }

    /// Adds a filter to the chain.
    pub fn add(&mut self, filter: impl Filter + 'static) -> &mut Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Checks if a product passes all filters.
    pub fn matches(&self, product: &Product) -> bool {
        self.filters.iter().all(|f| f.matches(product))
    }

    /// Filters a collection of products, keeping order.
    pub fn apply(&self, products: Vec<Product>) -> Vec<Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }

    /// Returns true if no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Returns the number of filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Returns descriptions of all filters.
    pub fn descriptions(&self) -> Vec<String> {
        self.filters.iter().map(|f| f.description()).collect()
    }
}

impl Default for FilterChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Structured filter selections. Empty strings, `0` rating and `false`
/// flags leave that field unconstrained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterState {
    pub category: String,
    pub brand: String,
    pub size: String,
    pub color: String,
    pub price_range: (f64, f64),
    pub rating: f32,
    pub in_stock: bool,
    pub on_sale: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: String::new(),
            brand: String::new(),
            size: String::new(),
            color: String::new(),
            price_range: DEFAULT_PRICE_RANGE,
            rating: 0.0,
            in_stock: false,
            on_sale: false,
        }
    }
}

/// A single-field change to a [`FilterState`].
#[derive(Debug, Clone, PartialEq)]
pub enum FilterUpdate {
    Category(String),
    Brand(String),
    Size(String),
    Color(String),
    PriceRange(f64, f64),
    Rating(f32),
    InStock(bool),
    OnSale(bool),
}

impl FilterState {
    /// Applies one field change.
    pub fn update(&mut self, update: FilterUpdate) {
        match update {
            FilterUpdate::Category(v) => self.category = v,
            FilterUpdate::Brand(v) => self.brand = v,
            FilterUpdate::Size(v) => self.size = v,
            FilterUpdate::Color(v) => self.color = v,
            FilterUpdate::PriceRange(min, max) => self.price_range = (min, max),
            FilterUpdate::Rating(v) => self.rating = v,
            FilterUpdate::InStock(v) => self.in_stock = v,
            FilterUpdate::OnSale(v) => self.on_sale = v,
        }
    }

    /// Resets every field to its default.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Number of fields that differ from their default.
    pub fn active_count(&self) -> usize {
        let defaults = Self::default();
        [
            !self.category.is_empty(),
            !self.brand.is_empty(),
            !self.size.is_empty(),
            !self.color.is_empty(),
            self.price_range != defaults.price_range,
            self.rating > 0.0,
            self.in_stock,
            self.on_sale,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }
}

/// Builder for constructing a FilterChain.
pub struct FilterChainBuilder {
    chain: FilterChain,
}

impl FilterChainBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { chain: FilterChain::new() }
    }

    /// Builds a chain from every constrained field of a filter state.
    pub fn from_state(state: &FilterState) -> Self {
        Self::new()
            .category(&state.category)
            .brand(&state.brand)
            .size(&state.size)
            .color(&state.color)
            .price_range(state.price_range.0, state.price_range.1)
            .min_rating(state.rating)
            .in_stock(state.in_stock)
            .on_sale(state.on_sale)
    }

    /// Adds free-text query terms.
    pub fn query(mut self, query: &str) -> Self {
        let filter = KeywordFilter::from_query(query);
        if !filter.is_empty() {
            self.chain.add(filter);
        }
        self
    }

    /// Adds a category filter unless empty.
    pub fn category(mut self, category: &str) -> Self {
        if !category.is_empty() {
            self.chain.add(CategoryFilter::new(category));
        }
        self
    }

    /// Adds a brand filter unless empty.
    pub fn brand(mut self, brand: &str) -> Self {
        if !brand.is_empty() {
            self.chain.add(BrandFilter::new(brand));
        }
        self
    }

    /// Adds a size filter unless empty.
    pub fn size(mut self, size: &str) -> Self {
        if !size.is_empty() {
            self.chain.add(SizeFilter::new(size));
        }
        self
    }

    /// Adds a color filter unless empty.
    pub fn color(mut self, color: &str) -> Self {
        if !color.is_empty() {
            self.chain.add(ColorFilter::new(color));
        }
        self
    }

    /// Adds an inclusive price range filter. The range is always applied.
    pub fn price_range(mut self, min: f64, max: f64) -> Self {
        self.chain.add(PriceFilter::range(min, max));
        self
    }

    /// Adds a minimum rating filter when above zero.
    pub fn min_rating(mut self, min: f32) -> Self {
        if min > 0.0 {
            self.chain.add(RatingFilter::new(min));
        }
        self
    }

    /// Adds an in-stock filter.
    pub fn in_stock(mut self, enabled: bool) -> Self {
        if enabled {
            self.chain.add(StockFilter::new());
        }
        self
    }

    /// Adds an on-sale filter.
    pub fn on_sale(mut self, enabled: bool) -> Self {
        if enabled {
            self.chain.add(SaleFilter::new());
        }
        self
    }

    /// Builds the filter chain.
    pub fn build(self) -> FilterChain {
        self.chain
    }
}

impl Default for FilterChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}
