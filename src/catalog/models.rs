//! Data models for catalog products and their ratings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalog product. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique positive identifier
    pub id: u64,
    /// Display name
    pub name: String,
    /// Long description, searchable
    #[serde(default)]
    pub description: String,
    /// Category tag
    pub category: String,
    /// Subcategory tag
    #[serde(default)]
    pub subcategory: String,
    /// Current selling price
    pub price: f64,
    /// Price before discount; present and higher than `price` when on sale
    #[serde(default)]
    pub original_price: Option<f64>,
    /// Aggregate rating shown on listings
    #[serde(default)]
    pub rating: Rating,
    /// Free-form tags, searchable
    #[serde(default)]
    pub tags: Vec<String>,
    /// Available colors, in display order
    #[serde(default)]
    pub colors: Vec<String>,
    /// Available sizes, in display order
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Whether the product can currently be ordered
    #[serde(default)]
    pub in_stock: bool,
    /// Brand if known
    #[serde(default)]
    pub brand: Option<String>,
    /// Primary image path
    #[serde(default)]
    pub image: Option<String>,
    /// When the product was added to the catalog
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Returns true if the product has a higher original price.
    pub fn is_on_sale(&self) -> bool {
        self.original_price.is_some_and(|orig| orig > self.price)
    }

    /// Returns discount percentage if on sale.
    pub fn discount_percent(&self) -> Option<u8> {
        self.original_price.filter(|_| self.is_on_sale()).map(|orig| {
            let discount = ((orig - self.price) / orig * 100.0).round() as u8;
            discount.min(99)
        })
    }

    /// Lowercased text used for free-text matching.
    pub fn searchable_text(&self) -> String {
        let mut text = String::with_capacity(
            self.name.len() + self.description.len() + self.category.len() + 32,
        );
        text.push_str(&self.name);
        text.push(' ');
        text.push_str(&self.description);
        text.push(' ');
        text.push_str(&self.category);
        if let Some(brand) = &self.brand {
            text.push(' ');
            text.push_str(brand);
        }
        for tag in &self.tags {
            text.push(' ');
            text.push_str(tag);
        }
        text.to_lowercase()
    }

    /// Timestamp used by the `newest` sort. Missing dates sort as the epoch.
    pub fn created_timestamp(&self) -> i64 {
        self.created_at.map(|dt| dt.timestamp_millis()).unwrap_or(0)
    }
}

/// Product rating and review count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawRating")]
pub struct Rating {
    /// Average star rating (0.0 - 5.0)
    pub average: f32,
    /// Number of ratings
    pub count: u32,
}

impl Rating {
    /// Creates a new rating.
    pub fn new(average: f32, count: u32) -> Self {
        let average = if average.is_nan() { 0.0 } else { average.clamp(0.0, 5.0) };
        Self { average, count }
    }
}

/// Rating as written in catalog files, before clamping.
#[derive(Deserialize)]
struct RawRating {
    #[serde(default)]
    average: f32,
    #[serde(default)]
    count: u32,
}

impl From<RawRating> for Rating {
    fn from(raw: RawRating) -> Self {
        Rating::new(raw.average, raw.count)
    }
}
