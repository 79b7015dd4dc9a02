//! Result ordering.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Sort order for search results. All orderings are stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Catalog order
    #[default]
    Relevance,
    PriceLow,
    PriceHigh,
    /// Highest average rating first
    Rating,
    /// Most recently added first; undated products sort last
    Newest,
    /// Most ratings first
    Popular,
    NameAsc,
    NameDesc,
}

impl SortKey {
    /// Returns every sort key.
    pub fn all() -> &'static [SortKey] {
        &[
            SortKey::Relevance,
            SortKey::PriceLow,
            SortKey::PriceHigh,
            SortKey::Rating,
            SortKey::Newest,
            SortKey::Popular,
            SortKey::NameAsc,
            SortKey::NameDesc,
        ]
    }

    /// Parses a key, falling back to `Relevance` for unknown input.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|e| {
            warn!("{}", e);
            SortKey::Relevance
        })
    }

    /// Compares two products under this ordering.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Relevance => Ordering::Equal,
            SortKey::PriceLow => a.price.total_cmp(&b.price),
            SortKey::PriceHigh => b.price.total_cmp(&a.price),
            SortKey::Rating => b.rating.average.total_cmp(&a.rating.average),
            SortKey::Newest => b.created_timestamp().cmp(&a.created_timestamp()),
            SortKey::Popular => b.rating.count.cmp(&a.rating.count),
            SortKey::NameAsc => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::NameDesc => b.name.to_lowercase().cmp(&a.name.to_lowercase()),
        }
    }

    /// Sorts products in place.
    pub fn sort(&self, products: &mut [Product]) {
        if *self == SortKey::Relevance {
            return;
        }
        products.sort_by(|a, b| self.compare(a, b));
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "relevance" | "" => Ok(SortKey::Relevance),
            "price_low" => Ok(SortKey::PriceLow),
            "price_high" => Ok(SortKey::PriceHigh),
            "rating" => Ok(SortKey::Rating),
            "newest" => Ok(SortKey::Newest),
            "popular" => Ok(SortKey::Popular),
            "name_asc" => Ok(SortKey::NameAsc),
            "name_desc" => Ok(SortKey::NameDesc),
            _ => Err(format!(
                "Unknown sort: {}. Use: relevance, price_low, price_high, rating, newest, popular, name_asc, name_desc",
                s
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Relevance => "relevance",
            SortKey::PriceLow => "price_low",
            SortKey::PriceHigh => "price_high",
            SortKey::Rating => "rating",
            SortKey::Newest => "newest",
            SortKey::Popular => "popular",
            SortKey::NameAsc => "name_asc",
            SortKey::NameDesc => "name_desc",
        };
        f.pad(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Rating;
    use crate::filters::test_support::product;
    use chrono::{TimeZone, Utc};

    fn ids(products: &[Product]) -> Vec<u64> {
        products.iter().map(|p| p.id).collect()
    }

    fn sample() -> Vec<Product> {
        let mut a = product(1, "banana");
        a.price = 30.0;
        a.rating = Rating::new(4.0, 5);
        a.created_at = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).single();

        let mut b = product(2, "Apple");
        b.price = 10.0;
        b.rating = Rating::new(4.8, 50);

        let mut c = product(3, "cherry");
        c.price = 20.0;
        c.rating = Rating::new(4.0, 500);
        c.created_at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single();

        vec![a, b, c]
    }

    fn sorted(key: SortKey) -> Vec<u64> {
        let mut products = sample();
        key.sort(&mut products);
        ids(&products)
    }

    #[test]
    fn test_relevance_keeps_order() {
        assert_eq!(sorted(SortKey::Relevance), vec![1, 2, 3]);
    }

    #[test]
    fn test_price_sorts() {
        assert_eq!(sorted(SortKey::PriceLow), vec![2, 3, 1]);
        assert_eq!(sorted(SortKey::PriceHigh), vec![1, 3, 2]);
    }

    #[test]
    fn test_rating_sort_is_stable() {
        // 1 and 3 tie on 4.0; catalog order is kept
        assert_eq!(sorted(SortKey::Rating), vec![2, 1, 3]);
    }

    #[test]
    fn test_newest_missing_date_is_epoch() {
        assert_eq!(sorted(SortKey::Newest), vec![3, 1, 2]);
    }

    #[test]
    fn test_popular() {
        assert_eq!(sorted(SortKey::Popular), vec![3, 2, 1]);
    }

    #[test]
    fn test_name_sorts_case_insensitive() {
        assert_eq!(sorted(SortKey::NameAsc), vec![2, 1, 3]);
        assert_eq!(sorted(SortKey::NameDesc), vec![3, 1, 2]);
    }

    #[test]
    fn test_parse() {
        assert_eq!("price_low".parse::<SortKey>().unwrap(), SortKey::PriceLow);
        assert_eq!("PRICE-HIGH".parse::<SortKey>().unwrap(), SortKey::PriceHigh);
        assert_eq!("".parse::<SortKey>().unwrap(), SortKey::Relevance);
        assert!("cheapest".parse::<SortKey>().unwrap_err().contains("Unknown sort"));
        assert_eq!(SortKey::parse_lenient("cheapest"), SortKey::Relevance);
    }

    #[test]
    fn test_display_round_trips() {
        for key in SortKey::all() {
            assert_eq!(key.to_string().parse::<SortKey>().unwrap(), *key);
        }
        assert_eq!(format!("{:<10}|", SortKey::Rating), "rating    |");
    }
}
