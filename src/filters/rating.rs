//! Minimum rating filter.

use super::Filter;
use crate::catalog::Product;

/// Filters products by minimum average rating.
pub struct RatingFilter {
    min_stars: f32,
}

impl RatingFilter {
    /// Creates a new rating filter with minimum stars.
    pub fn new(min_stars: f32) -> Self {
        Self { min_stars: min_stars.clamp(0.0, 5.0) }
    }
}

impl Filter for RatingFilter {
    fn matches(&self, product: &Product) -> bool {
        product.rating.average >= self.min_stars
    }

    fn description(&self) -> String {
        format!("Rating: >= {:.1} stars", self.min_stars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Rating;
    use crate::filters::test_support::product;

    fn rated(stars: f32) -> Product {
        let mut p = product(1, "Test");
        p.rating = Rating::new(stars, 10);
        p
    }

    #[test]
    fn test_rating_filter() {
        let filter = RatingFilter::new(4.0);

        assert!(!filter.matches(&rated(3.5)));
        assert!(filter.matches(&rated(4.0)));
        assert!(filter.matches(&rated(4.5)));
        assert!(filter.matches(&rated(5.0)));
    }

    #[test]
    fn test_unrated_product_excluded() {
        let filter = RatingFilter::new(1.0);
        assert!(!filter.matches(&rated(0.0)));
    }

    #[test]
    fn test_clamping() {
        assert_eq!(RatingFilter::new(6.0).min_stars, 5.0);
        assert_eq!(RatingFilter::new(-1.0).min_stars, 0.0);
    }

    #[test]
    fn test_description() {
        assert_eq!(RatingFilter::new(4.0).description(), "Rating: >= 4.0 stars");
        assert_eq!(RatingFilter::new(3.5).description(), "Rating: >= 3.5 stars");
    }
}
