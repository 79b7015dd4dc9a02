//! Exact-match attribute filters: category, brand, size and color.

use super::Filter;
use crate::catalog::Product;

/// Matches products in exactly this category.
pub struct CategoryFilter {
    category: String,
}

impl CategoryFilter {
    pub fn new(category: impl Into<String>) -> Self {
        Self { category: category.into() }
    }
}

impl Filter for CategoryFilter {
    fn matches(&self, product: &Product) -> bool {
        product.category == self.category
    }

    fn description(&self) -> String {
        format!("Category: {}", self.category)
    }
}

/// Matches products with exactly this brand. Products without a brand never match.
pub struct BrandFilter {
    brand: String,
}

impl BrandFilter {
    pub fn new(brand: impl Into<String>) -> Self {
        Self { brand: brand.into() }
    }
}

impl Filter for BrandFilter {
    fn matches(&self, product: &Product) -> bool {
        product.brand.as_deref() == Some(self.brand.as_str())
    }

    fn description(&self) -> String {
        format!("Brand: {}", self.brand)
    }
}

/// Matches products offered in this size.
pub struct SizeFilter {
    size: String,
}

impl SizeFilter {
    pub fn new(size: impl Into<String>) -> Self {
        Self { size: size.into() }
    }
}

impl Filter for SizeFilter {
    fn matches(&self, product: &Product) -> bool {
        product.sizes.iter().any(|s| *s == self.size)
    }

    fn description(&self) -> String {
        format!("Size: {}", self.size)
    }
}

/// Matches products offered in this color.
pub struct ColorFilter {
    color: String,
}

impl ColorFilter {
    pub fn new(color: impl Into<String>) -> Self {
        Self { color: color.into() }
    }
}

impl Filter for ColorFilter {
    fn matches(&self, product: &Product) -> bool {
        product.colors.iter().any(|c| *c == self.color)
    }

    fn description(&self) -> String {
        format!("Color: {}", self.color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::product;

    #[test]
    fn test_category_exact_match() {
        let filter = CategoryFilter::new("shoes");
        let mut p = product(1, "Runner");
        p.category = "shoes".to_string();
        assert!(filter.matches(&p));

        p.category = "Shoes".to_string();
        assert!(!filter.matches(&p));

        p.category = "shoes-kids".to_string();
        assert!(!filter.matches(&p));
    }

    #[test]
    fn test_brand_filter() {
        let filter = BrandFilter::new("Stride");
        let mut p = product(1, "Runner");
        p.brand = Some("Stride".to_string());
        assert!(filter.matches(&p));

        p.brand = None;
        assert!(!filter.matches(&p));
    }

    #[test]
    fn test_size_membership() {
        let filter = SizeFilter::new("M");
        let mut p = product(1, "Tee");
        p.sizes = vec!["S".to_string(), "M".to_string()];
        assert!(filter.matches(&p));

        p.sizes.clear();
        assert!(!filter.matches(&p));
    }

    #[test]
    fn test_color_membership() {
        let filter = ColorFilter::new("Red");
        let mut p = product(1, "Tee");
        p.colors = vec!["Red".to_string()];
        assert!(filter.matches(&p));

        p.colors = vec!["Dark Red".to_string()];
        assert!(!filter.matches(&p));
    }

    #[test]
    fn test_descriptions() {
        assert_eq!(CategoryFilter::new("home").description(), "Category: home");
        assert_eq!(BrandFilter::new("Sonique").description(), "Brand: Sonique");
        assert_eq!(SizeFilter::new("XL").description(), "Size: XL");
        assert_eq!(ColorFilter::new("Navy").description(), "Color: Navy");
    }
}
