//! Free-text query filtering.

use super::Filter;
use crate::catalog::Product;

/// Matches products whose searchable text contains every query term.
pub struct KeywordFilter {
    /// Lowercased, whitespace-separated terms.
    terms: Vec<String>,
}

impl KeywordFilter {
    /// Creates a filter from a raw query string.
    pub fn from_query(query: &str) -> Self {
        Self { terms: query.split_whitespace().map(|t| t.to_lowercase()).collect() }
    }

    /// Returns the parsed terms.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// Returns true if the query had no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Filter for KeywordFilter {
    fn matches(&self, product: &Product) -> bool {
        if self.terms.is_empty() {
            return true;
        }

        let text = product.searchable_text();
        self.terms.iter().all(|term| text.contains(term.as_str()))
    }

    fn description(&self) -> String {
        if self.terms.is_empty() {
            "Query: any".to_string()
        } else {
            format!("Query: {}", self.terms.join(" + "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::test_support::product;

    #[test]
    fn test_all_terms_required() {
        let filter = KeywordFilter::from_query("red shoe");

        assert!(filter.matches(&product(1, "Red Running Shoe")));
        assert!(!filter.matches(&product(2, "Red Jacket")));
        assert!(!filter.matches(&product(3, "Blue Shoe")));
    }

    #[test]
    fn test_terms_match_other_fields() {
        let mut p = product(1, "Runner");
        p.description = "A bright red upper".to_string();
        p.category = "shoes".to_string();
        assert!(KeywordFilter::from_query("red shoe").matches(&p));

        let mut p = product(2, "Daypack");
        p.brand = Some("Summit Gear".to_string());
        p.tags = vec!["Hiking".to_string()];
        assert!(KeywordFilter::from_query("summit hiking").matches(&p));
    }

    #[test]
    fn test_case_insensitivity() {
        let filter = KeywordFilter::from_query("RED");
        assert!(filter.matches(&product(1, "red cap")));
        assert!(filter.matches(&product(2, "Red Cap")));
    }

    #[test]
    fn test_partial_match() {
        let filter = KeywordFilter::from_query("wire");
        assert!(filter.matches(&product(1, "Wireless Headphones")));
    }

    #[test]
    fn test_empty_query_matches_all() {
        let filter = KeywordFilter::from_query("   ");
        assert!(filter.is_empty());
        assert!(filter.matches(&product(1, "Anything at all")));
        assert_eq!(filter.description(), "Query: any");
    }

    #[test]
    fn test_terms_split_on_whitespace() {
        let filter = KeywordFilter::from_query("  Red \t Shoe\n");
        assert_eq!(filter.terms(), ["red", "shoe"]);
        assert_eq!(filter.description(), "Query: red + shoe");
    }
}
