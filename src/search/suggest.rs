//! Autocomplete suggestions from product names, categories and brands.

use crate::catalog::Product;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Shortest query (in characters) that produces suggestions.
pub const MIN_SUGGESTION_QUERY_LEN: usize = 2;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionKind {
    Product,
    Category,
    Brand,
}

impl std::fmt::Display for SuggestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestionKind::Product => f.pad("product"),
            SuggestionKind::Category => f.pad("category"),
            SuggestionKind::Brand => f.pad("brand"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    #[serde(rename = "type")]
    pub kind: SuggestionKind,
    pub text: String,
    /// Set for product suggestions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<u64>,
}

/// Builds suggestions: matching products first, then categories, then brands.
///
/// Matching is case-insensitive substring containment. No scoring beyond
/// source order; the list is cut at [`MAX_SUGGESTIONS`].
pub fn suggest(products: &[Product], query: &str) -> Vec<Suggestion> {
    let query = query.trim();
    if query.chars().count() < MIN_SUGGESTION_QUERY_LEN {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let contains = |s: &str| s.to_lowercase().contains(&needle);

    let product_matches = products.iter().filter(|p| contains(&p.name)).map(|p| Suggestion {
        kind: SuggestionKind::Product,
        text: p.name.clone(),
        product_id: Some(p.id),
    });

    let mut seen_categories = HashSet::new();
    let category_matches = products
        .iter()
        .map(|p| p.category.as_str())
        .filter(|c| !c.is_empty() && seen_categories.insert(*c) && contains(c))
        .map(|c| Suggestion { kind: SuggestionKind::Category, text: c.to_string(), product_id: None });

    let mut seen_brands = HashSet::new();
    let brand_matches = products
        .iter()
        .filter_map(|p| p.brand.as_deref())
        .filter(|b| seen_brands.insert(*b) && contains(b))
        .map(|b| Suggestion { kind: SuggestionKind::Brand, text: b.to_string(), product_id: None });

    product_matches.chain(category_matches).chain(brand_matches).take(MAX_SUGGESTIONS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::filters::test_support::product;

    #[test]
    fn test_kind_respects_width() {
        assert_eq!(format!("{:<9}|", SuggestionKind::Product), "product  |");
        assert_eq!(format!("{:<9}|", SuggestionKind::Brand), "brand    |");
        assert_eq!(format!("{:>9}", SuggestionKind::Category), " category");
    }

    #[test]
    fn test_short_query_yields_nothing() {
        let catalog = Catalog::seed();
        assert!(suggest(catalog.products(), "").is_empty());
        assert!(suggest(catalog.products(), "s").is_empty());
        assert!(suggest(catalog.products(), "  s  ").is_empty());
    }

    #[test]
    fn test_products_then_categories_then_brands() {
        let mut a = product(1, "Stripe Scarf");
        a.category = "accessories".to_string();
        a.brand = Some("Stride".to_string());
        let mut b = product(2, "Basic Tee");
        b.category = "streetwear".to_string();
        b.brand = Some("Stride".to_string());

        let suggestions = suggest(&[a, b], "str");
        let kinds: Vec<_> = suggestions.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SuggestionKind::Product, SuggestionKind::Category, SuggestionKind::Brand]
        );
        assert_eq!(suggestions[0].product_id, Some(1));
        assert_eq!(suggestions[1].text, "streetwear");
        // Brand listed once even though two products share it
        assert_eq!(suggestions[2].text, "Stride");
    }

    #[test]
    fn test_case_insensitive() {
        let catalog = Catalog::seed();
        let suggestions = suggest(catalog.products(), "SHOE");
        assert!(suggestions.iter().any(|s| s.text == "Red Running Shoe"));
        assert!(suggestions.iter().any(|s| s.kind == SuggestionKind::Category && s.text == "shoes"));
    }

    #[test]
    fn test_truncated_to_max() {
        let products: Vec<_> = (1..=20).map(|i| product(i, &format!("Lamp {}", i))).collect();
        let suggestions = suggest(&products, "lamp");
        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert_eq!(suggestions[0].text, "Lamp 1");
    }

    #[test]
    fn test_serialized_type_field() {
        let s = Suggestion { kind: SuggestionKind::Brand, text: "Sonique".into(), product_id: None };
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, r#"{"type":"brand","text":"Sonique"}"#);
    }
}
