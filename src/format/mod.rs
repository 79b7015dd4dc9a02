//! Output formatting (table, JSON, markdown, CSV) for products and collections.

use crate::catalog::Product;
use crate::collections::{Cart, Collection, Comparison, Wishlist};
use crate::config::OutputFormat;
use crate::reviews::{RatingSummary, Review};
use crate::search::Suggestion;
use serde::Serialize;
use serde_json::json;

/// Formats storefront data for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a single product.
    pub fn format_product(&self, product: &Product) -> String {
        match self.format {
            OutputFormat::Json => Self::json(product, "{}"),
            OutputFormat::Table => self.table_single(product),
            OutputFormat::Markdown => self.markdown_single(product),
            OutputFormat::Csv => self.csv_products(std::slice::from_ref(product)),
        }
    }

    /// Formats multiple products.
    pub fn format_products(&self, products: &[Product]) -> String {
        if products.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => Self::csv_header().to_string(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => Self::json(products, "[]"),
            OutputFormat::Table => self.table_products(products),
            OutputFormat::Markdown => self.markdown_products(products),
            OutputFormat::Csv => self.csv_products(products),
        }
    }

    pub fn format_suggestions(&self, suggestions: &[Suggestion]) -> String {
        match self.format {
            OutputFormat::Json => Self::json(suggestions, "[]"),
            _ if suggestions.is_empty() => "No suggestions.".to_string(),
            OutputFormat::Csv => {
                let mut lines = vec!["type,text,product_id".to_string()];
                for s in suggestions {
                    let id = s.product_id.map(|id| id.to_string()).unwrap_or_default();
                    lines.push(format!("{},{},{}", s.kind, Self::csv_escape(&s.text), id));
                }
                lines.join("\n")
            }
            OutputFormat::Markdown => suggestions
                .iter()
                .map(|s| format!("- {} _({})_", s.text, s.kind))
                .collect::<Vec<_>>()
                .join("\n"),
            OutputFormat::Table => suggestions
                .iter()
                .map(|s| format!("{:<9} {}", s.kind, s.text))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    /// Formats a plain list such as categories or recent searches.
    pub fn format_list(&self, heading: &str, entries: &[String]) -> String {
        match self.format {
            OutputFormat::Json => Self::json(entries, "[]"),
            OutputFormat::Csv => {
                let mut lines = vec![heading.to_lowercase().replace(' ', "_")];
                lines.extend(entries.iter().map(|e| Self::csv_escape(e)));
                lines.join("\n")
            }
            _ if entries.is_empty() => format!("No {}.", heading.to_lowercase()),
            OutputFormat::Markdown => {
                let mut lines = vec![format!("## {}", heading), String::new()];
                lines.extend(entries.iter().map(|e| format!("- {}", e)));
                lines.join("\n")
            }
            OutputFormat::Table => {
                let mut lines = vec![format!("{}:", heading)];
                lines.extend(entries.iter().enumerate().map(|(i, e)| format!("{:>3}. {}", i + 1, e)));
                lines.join("\n")
            }
        }
    }

    pub fn format_cart(&self, cart: &Cart) -> String {
        let items = cart.items();
        match self.format {
            OutputFormat::Json => Self::json(
                &json!({ "items": items, "count": cart.count(), "total": cart.total() }),
                "{}",
            ),
            _ if items.is_empty() => "Your cart is empty.".to_string(),
            OutputFormat::Csv => {
                let mut lines = vec!["product_id,name,size,color,quantity,price,line_total".to_string()];
                for item in items {
                    lines.push(format!(
                        "{},{},{},{},{},{},{:.2}",
                        item.product_id,
                        Self::csv_escape(&item.name),
                        Self::csv_escape(&item.size),
                        Self::csv_escape(&item.color),
                        item.quantity,
                        item.price,
                        item.line_total()
                    ));
                }
                lines.join("\n")
            }
            OutputFormat::Markdown => {
                let mut lines = vec![
                    "| ID | Product | Size | Color | Qty | Subtotal |".to_string(),
                    "|----|---------|------|-------|-----|----------|".to_string(),
                ];
                for item in items {
                    lines.push(format!(
                        "| {} | {} | {} | {} | {} | {:.2} |",
                        item.product_id,
                        item.name,
                        Self::or_dash(&item.size),
                        Self::or_dash(&item.color),
                        item.quantity,
                        item.line_total()
                    ));
                }
                lines.push(String::new());
                lines.push(format!("**Total:** {:.2} ({} items)", cart.total(), cart.count()));
                lines.join("\n")
            }
            OutputFormat::Table => {
                let mut lines = vec![
                    format!("{:<5}  {:<30}  {:<6}  {:<8}  {:>4}  {:>10}", "ID", "Product", "Size", "Color", "Qty", "Subtotal"),
                    format!("{:-<5}  {:-<30}  {:-<6}  {:-<8}  {:->4}  {:->10}", "", "", "", "", "", ""),
                ];
                for item in items {
                    lines.push(format!(
                        "{:<5}  {:<30}  {:<6}  {:<8}  {:>4}  {:>10.2}",
                        item.product_id,
                        Self::truncate(&item.name, 30),
                        Self::or_dash(&item.size),
                        Self::or_dash(&item.color),
                        item.quantity,
                        item.line_total()
                    ));
                }
                lines.push(String::new());
                lines.push(format!("Total: {:.2} ({} items)", cart.total(), cart.count()));
                lines.join("\n")
            }
        }
    }

    pub fn format_wishlist(&self, wishlist: &Wishlist) -> String {
        let items = wishlist.items();
        match self.format {
            OutputFormat::Json => Self::json(items, "[]"),
            _ if items.is_empty() => "Your wishlist is empty.".to_string(),
            OutputFormat::Csv => {
                let mut lines = vec!["product_id,name,price,category,in_stock,added_at".to_string()];
                for item in items {
                    lines.push(format!(
                        "{},{},{},{},{},{}",
                        item.product_id,
                        Self::csv_escape(&item.name),
                        item.price,
                        Self::csv_escape(&item.category),
                        item.in_stock,
                        item.added_at.to_rfc3339()
                    ));
                }
                lines.join("\n")
            }
            _ => {
                let markdown = self.format == OutputFormat::Markdown;
                let mut lines = Vec::new();
                for item in items {
                    let stock = if item.in_stock { "" } else { " (out of stock)" };
                    let added = item.added_at.format("%Y-%m-%d");
                    if markdown {
                        lines.push(format!("- **{}** {:.2}{} _added {}_", item.name, item.price, stock, added));
                    } else {
                        lines.push(format!("{:<5}  {:<30}  {:>9.2}  added {}{}", item.product_id, Self::truncate(&item.name, 30), item.price, added, stock));
                    }
                }
                lines.push(String::new());
                lines.push(format!("{} saved products", items.len()));
                lines.join("\n")
            }
        }
    }

    /// Side-by-side comparison: one column per product.
    pub fn format_comparison(&self, comparison: &Comparison) -> String {
        let items = comparison.items();
        if self.format == OutputFormat::Json {
            return Self::json(items, "[]");
        }
        if items.is_empty() {
            return match self.format {
                OutputFormat::Csv => "attribute".to_string(),
                _ => "Nothing to compare.".to_string(),
            };
        }

        let rows: Vec<(&str, Vec<String>)> = vec![
            ("Product", items.iter().map(|i| i.name.clone()).collect()),
            ("Price", items.iter().map(|i| format!("{:.2}", i.price)).collect()),
            (
                "Rating",
                items.iter().map(|i| format!("{:.1} ({})", i.rating.average, i.rating.count)).collect(),
            ),
            ("Brand", items.iter().map(|i| i.brand.clone().unwrap_or_else(|| "-".into())).collect()),
            ("Category", items.iter().map(|i| i.category.clone()).collect()),
            ("Colors", items.iter().map(|i| Self::or_dash(&i.colors.join(", ")).to_string()).collect()),
            ("Sizes", items.iter().map(|i| Self::or_dash(&i.sizes.join(", ")).to_string()).collect()),
            ("In stock", items.iter().map(|i| if i.in_stock { "Yes" } else { "No" }.to_string()).collect()),
        ];

        match self.format {
            OutputFormat::Csv => {
                let mut lines = Vec::new();
                for (label, values) in &rows {
                    let cells: Vec<String> = values.iter().map(|v| Self::csv_escape(v)).collect();
                    lines.push(format!("{},{}", label.to_lowercase().replace(' ', "_"), cells.join(",")));
                }
                lines.join("\n")
            }
            OutputFormat::Markdown => {
                let mut lines = Vec::new();
                for (n, (label, values)) in rows.iter().enumerate() {
                    lines.push(format!("| {} | {} |", label, values.join(" | ")));
                    if n == 0 {
                        lines.push(format!("|---|{}", "---|".repeat(values.len())));
                    }
                }
                lines.join("\n")
            }
            _ => {
                let width = 22;
                let mut lines = Vec::new();
                for (label, values) in &rows {
                    let cells: Vec<String> =
                        values.iter().map(|v| format!("{:<width$}", Self::truncate(v, width))).collect();
                    lines.push(format!("{:<10}  {}", label, cells.join("  ")).trim_end().to_string());
                }
                if let (Some(cheapest), Some(best)) = (comparison.cheapest(), comparison.best_rated()) {
                    lines.push(String::new());
                    lines.push(format!("Cheapest: {}   Best rated: {}", cheapest.name, best.name));
                }
                lines.join("\n")
            }
        }
    }

    /// Rating summary followed by individual reviews.
    pub fn format_reviews(&self, product_id: &str, summary: &RatingSummary, reviews: &[&Review]) -> String {
        match self.format {
            OutputFormat::Json => Self::json(
                &json!({ "productId": product_id, "rating": summary, "reviews": reviews }),
                "{}",
            ),
            OutputFormat::Csv => {
                let mut lines = vec!["id,user_id,rating,date,helpful,not_helpful,comment".to_string()];
                for r in reviews {
                    lines.push(format!(
                        "{},{},{},{},{},{},{}",
                        r.id,
                        Self::csv_escape(&r.user_id),
                        r.rating,
                        r.date.to_rfc3339(),
                        r.helpful,
                        r.not_helpful,
                        Self::csv_escape(&r.comment)
                    ));
                }
                lines.join("\n")
            }
            _ => {
                let markdown = self.format == OutputFormat::Markdown;
                let mut lines = vec![if markdown {
                    format!("## Product {}: {:.1}/5 ({} reviews)", product_id, summary.average, summary.count)
                } else {
                    format!("Product {}: {:.1}/5 ({} reviews)", product_id, summary.average, summary.count)
                }];
                for r in reviews {
                    lines.push(String::new());
                    let stars = format!("{}{}", "*".repeat(r.rating as usize), ".".repeat(5usize.saturating_sub(r.rating as usize)));
                    let header = format!("#{} {} by {} on {}", r.id, stars, Self::or_dash(&r.user_id), r.date.format("%Y-%m-%d"));
                    lines.push(if markdown { format!("**{}**", header) } else { header });
                    lines.push(format!("  {}", r.comment));
                    lines.push(format!("  helpful: {}  not helpful: {}", r.helpful, r.not_helpful));
                }
                lines.join("\n")
            }
        }
    }

    // Products

    fn table_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("ID:       {}", product.id));
        lines.push(format!("Name:     {}", product.name));
        if let Some(brand) = &product.brand {
            lines.push(format!("Brand:    {}", brand));
        }
        lines.push(format!("Category: {}", Self::category_path(product)));

        let price = match (product.original_price, product.discount_percent()) {
            (Some(orig), Some(pct)) => format!("{:.2} (was {:.2}, -{}%)", product.price, orig, pct),
            _ => format!("{:.2}", product.price),
        };
        lines.push(format!("Price:    {}", price));
        lines.push(format!("Rating:   {:.1}/5 ({} reviews)", product.rating.average, product.rating.count));

        if !product.sizes.is_empty() {
            lines.push(format!("Sizes:    {}", product.sizes.join(", ")));
        }
        if !product.colors.is_empty() {
            lines.push(format!("Colors:   {}", product.colors.join(", ")));
        }
        lines.push(format!(
            "Stock:    {}",
            if product.in_stock { "In Stock" } else { "Out of Stock" }
        ));
        if !product.description.is_empty() {
            lines.push(String::new());
            lines.push(product.description.clone());
        }

        lines.join("\n")
    }

    fn table_products(&self, products: &[Product]) -> String {
        let id_width = 5;
        let price_width = 10;
        let rating_width = 6;
        let stock_width = 5;
        let name_width = 40;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<id_width$}  {:>price_width$}  {:>rating_width$}  {:<stock_width$}  {}",
            "ID", "Price", "Rating", "Stock", "Name"
        ));
        lines.push(format!(
            "{:-<id_width$}  {:-<price_width$}  {:-<rating_width$}  {:-<stock_width$}  {:-<name_width$}",
            "", "", "", "", ""
        ));

        for product in products {
            let price = if product.is_on_sale() {
                format!("*{:.2}", product.price)
            } else {
                format!("{:.2}", product.price)
            };
            let stock = if product.in_stock { "Yes" } else { "No" };

            lines.push(format!(
                "{:<id_width$}  {:>price_width$}  {:>rating_width$.1}  {:<stock_width$}  {}",
                product.id,
                price,
                product.rating.average,
                stock,
                Self::truncate(&product.name, name_width)
            ));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", products.len()));

        lines.join("\n")
    }

    fn markdown_single(&self, product: &Product) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", product.name));
        lines.push(String::new());

        lines.push(format!("- **ID:** {}", product.id));
        if let Some(brand) = &product.brand {
            lines.push(format!("- **Brand:** {}", brand));
        }
        lines.push(format!("- **Category:** {}", Self::category_path(product)));

        match product.original_price {
            Some(orig) if product.is_on_sale() => {
                lines.push(format!("- **Price:** {:.2} ~~{:.2}~~", product.price, orig))
            }
            _ => lines.push(format!("- **Price:** {:.2}", product.price)),
        }
        lines.push(format!(
            "- **Rating:** {:.1}/5 ({} reviews)",
            product.rating.average, product.rating.count
        ));
        if !product.in_stock {
            lines.push("- **Out of stock**".to_string());
        }

        lines.join("\n")
    }

    fn markdown_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();

        lines.push("| ID | Price | Rating | Stock | Name |".to_string());
        lines.push("|----|-------|--------|-------|------|".to_string());

        for product in products {
            let price = if product.is_on_sale() {
                format!("**{:.2}**", product.price)
            } else {
                format!("{:.2}", product.price)
            };
            let stock = if product.in_stock { "✓" } else { "" };

            lines.push(format!(
                "| {} | {} | {:.1} | {} | {} |",
                product.id,
                price,
                product.rating.average,
                stock,
                Self::truncate(&product.name, 40)
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products found*", products.len()));

        lines.join("\n")
    }

    fn csv_header() -> &'static str {
        "id,name,category,brand,price,original_price,rating,reviews,in_stock,on_sale"
    }

    fn csv_products(&self, products: &[Product]) -> String {
        let mut lines = Vec::new();
        lines.push(Self::csv_header().to_string());

        for product in products {
            lines.push(format!(
                "{},{},{},{},{},{},{},{},{},{}",
                product.id,
                Self::csv_escape(&product.name),
                Self::csv_escape(&product.category),
                product.brand.as_deref().map(Self::csv_escape).unwrap_or_default(),
                product.price,
                product.original_price.map(|p| p.to_string()).unwrap_or_default(),
                product.rating.average,
                product.rating.count,
                product.in_stock,
                product.is_on_sale()
            ));
        }

        lines.join("\n")
    }

    // Helpers

    fn json<T: Serialize + ?Sized>(value: &T, fallback: &str) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| fallback.to_string())
    }

    fn category_path(product: &Product) -> String {
        if product.subcategory.is_empty() {
            product.category.clone()
        } else {
            format!("{} / {}", product.category, product.subcategory)
        }
    }

    fn or_dash(s: &str) -> &str {
        if s.is_empty() {
            "-"
        } else {
            s
        }
    }

    fn truncate(s: &str, max: usize) -> String {
        if s.chars().count() > max {
            let head: String = s.chars().take(max.saturating_sub(3)).collect();
            format!("{}...", head)
        } else {
            s.to_string()
        }
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}
