//! Built-in product catalog.

use super::models::{Product, Rating};
use chrono::{TimeZone, Utc};

struct Seed {
    id: u64,
    name: &'static str,
    description: &'static str,
    category: &'static str,
    subcategory: &'static str,
    price: f64,
    original_price: Option<f64>,
    rating: (f32, u32),
    tags: &'static [&'static str],
    colors: &'static [&'static str],
    sizes: &'static [&'static str],
    in_stock: bool,
    brand: Option<&'static str>,
    added: (i32, u32, u32),
}

const SEEDS: &[Seed] = &[
    Seed {
        id: 1,
        name: "Classic Cotton T-Shirt",
        description: "Soft breathable cotton tee with a relaxed fit",
        category: "clothing",
        subcategory: "tops",
        price: 24.99,
        original_price: Some(34.99),
        rating: (4.5, 128),
        tags: &["cotton", "casual", "basics"],
        colors: &["White", "Black", "Navy", "Red"],
        sizes: &["S", "M", "L", "XL"],
        in_stock: true,
        brand: Some("Northline"),
        added: (2024, 1, 15),
    },
    Seed {
        id: 2,
        name: "Slim Fit Denim Jeans",
        description: "Stretch denim with a tapered leg",
        category: "clothing",
        subcategory: "bottoms",
        price: 59.99,
        original_price: None,
        rating: (4.2, 86),
        tags: &["denim", "casual"],
        colors: &["Blue", "Black"],
        sizes: &["28", "30", "32", "34", "36"],
        in_stock: true,
        brand: Some("Northline"),
        added: (2023, 11, 2),
    },
    Seed {
        id: 3,
        name: "Wool Blend Overcoat",
        description: "Tailored winter coat in a warm wool blend",
        category: "clothing",
        subcategory: "outerwear",
        price: 189.0,
        original_price: Some(240.0),
        rating: (4.7, 41),
        tags: &["winter", "formal", "wool"],
        colors: &["Camel", "Charcoal"],
        sizes: &["S", "M", "L"],
        in_stock: false,
        brand: Some("Atelier Vale"),
        added: (2024, 9, 20),
    },
    Seed {
        id: 4,
        name: "Red Running Shoe",
        description: "Cushioned road running shoe with breathable mesh upper",
        category: "shoes",
        subcategory: "running",
        price: 119.99,
        original_price: Some(139.99),
        rating: (4.6, 212),
        tags: &["running", "sport", "mesh"],
        colors: &["Red", "Black"],
        sizes: &["8", "9", "10", "11"],
        in_stock: true,
        brand: Some("Stride"),
        added: (2024, 5, 5),
    },
    Seed {
        id: 5,
        name: "Leather Chelsea Boot",
        description: "Full grain leather boot with elastic side panels",
        category: "shoes",
        subcategory: "boots",
        price: 164.5,
        original_price: None,
        rating: (4.4, 67),
        tags: &["leather", "boots"],
        colors: &["Brown", "Black"],
        sizes: &["8", "9", "10", "11", "12"],
        in_stock: true,
        brand: Some("Atelier Vale"),
        added: (2023, 8, 30),
    },
    Seed {
        id: 6,
        name: "Canvas Low-Top Sneaker",
        description: "Everyday canvas shoe with vulcanized rubber sole",
        category: "shoes",
        subcategory: "sneakers",
        price: 49.0,
        original_price: Some(49.0),
        rating: (3.9, 154),
        tags: &["canvas", "casual"],
        colors: &["White", "Navy", "Red"],
        sizes: &["7", "8", "9", "10"],
        in_stock: true,
        brand: Some("Stride"),
        added: (2022, 4, 12),
    },
    Seed {
        id: 7,
        name: "Wireless Noise-Cancelling Headphones",
        description: "Over-ear headphones with active noise cancellation and 30h battery",
        category: "electronics",
        subcategory: "audio",
        price: 249.0,
        original_price: Some(299.0),
        rating: (4.8, 530),
        tags: &["wireless", "bluetooth", "audio"],
        colors: &["Black", "Silver"],
        sizes: &[],
        in_stock: true,
        brand: Some("Sonique"),
        added: (2024, 10, 1),
    },
    Seed {
        id: 8,
        name: "Smart Fitness Watch",
        description: "Heart rate, GPS and sleep tracking in a slim case",
        category: "electronics",
        subcategory: "wearables",
        price: 199.99,
        original_price: None,
        rating: (4.1, 302),
        tags: &["fitness", "gps", "sport"],
        colors: &["Black", "Rose", "Silver"],
        sizes: &["S", "L"],
        in_stock: true,
        brand: Some("Pulsefit"),
        added: (2024, 3, 18),
    },
    Seed {
        id: 9,
        name: "Portable Bluetooth Speaker",
        description: "Waterproof speaker with 360 degree sound",
        category: "electronics",
        subcategory: "audio",
        price: 79.95,
        original_price: Some(99.95),
        rating: (4.3, 188),
        tags: &["bluetooth", "outdoor", "audio"],
        colors: &["Blue", "Red", "Black"],
        sizes: &[],
        in_stock: false,
        brand: Some("Sonique"),
        added: (2023, 6, 21),
    },
    Seed {
        id: 10,
        name: "Ceramic Pour-Over Coffee Set",
        description: "Dripper, carafe and two cups in glazed ceramic",
        category: "home",
        subcategory: "kitchen",
        price: 42.0,
        original_price: None,
        rating: (4.9, 37),
        tags: &["coffee", "ceramic", "gift"],
        colors: &["White", "Sage"],
        sizes: &[],
        in_stock: true,
        brand: None,
        added: (2024, 7, 9),
    },
    Seed {
        id: 11,
        name: "Linen Throw Blanket",
        description: "Stonewashed linen throw for sofa or bed",
        category: "home",
        subcategory: "textiles",
        price: 68.0,
        original_price: Some(85.0),
        rating: (4.0, 22),
        tags: &["linen", "bedroom"],
        colors: &["Oat", "Terracotta"],
        sizes: &[],
        in_stock: true,
        brand: Some("Hearth & Loom"),
        added: (2023, 12, 1),
    },
    Seed {
        id: 12,
        name: "Trail Hiking Backpack",
        description: "28L daypack with rain cover and hydration sleeve",
        category: "accessories",
        subcategory: "bags",
        price: 89.0,
        original_price: None,
        rating: (4.5, 95),
        tags: &["outdoor", "hiking", "travel"],
        colors: &["Green", "Black", "Red"],
        sizes: &[],
        in_stock: true,
        brand: Some("Summit Gear"),
        added: (2024, 2, 14),
    },
];

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Builds the seed product list in catalog order.
pub fn products() -> Vec<Product> {
    SEEDS
        .iter()
        .map(|s| Product {
            id: s.id,
            name: s.name.to_string(),
            description: s.description.to_string(),
            category: s.category.to_string(),
            subcategory: s.subcategory.to_string(),
            price: s.price,
            original_price: s.original_price,
            rating: Rating::new(s.rating.0, s.rating.1),
            tags: strings(s.tags),
            colors: strings(s.colors),
            sizes: strings(s.sizes),
            in_stock: s.in_stock,
            brand: s.brand.map(str::to_string),
            image: Some(format!("/images/products/{}.jpg", s.id)),
            created_at: Utc.with_ymd_and_hms(s.added.0, s.added.1, s.added.2, 0, 0, 0).single(),
        })
        .collect()
}
