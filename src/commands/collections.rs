//! Cart, wishlist and comparison commands.

use super::{open_catalog, open_storage};
use crate::catalog::{CatalogService, LocalCatalog, Product};
use crate::collections::{Cart, CartKey, Comparison, Store, Wishlist, MAX_COMPARISON_ITEMS};
use crate::config::Config;
use crate::format::Formatter;
use crate::storage::Storage;
use anyhow::{Context, Result};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub enum CartOp {
    Add { id: u64, size: String, color: String, quantity: u32 },
    Remove { id: u64, size: String, color: String },
    Update { id: u64, size: String, color: String, quantity: i64 },
    Clear,
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WishlistOp {
    Add(u64),
    Remove(u64),
    Toggle(u64),
    Clear,
    Show,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CompareOp {
    Add(u64),
    Remove(u64),
    /// Zero-based positions.
    Reorder { from: usize, to: usize },
    Clear,
    Show,
}

/// Mutates and shows the shopper's collections.
pub struct CollectionCommand<C> {
    config: Config,
    catalog: C,
    storage: Storage,
}

impl CollectionCommand<LocalCatalog> {
    pub fn new(config: Config) -> Result<Self> {
        let catalog = open_catalog(&config)?;
        let storage = open_storage(&config);
        Ok(Self::with_catalog(config, catalog, storage))
    }
}

impl<C: CatalogService> CollectionCommand<C> {
    /// Creates the command with a provided catalog and storage (for testing).
    pub fn with_catalog(config: Config, catalog: C, storage: Storage) -> Self {
        Self { config, catalog, storage }
    }

    fn formatter(&self) -> Formatter {
        Formatter::new(self.config.format)
    }

    async fn product(&self, id: u64) -> Result<Product> {
        self.catalog
            .get_product_by_id(id)
            .await
            .with_context(|| format!("Failed to look up product {}", id))
    }

    fn cart_store(&self) -> Store<Cart> {
        if self.config.persist_cart {
            Store::hydrate(self.storage.clone())
        } else {
            Store::in_memory()
        }
    }

    pub async fn cart(&self, op: CartOp) -> Result<String> {
        let mut cart = self.cart_store();

        let message = match op {
            CartOp::Add { id, size, color, quantity } => {
                let product = self.product(id).await?;
                if !product.in_stock {
                    anyhow::bail!("'{}' is out of stock", product.name);
                }
                let size = resolve_option("size", &size, &product.sizes, &product.name)?;
                let color = resolve_option("color", &color, &product.colors, &product.name)?;

                cart.add(&product, &size, &color, quantity);
                info!("Added {} x {} to cart", quantity.max(1), product.name);
                format!("Added '{}' to cart. Cart total: {:.2}", product.name, cart.total())
            }
            CartOp::Remove { id, size, color } => {
                cart.remove(CartKey::new(id, size, color));
                format!("Removed product {} from cart.", id)
            }
            CartOp::Update { id, size, color, quantity } => {
                let key = CartKey::new(id, size, color);
                if cart.state().get(&key).is_none() {
                    anyhow::bail!("Product {} with that size and color is not in the cart", id);
                }
                cart.update_quantity(key, quantity);
                format!("Updated product {}. Cart total: {:.2}", id, cart.total())
            }
            CartOp::Clear => {
                cart.clear();
                "Cart cleared.".to_string()
            }
            CartOp::Show => return Ok(self.formatter().format_cart(cart.state())),
        };

        if cart.is_persistent() {
            Ok(message)
        } else {
            Ok(format!("{}\nNote: the cart is kept in memory only; set persist_cart = true to keep it.", message))
        }
    }

    pub async fn wishlist(&self, op: WishlistOp) -> Result<String> {
        let mut wishlist: Store<Wishlist> = Store::hydrate(self.storage.clone());

        match op {
            WishlistOp::Add(id) => {
                let product = self.product(id).await?;
                if wishlist.add(&product) {
                    Ok(format!("Saved '{}' to wishlist.", product.name))
                } else {
                    Ok(format!("'{}' is already in the wishlist.", product.name))
                }
            }
            WishlistOp::Remove(id) => {
                wishlist.remove(id);
                Ok(format!("Removed product {} from wishlist.", id))
            }
            WishlistOp::Toggle(id) => {
                let product = self.product(id).await?;
                if wishlist.toggle(&product) {
                    Ok(format!("Saved '{}' to wishlist.", product.name))
                } else {
                    Ok(format!("Removed '{}' from wishlist.", product.name))
                }
            }
            WishlistOp::Clear => {
                wishlist.clear();
                Ok("Wishlist cleared.".to_string())
            }
            WishlistOp::Show => Ok(self.formatter().format_wishlist(wishlist.state())),
        }
    }

    pub async fn compare(&self, op: CompareOp) -> Result<String> {
        let mut comparison: Store<Comparison> = Store::hydrate(self.storage.clone());

        match op {
            CompareOp::Add(id) => {
                let product = self.product(id).await?;
                let evicting = (!comparison.can_add_more() && !comparison.contains(id))
                    .then(|| comparison.items()[0].name.clone());

                if !comparison.add(&product) {
                    return Ok(format!("'{}' is already being compared.", product.name));
                }
                match evicting {
                    Some(name) => Ok(format!(
                        "Added '{}' to comparison, replacing '{}' (limit {}).",
                        product.name, name, MAX_COMPARISON_ITEMS
                    )),
                    None => Ok(format!(
                        "Added '{}' to comparison ({}/{}).",
                        product.name,
                        comparison.count(),
                        MAX_COMPARISON_ITEMS
                    )),
                }
            }
            CompareOp::Remove(id) => {
                comparison.remove(id);
                Ok(format!("Removed product {} from comparison.", id))
            }
            CompareOp::Reorder { from, to } => {
                comparison.reorder(from, to)?;
                Ok(self.formatter().format_comparison(comparison.state()))
            }
            CompareOp::Clear => {
                comparison.clear();
                Ok("Comparison cleared.".to_string())
            }
            CompareOp::Show => Ok(self.formatter().format_comparison(comparison.state())),
        }
    }
}

/// Maps a size or color to the product's spelling of it. Empty means unspecified.
fn resolve_option(label: &str, value: &str, offered: &[String], product: &str) -> Result<String> {
    if value.is_empty() || offered.is_empty() {
        return Ok(value.to_string());
    }
    if let Some(option) = offered.iter().find(|o| o.eq_ignore_ascii_case(value)) {
        return Ok(option.clone());
    }
    anyhow::bail!("'{}' is not offered in {} '{}' (available: {})", product, label, value, offered.join(", "))
}
