//! Shopping cart: line items keyed by product, size and color.

use super::{Collection, Store, Transition};
use crate::catalog::Product;
use crate::storage::keys;
use serde::{Deserialize, Serialize};

/// Identifies a cart line. The same product in another size or color is a separate line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartKey {
    pub product_id: u64,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub color: String,
}

impl CartKey {
    pub fn new(product_id: u64, size: impl Into<String>, color: impl Into<String>) -> Self {
        Self { product_id, size: size.into(), color: color.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: u64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub color: String,
    pub quantity: u32,
}

impl CartItem {
    /// Snapshot of a product as a cart line. A zero quantity is treated as one.
    pub fn from_product(
        product: &Product,
        size: impl Into<String>,
        color: impl Into<String>,
        quantity: u32,
    ) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            size: size.into(),
            color: color.into(),
            quantity: quantity.max(1),
        }
    }

    pub fn key(&self) -> CartKey {
        CartKey::new(self.product_id, self.size.clone(), self.color.clone())
    }

    fn matches(&self, key: &CartKey) -> bool {
        self.product_id == key.product_id && self.size == key.size && self.color == key.color
    }

    /// Price times quantity; invalid prices count as zero.
    pub fn line_total(&self) -> f64 {
        let price = if self.price.is_finite() && self.price > 0.0 { self.price } else { 0.0 };
        price * self.quantity as f64
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    Load(Vec<CartItem>),
    Add(CartItem),
    Remove(CartKey),
    /// Sets a line's quantity; zero or less removes the line.
    UpdateQuantity(CartKey, i64),
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Sum of quantities.
    pub fn count(&self) -> u64 {
        self.items.iter().map(|i| i.quantity as u64).sum()
    }

    /// Sum of line totals. Never NaN.
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// True if any line holds this product.
    pub fn contains(&self, product_id: u64) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }

    pub fn get(&self, key: &CartKey) -> Option<&CartItem> {
        self.items.iter().find(|i| i.matches(key))
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Collection for Cart {
    type Item = CartItem;
    type Action = CartAction;

    const STORAGE_KEY: &'static str = keys::CART;

    fn load_action(items: Vec<CartItem>) -> CartAction {
        CartAction::Load(items)
    }

    fn items(&self) -> &[CartItem] {
        &self.items
    }

    fn reduce(mut self, action: CartAction) -> Transition<Self> {
        match action {
            CartAction::Load(items) => {
                let mut cart = Cart::default();
                for item in items {
                    cart.merge(item);
                }
                Transition::load(cart)
            }
            CartAction::Add(item) => {
                let added = self.merge(item);
                Transition::added(self, added)
            }
            CartAction::Remove(key) => {
                self.items.retain(|i| !i.matches(&key));
                Transition::save(self)
            }
            CartAction::UpdateQuantity(key, quantity) => {
                if quantity <= 0 {
                    self.items.retain(|i| !i.matches(&key));
                } else if let Some(item) = self.items.iter_mut().find(|i| i.matches(&key)) {
                    item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
                }
                Transition::save(self)
            }
            // An emptied cart is written as an empty list, not deleted.
            CartAction::Clear => Transition::save(Cart::default()),
        }
    }
}

impl Cart {
    /// Adds to an existing line or appends. Returns true when a new line was created.
    fn merge(&mut self, item: CartItem) -> bool {
        let key = item.key();
        match self.items.iter_mut().find(|i| i.matches(&key)) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(item.quantity);
                false
            }
            None => {
                self.items.push(item);
                true
            }
        }
    }
}

impl Store<Cart> {
    pub fn add(&mut self, product: &Product, size: &str, color: &str, quantity: u32) -> bool {
        self.dispatch(CartAction::Add(CartItem::from_product(product, size, color, quantity)))
    }

    pub fn remove(&mut self, key: CartKey) {
        self.dispatch(CartAction::Remove(key));
    }

    pub fn update_quantity(&mut self, key: CartKey, quantity: i64) {
        self.dispatch(CartAction::UpdateQuantity(key, quantity));
    }

    pub fn clear(&mut self) {
        self.dispatch(CartAction::Clear);
    }

    pub fn count(&self) -> u64 {
        self.state().count()
    }

    pub fn total(&self) -> f64 {
        self.state().total()
    }

    pub fn contains(&self, product_id: u64) -> bool {
        self.state().contains(product_id)
    }
}
