//! Wishlist: saved products, one entry per product.

use super::{Collection, Effect, Store, Transition};
use crate::catalog::Product;
use crate::storage::keys;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistItem {
    pub product_id: u64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub in_stock: bool,
    pub added_at: DateTime<Utc>,
}

impl WishlistItem {
    /// Snapshot of a product, stamped with the current time.
    pub fn from_product(product: &Product) -> Self {
        Self::from_product_at(product, Utc::now())
    }

    pub fn from_product_at(product: &Product, added_at: DateTime<Utc>) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            price: product.price,
            original_price: product.original_price,
            category: product.category.clone(),
            image: product.image.clone(),
            in_stock: product.in_stock,
            added_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WishlistAction {
    Load(Vec<WishlistItem>),
    /// Adding a product already present is a no-op.
    Add(WishlistItem),
    Remove(u64),
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn contains(&self, product_id: u64) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Collection for Wishlist {
    type Item = WishlistItem;
    type Action = WishlistAction;

    const STORAGE_KEY: &'static str = keys::WISHLIST;

    fn load_action(items: Vec<WishlistItem>) -> WishlistAction {
        WishlistAction::Load(items)
    }

    fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    fn reduce(mut self, action: WishlistAction) -> Transition<Self> {
        match action {
            WishlistAction::Load(items) => {
                let mut wishlist = Wishlist::default();
                for item in items {
                    if !wishlist.contains(item.product_id) {
                        wishlist.items.push(item);
                    }
                }
                Transition::load(wishlist)
            }
            WishlistAction::Add(item) => {
                let added = !self.contains(item.product_id);
                if added {
                    self.items.push(item);
                }
                Transition::added(self, added)
            }
            WishlistAction::Remove(product_id) => {
                self.items.retain(|i| i.product_id != product_id);
                Transition::save(self)
            }
            WishlistAction::Clear => Transition {
                state: Wishlist::default(),
                effect: Effect::Delete,
                added: false,
            },
        }
    }
}

impl Store<Wishlist> {
    pub fn add(&mut self, product: &Product) -> bool {
        self.dispatch(WishlistAction::Add(WishlistItem::from_product(product)))
    }

    pub fn remove(&mut self, product_id: u64) {
        self.dispatch(WishlistAction::Remove(product_id));
    }

    /// Adds the product if absent, removes it otherwise. Returns true if now saved.
    pub fn toggle(&mut self, product: &Product) -> bool {
        if self.contains(product.id) {
            self.remove(product.id);
            false
        } else {
            self.add(product)
        }
    }

    pub fn clear(&mut self) {
        self.dispatch(WishlistAction::Clear);
    }

    pub fn count(&self) -> usize {
        self.state().count()
    }

    pub fn contains(&self, product_id: u64) -> bool {
        self.state().contains(product_id)
    }
}
