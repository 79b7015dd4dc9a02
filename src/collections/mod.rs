//! Cart, wishlist and comparison state.
//!
//! Each collection is a pure transition function over an owned state value.
//! [`Store`] wraps a collection with its persistence side effect: it applies
//! the transition, then writes (or deletes) the collection's storage key.

pub mod cart;
pub mod comparison;
pub mod wishlist;

pub use cart::{Cart, CartAction, CartItem, CartKey};
pub use comparison::{Comparison, ComparisonAction, ComparisonItem, MAX_COMPARISON_ITEMS};
pub use wishlist::{Wishlist, WishlistAction, WishlistItem};

use crate::storage::Storage;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// What the store must do with persisted state after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing to write (hydration).
    None,
    /// Overwrite the key with the resulting items.
    Save,
    /// Delete the key.
    Delete,
}

/// Result of applying one action.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    pub state: S,
    pub effect: Effect,
    /// True when an add inserted a new entry.
    pub added: bool,
}

impl<S> Transition<S> {
    pub fn load(state: S) -> Self {
        Self { state, effect: Effect::None, added: false }
    }

    pub fn save(state: S) -> Self {
        Self { state, effect: Effect::Save, added: false }
    }

    pub fn added(state: S, added: bool) -> Self {
        Self { state, effect: Effect::Save, added }
    }
}

/// An ordered, deduplicated collection with a pure transition function.
pub trait Collection: Default + Sized {
    type Item: Clone + Serialize + DeserializeOwned;
    type Action;

    /// Storage key for this collection.
    const STORAGE_KEY: &'static str;

    /// Action that replaces the items wholesale.
    fn load_action(items: Vec<Self::Item>) -> Self::Action;

    fn items(&self) -> &[Self::Item];

    /// Applies an action, returning the next state.
    fn reduce(self, action: Self::Action) -> Transition<Self>;
}

/// A collection plus its persistence side effect.
#[derive(Debug)]
pub struct Store<C> {
    state: C,
    storage: Option<Storage>,
}

impl<C: Collection> Store<C> {
    /// A store that never touches storage.
    pub fn in_memory() -> Self {
        Self { state: C::default(), storage: None }
    }

    /// A store backed by `storage`, hydrated from the collection's key.
    /// Missing or corrupt data starts the collection empty.
    pub fn hydrate(storage: Storage) -> Self {
        let items: Vec<C::Item> = storage.load_or_default(C::STORAGE_KEY);
        debug!("Hydrated '{}' with {} items", C::STORAGE_KEY, items.len());

        let state = C::default().reduce(C::load_action(items)).state;
        Self { state, storage: Some(storage) }
    }

    pub fn state(&self) -> &C {
        &self.state
    }

    pub fn items(&self) -> &[C::Item] {
        self.state.items()
    }

    pub fn is_persistent(&self) -> bool {
        self.storage.is_some()
    }

    /// Applies `action` and persists the outcome. Returns the transition's `added` flag.
    pub fn dispatch(&mut self, action: C::Action) -> bool {
        let transition = std::mem::take(&mut self.state).reduce(action);
        self.state = transition.state;

        if let Some(storage) = &self.storage {
            match transition.effect {
                Effect::None => {}
                Effect::Save => storage.save(C::STORAGE_KEY, self.state.items()),
                Effect::Delete => storage.remove(C::STORAGE_KEY),
            }
        }

        transition.added
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::catalog::{Product, Rating};

    pub fn product(id: u64) -> Product {
        Product {
            id,
            name: format!("Product {}", id),
            description: String::new(),
            category: "misc".to_string(),
            subcategory: String::new(),
            price: 10.0 * id as f64,
            original_price: None,
            rating: Rating::new(4.0, 10),
            tags: Vec::new(),
            colors: vec!["Red".to_string(), "Blue".to_string()],
            sizes: vec!["M".to_string(), "L".to_string()],
            in_stock: true,
            brand: Some("Acme".to_string()),
            image: None,
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::keys;
    use test_support::product;

    #[test]
    fn test_in_memory_store_is_not_persistent() {
        let mut store: Store<Wishlist> = Store::in_memory();
        assert!(!store.is_persistent());
        store.dispatch(WishlistAction::Add(WishlistItem::from_product(&product(1))));
        assert_eq!(store.items().len(), 1);
    }

    #[test]
    fn test_hydrate_missing_key_is_empty() {
        let store: Store<Comparison> = Store::hydrate(Storage::memory());
        assert!(store.items().is_empty());
        assert!(store.is_persistent());
    }

    #[test]
    fn test_hydrate_corrupt_key_is_empty() {
        let storage = Storage::memory();
        storage.save(keys::WISHLIST, &serde_json::json!({"broken": true}));
        let store: Store<Wishlist> = Store::hydrate(storage);
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_mutations_persist_and_hydrate_back() {
        let storage = Storage::memory();
        let mut store: Store<Wishlist> = Store::hydrate(storage.clone());
        store.dispatch(WishlistAction::Add(WishlistItem::from_product(&product(1))));
        store.dispatch(WishlistAction::Add(WishlistItem::from_product(&product(2))));
        store.dispatch(WishlistAction::Remove(1));

        let reloaded: Store<Wishlist> = Store::hydrate(storage);
        let ids: Vec<u64> = reloaded.items().iter().map(|i| i.product_id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_load_does_not_persist() {
        let storage = Storage::memory();
        let mut store: Store<Wishlist> = Store::hydrate(storage.clone());
        store.dispatch(WishlistAction::Load(vec![WishlistItem::from_product(&product(3))]));

        assert_eq!(store.items().len(), 1);
        assert!(storage.load_value(keys::WISHLIST).is_none());
    }
}
