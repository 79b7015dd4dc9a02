//! Product comparison: at most four products, oldest evicted first.

use super::{Collection, Effect, Store, Transition};
use crate::catalog::{Product, Rating};
use crate::error::{StoreError, StoreResult};
use crate::storage::keys;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Maximum number of products compared at once.
pub const MAX_COMPARISON_ITEMS: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonItem {
    pub product_id: u64,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub rating: Rating,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub in_stock: bool,
    pub added_at: DateTime<Utc>,
}

impl ComparisonItem {
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
            brand: product.brand.clone(),
            rating: product.rating,
            colors: product.colors.clone(),
            sizes: product.sizes.clone(),
            in_stock: product.in_stock,
            added_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonAction {
    Load(Vec<ComparisonItem>),
    /// Adds a product; a full list drops its first item to make room.
    Add(ComparisonItem),
    Remove(u64),
    /// Moves the item at `from` to `to`. Out-of-bounds indices are ignored.
    Reorder { from: usize, to: usize },
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Comparison {
    items: Vec<ComparisonItem>,
}

impl Comparison {
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn contains(&self, product_id: u64) -> bool {
        self.items.iter().any(|i| i.product_id == product_id)
    }

    pub fn can_add_more(&self) -> bool {
        self.items.len() < MAX_COMPARISON_ITEMS
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lowest price among compared items.
    pub fn cheapest(&self) -> Option<&ComparisonItem> {
        self.items.iter().min_by(|a, b| a.price.total_cmp(&b.price))
    }

    /// Highest rated item.
    pub fn best_rated(&self) -> Option<&ComparisonItem> {
        self.items.iter().max_by(|a, b| a.rating.average.total_cmp(&b.rating.average))
    }

    fn push_bounded(&mut self, item: ComparisonItem) {
        if self.items.len() >= MAX_COMPARISON_ITEMS {
            let evicted = self.items.remove(0);
            debug!("Comparison full, evicting product {}", evicted.product_id);
        }
        self.items.push(item);
    }
}

impl Collection for Comparison {
    type Item = ComparisonItem;
    type Action = ComparisonAction;

    const STORAGE_KEY: &'static str = keys::COMPARISON;

    fn load_action(items: Vec<ComparisonItem>) -> ComparisonAction {
        ComparisonAction::Load(items)
    }

    fn items(&self) -> &[ComparisonItem] {
        &self.items
    }

    fn reduce(mut self, action: ComparisonAction) -> Transition<Self> {
        match action {
            ComparisonAction::Load(items) => {
                let mut comparison = Comparison::default();
                for item in items {
                    if !comparison.contains(item.product_id) {
                        comparison.push_bounded(item);
                    }
                }
                Transition::load(comparison)
            }
            ComparisonAction::Add(item) => {
                if self.contains(item.product_id) {
                    return Transition::added(self, false);
                }
                self.push_bounded(item);
                Transition::added(self, true)
            }
            ComparisonAction::Remove(product_id) => {
                self.items.retain(|i| i.product_id != product_id);
                Transition::save(self)
            }
            ComparisonAction::Reorder { from, to } => {
                if from < self.items.len() && to < self.items.len() {
                    let item = self.items.remove(from);
                    self.items.insert(to, item);
                }
                Transition::save(self)
            }
            ComparisonAction::Clear => {
                Transition { state: Comparison::default(), effect: Effect::Delete, added: false }
            }
        }
    }
}

impl Store<Comparison> {
    /// Adds a product. Returns false if it was already being compared.
    pub fn add(&mut self, product: &Product) -> bool {
        self.dispatch(ComparisonAction::Add(ComparisonItem::from_product(product)))
    }

    pub fn remove(&mut self, product_id: u64) {
        self.dispatch(ComparisonAction::Remove(product_id));
    }

    /// Reorders, rejecting out-of-bounds indices without mutating.
    pub fn reorder(&mut self, from: usize, to: usize) -> StoreResult<()> {
        let len = self.count();
        if from >= len || to >= len {
            return Err(StoreError::invalid(format!(
                "cannot move position {} to {}: comparison has {} items",
                from, to, len
            )));
        }
        self.dispatch(ComparisonAction::Reorder { from, to });
        Ok(())
    }

    pub fn clear(&mut self) {
        self.dispatch(ComparisonAction::Clear);
    }

    pub fn count(&self) -> usize {
        self.state().count()
    }

    pub fn contains(&self, product_id: u64) -> bool {
        self.state().contains(product_id)
    }

    pub fn can_add_more(&self) -> bool {
        self.state().can_add_more()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::test_support::product;
    use crate::storage::Storage;

    fn add(comparison: Comparison, id: u64) -> Transition<Comparison> {
        comparison.reduce(ComparisonAction::Add(ComparisonItem::from_product(&product(id))))
    }

    fn ids(comparison: &Comparison) -> Vec<u64> {
        comparison.items().iter().map(|i| i.product_id).collect()
    }

    fn filled(n: u64) -> Comparison {
        (1..=n).fold(Comparison::default(), |c, id| add(c, id).state)
    }

    #[test]
    fn test_bound_and_fifo_eviction() {
        let comparison = filled(4);
        assert!(!comparison.can_add_more());

        let t = add(comparison, 5);
        assert!(t.added);
        assert_eq!(t.state.count(), MAX_COMPARISON_ITEMS);
        assert_eq!(ids(&t.state), vec![2, 3, 4, 5]);
        assert!(!t.state.contains(1));
    }

    #[test]
    fn test_bound_holds_for_long_sequences() {
        let mut comparison = Comparison::default();
        for id in 1..=12 {
            comparison = add(comparison, id).state;
            assert!(comparison.count() <= MAX_COMPARISON_ITEMS);
        }
        assert_eq!(ids(&comparison), vec![9, 10, 11, 12]);
    }

    #[test]
    fn test_duplicate_add_is_noop() {
        let comparison = filled(4);
        let t = add(comparison, 2);
        assert!(!t.added);
        assert_eq!(ids(&t.state), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_remove() {
        let comparison = filled(3).reduce(ComparisonAction::Remove(2)).state;
        assert_eq!(ids(&comparison), vec![1, 3]);
        assert!(comparison.can_add_more());

        let comparison = comparison.reduce(ComparisonAction::Remove(99)).state;
        assert_eq!(ids(&comparison), vec![1, 3]);
    }

    #[test]
    fn test_reorder() {
        let comparison = filled(4).reduce(ComparisonAction::Reorder { from: 0, to: 2 }).state;
        assert_eq!(ids(&comparison), vec![2, 3, 1, 4]);

        let comparison = comparison.reduce(ComparisonAction::Reorder { from: 3, to: 0 }).state;
        assert_eq!(ids(&comparison), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_reorder_out_of_bounds_is_noop() {
        let comparison = filled(2);
        let after = comparison.clone().reduce(ComparisonAction::Reorder { from: 0, to: 5 }).state;
        assert_eq!(after, comparison);
        let after = comparison.clone().reduce(ComparisonAction::Reorder { from: 7, to: 0 }).state;
        assert_eq!(after, comparison);
    }

    #[test]
    fn test_load_enforces_bound_and_uniqueness() {
        let items: Vec<_> =
            [1, 2, 2, 3, 4, 5].iter().map(|id| ComparisonItem::from_product(&product(*id))).collect();
        let t = Comparison::default().reduce(ComparisonAction::Load(items));
        assert_eq!(t.effect, Effect::None);
        assert_eq!(ids(&t.state), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_cheapest_and_best_rated() {
        let mut comparison = filled(3);
        comparison.items[1].rating = Rating::new(4.9, 3);
        assert_eq!(comparison.cheapest().map(|i| i.product_id), Some(1));
        assert_eq!(comparison.best_rated().map(|i| i.product_id), Some(2));
        assert!(Comparison::default().cheapest().is_none());
    }

    #[test]
    fn test_store_reorder_checked() {
        let mut store: Store<Comparison> = Store::in_memory();
        store.add(&product(1));
        store.add(&product(2));

        let err = store.reorder(0, 2).unwrap_err();
        assert!(err.to_string().contains("Invalid input"));
        assert_eq!(store.items()[0].product_id, 1);

        store.reorder(1, 0).unwrap();
        assert_eq!(store.items()[0].product_id, 2);
    }

    #[test]
    fn test_store_persists_and_clear_deletes() {
        let storage = Storage::memory();
        let mut store: Store<Comparison> = Store::hydrate(storage.clone());
        for id in 1..=5 {
            store.add(&product(id));
        }
        assert!(!store.add(&product(5)));
        assert!(!store.can_add_more());

        let reloaded: Store<Comparison> = Store::hydrate(storage.clone());
        assert_eq!(reloaded.count(), 4);
        assert!(!reloaded.contains(1));

        store.clear();
        assert!(storage.load_value(keys::COMPARISON).is_none());
    }
}
