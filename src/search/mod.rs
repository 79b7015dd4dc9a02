//! Query engine: free-text search, structured filters, sorting and suggestions.

pub mod debounce;
pub mod live;
pub mod recent;
pub mod sort;
pub mod suggest;

pub use debounce::{Committed, Debouncer};
pub use live::LiveSearch;
pub use recent::{RecentSearches, MAX_RECENT_SEARCHES};
pub use sort::SortKey;
pub use suggest::{Suggestion, SuggestionKind};

use crate::catalog::{CatalogService, Product};
use crate::filters::{FilterChainBuilder, FilterState};
use crate::storage::{keys, Storage};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Runs query, filters and sort over a product list. No side effects.
pub fn run_query(
    products: Vec<Product>,
    query: &str,
    filters: &FilterState,
    sort: SortKey,
) -> Vec<Product> {
    let chain = FilterChainBuilder::from_state(filters).query(query).build();

    if !chain.is_empty() {
        debug!("Active filters: {}", chain.descriptions().join(", "));
    }

    let mut results = chain.apply(products);
    sort.sort(&mut results);
    results
}

/// Searches a catalog service and remembers recent queries.
pub struct QueryEngine<C> {
    catalog: C,
    storage: Storage,
    recent: Mutex<RecentSearches>,
}

impl<C: CatalogService> QueryEngine<C> {
    /// Creates an engine and hydrates recent searches from storage.
    pub fn new(catalog: C, storage: Storage) -> Self {
        let stored: Vec<String> = storage.load_or_default(keys::RECENT_SEARCHES);
        let recent = RecentSearches::from_entries(stored);
        debug!("Loaded {} recent searches", recent.len());
        Self { catalog, storage, recent: Mutex::new(recent) }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Runs a search and records the query.
    ///
    /// Catalog failures are logged and produce an empty result.
    pub async fn search(&self, query: &str, filters: &FilterState, sort: SortKey) -> Vec<Product> {
        let products = self.load_products().await;
        let results = run_query(products, query, filters, sort);
        info!("Search '{}' matched {} products", query.trim(), results.len());

        self.record_search(query);
        results
    }

    /// Like [`QueryEngine::search`] with a sort name; unknown names use relevance.
    pub async fn search_with_sort_name(
        &self,
        query: &str,
        filters: &FilterState,
        sort: &str,
    ) -> Vec<Product> {
        self.search(query, filters, SortKey::parse_lenient(sort)).await
    }

    /// Suggestions for a partially typed query.
    pub async fn suggestions(&self, query: &str) -> Vec<Suggestion> {
        if query.trim().chars().count() < suggest::MIN_SUGGESTION_QUERY_LEN {
            return Vec::new();
        }
        let products = self.load_products().await;
        suggest::suggest(&products, query)
    }

    /// Recent searches, most recent first.
    pub fn recent_searches(&self) -> Vec<String> {
        self.recent().entries().to_vec()
    }

    /// Forgets one recent search.
    pub fn remove_recent_search(&self, query: &str) {
        let mut recent = self.recent();
        if recent.remove(query) {
            self.storage.save(keys::RECENT_SEARCHES, &*recent);
        }
    }

    /// Forgets all recent searches.
    pub fn clear_recent_searches(&self) {
        self.recent().clear();
        self.storage.remove(keys::RECENT_SEARCHES);
    }

    fn record_search(&self, query: &str) {
        let mut recent = self.recent();
        if recent.record(query) {
            self.storage.save(keys::RECENT_SEARCHES, &*recent);
        }
    }

    fn recent(&self) -> MutexGuard<'_, RecentSearches> {
        self.recent.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn load_products(&self) -> Vec<Product> {
        match self.catalog.get_all_products().await {
            Ok(products) => products,
            Err(e) => {
                warn!("Catalog unavailable, returning no results: {}", e);
                Vec::new()
            }
        }
    }
}
