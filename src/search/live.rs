//! Reactive search session: input changes trigger debounced recomputation.

use super::debounce::{CommitReceiver, Debouncer};
use super::{QueryEngine, SortKey, Suggestion};
use crate::catalog::{CatalogService, Product};
use crate::config::Config;
use crate::filters::{FilterState, FilterUpdate};
use std::sync::Arc;
use std::time::Duration;

/// Holds the current query, filters and sort, and recomputes results and
/// suggestions after each change once input has been quiet long enough.
pub struct LiveSearch<C> {
    engine: Arc<QueryEngine<C>>,
    query: String,
    filters: FilterState,
    sort: SortKey,
    results: Debouncer<Vec<Product>>,
    suggestions: Debouncer<Vec<Suggestion>>,
}

impl<C: CatalogService + 'static> LiveSearch<C> {
    pub fn new(engine: Arc<QueryEngine<C>>, config: &Config) -> Self {
        Self::with_delays(
            engine,
            Duration::from_millis(config.search_debounce_ms),
            Duration::from_millis(config.suggest_debounce_ms),
        )
    }

    pub fn with_delays(
        engine: Arc<QueryEngine<C>>,
        results_delay: Duration,
        suggestions_delay: Duration,
    ) -> Self {
        Self {
            engine,
            query: String::new(),
            filters: FilterState::default(),
            sort: SortKey::default(),
            results: Debouncer::new(results_delay),
            suggestions: Debouncer::new(suggestions_delay),
        }
    }

    pub fn results(&self) -> CommitReceiver<Vec<Product>> {
        self.results.subscribe()
    }

    pub fn suggestions(&self) -> CommitReceiver<Vec<Suggestion>> {
        self.suggestions.subscribe()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// New query text: recompute results and suggestions.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.schedule_results();
        self.schedule_suggestions();
    }

    pub fn update_filter(&mut self, update: FilterUpdate) {
        self.filters.update(update);
        self.schedule_results();
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.schedule_results();
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.schedule_results();
    }

    fn schedule_results(&mut self) {
        let engine = Arc::clone(&self.engine);
        let query = self.query.clone();
        let filters = self.filters.clone();
        let sort = self.sort;
        self.results.schedule(move || async move { engine.search(&query, &filters, sort).await });
    }

    fn schedule_suggestions(&mut self) {
        let engine = Arc::clone(&self.engine);
        let query = self.query.clone();
        self.suggestions.schedule(move || async move { engine.suggestions(&query).await });
    }
}
