//! Search, suggestion and recent-search commands.

use super::{open_catalog, open_storage};
use crate::catalog::{CatalogService, LocalCatalog};
use crate::config::Config;
use crate::filters::FilterState;
use crate::format::Formatter;
use crate::search::{QueryEngine, SortKey};
use crate::storage::Storage;
use anyhow::Result;
use tracing::info;

/// Filters and ordering for one search.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    pub filters: FilterState,
    pub sort: SortKey,
}

/// Runs searches against a catalog service.
pub struct SearchCommand<C> {
    config: Config,
    engine: QueryEngine<C>,
}

impl SearchCommand<LocalCatalog> {
    /// Creates a search command over the configured catalog and data directory.
    pub fn new(config: Config) -> Result<Self> {
        let catalog = open_catalog(&config)?;
        let storage = open_storage(&config);
        Ok(Self::with_catalog(config, catalog, storage))
    }
}

impl<C: CatalogService> SearchCommand<C> {
    /// Creates a search command with a provided catalog and storage (for testing).
    pub fn with_catalog(config: Config, catalog: C, storage: Storage) -> Self {
        Self { config, engine: QueryEngine::new(catalog, storage) }
    }

    /// Executes the search and returns formatted output.
    pub async fn execute(&self, query: &str, options: &SearchOptions) -> Result<String> {
        info!("Searching for: '{}' (sort: {})", query, options.sort);

        let mut products = self.engine.search(query, &options.filters, options.sort).await;
        let total = products.len();
        products.truncate(self.config.max_results);
        if total > products.len() {
            info!("Showing {} of {} matches", products.len(), total);
        }

        let formatter = Formatter::new(self.config.format);
        Ok(formatter.format_products(&products))
    }

    /// Autocomplete suggestions for a partial query.
    pub async fn suggest(&self, query: &str) -> Result<String> {
        let suggestions = self.engine.suggestions(query).await;
        Ok(Formatter::new(self.config.format).format_suggestions(&suggestions))
    }

    /// Lists recent searches, most recent first.
    pub fn recent(&self) -> String {
        let recent = self.engine.recent_searches();
        Formatter::new(self.config.format).format_list("Recent searches", &recent)
    }

    /// Forgets one recent search.
    pub fn forget(&self, query: &str) -> String {
        self.engine.remove_recent_search(query);
        self.recent()
    }

    /// Forgets all recent searches.
    pub fn clear_recent(&self) -> String {
        self.engine.clear_recent_searches();
        "Recent searches cleared.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{make_test_config, MockCatalog};

    fn command(catalog: MockCatalog) -> SearchCommand<MockCatalog> {
        SearchCommand::with_catalog(make_test_config(), catalog, Storage::memory())
    }

    fn csv_ids(output: &str) -> Vec<String> {
        output.lines().skip(1).filter_map(|l| l.split(',').next()).map(String::from).collect()
    }

    #[tokio::test]
    async fn test_search_command_basic() {
        let cmd = command(MockCatalog::seeded());
        let output = cmd.execute("red shoe", &SearchOptions::default()).await.unwrap();
        assert_eq!(csv_ids(&output), vec!["4"]);
    }

    #[tokio::test]
    async fn test_search_respects_max_results() {
        let cmd = command(MockCatalog::seeded());
        let output = cmd.execute("", &SearchOptions::default()).await.unwrap();
        assert_eq!(csv_ids(&output).len(), 5);
    }

    #[tokio::test]
    async fn test_search_with_filters_and_sort() {
        let cmd = command(MockCatalog::seeded());
        let options = SearchOptions {
            filters: FilterState { category: "shoes".into(), in_stock: true, ..FilterState::default() },
            sort: SortKey::PriceLow,
        };
        let output = cmd.execute("", &options).await.unwrap();
        assert_eq!(csv_ids(&output), vec!["6", "4", "5"]);
    }

    #[tokio::test]
    async fn test_search_catalog_failure_is_empty() {
        let catalog = MockCatalog::failing();
        let cmd = command(catalog);
        let output = cmd.execute("shoe", &SearchOptions::default()).await.unwrap();
        assert!(csv_ids(&output).is_empty());
    }

    #[tokio::test]
    async fn test_search_records_recent() {
        let cmd = command(MockCatalog::seeded());
        cmd.execute("boot", &SearchOptions::default()).await.unwrap();
        cmd.execute("coat", &SearchOptions::default()).await.unwrap();

        assert_eq!(cmd.recent(), "recent_searches\ncoat\nboot");
        assert_eq!(cmd.forget("coat"), "recent_searches\nboot");
        cmd.clear_recent();
        assert_eq!(cmd.recent(), "recent_searches");
    }

    #[tokio::test]
    async fn test_suggest_short_query_skips_catalog() {
        let cmd = command(MockCatalog::seeded());
        let output = cmd.suggest("s").await.unwrap();
        assert_eq!(output, "No suggestions.");
        assert_eq!(cmd.engine.catalog().call_count(), 0);
    }

    #[tokio::test]
    async fn test_suggest() {
        let cmd = command(MockCatalog::seeded());
        let output = cmd.suggest("shoe").await.unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[0], "type,text,product_id");
        assert_eq!(lines[1], "product,Red Running Shoe,4");
        assert!(lines.contains(&"category,shoes,"));
    }
}
