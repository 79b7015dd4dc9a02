//! Catalog service: async access to products with simulated latency.

use super::{Catalog, Product};
use crate::config::Config;
use crate::error::{StoreError, StoreResult};
use async_trait::async_trait;
use rand::RngExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Trait for catalog lookups - enables mocking for tests.
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Returns every product in catalog order.
    async fn get_all_products(&self) -> StoreResult<Vec<Product>>;

    /// Returns a single product or `StoreError::NotFound`.
    async fn get_product_by_id(&self, id: u64) -> StoreResult<Product>;
}

/// Catalog service backed by an in-memory catalog.
#[derive(Debug, Clone)]
pub struct LocalCatalog {
    catalog: Arc<Catalog>,
    latency_ms: u64,
    latency_jitter_ms: u64,
}

impl LocalCatalog {
    /// Creates a service over the given catalog with no latency.
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog: Arc::new(catalog), latency_ms: 0, latency_jitter_ms: 0 }
    }

    /// Creates a service from configuration: catalog file if set, else the seed data.
    pub fn from_config(config: &Config) -> StoreResult<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::from_json_file(path)?,
            None => Catalog::seed(),
        };
        let mut service = Self::new(catalog);
        service.set_latency(config.latency_ms, config.latency_jitter_ms);
        Ok(service)
    }

    /// Updates the simulated latency settings.
    pub fn set_latency(&mut self, latency_ms: u64, jitter_ms: u64) {
        self.latency_ms = latency_ms;
        self.latency_jitter_ms = jitter_ms;
    }

    /// Returns the underlying catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Sleeps for the configured latency plus random jitter.
    async fn delay(&self) {
        if self.latency_ms == 0 && self.latency_jitter_ms == 0 {
            return;
        }

        let jitter = if self.latency_jitter_ms > 0 {
            rand::rng().random_range(0..=self.latency_jitter_ms)
        } else {
            0
        };

        let total = self.latency_ms + jitter;
        debug!("Simulating catalog latency of {}ms", total);
        tokio::time::sleep(Duration::from_millis(total)).await;
    }
}

#[async_trait]
impl CatalogService for LocalCatalog {
    async fn get_all_products(&self) -> StoreResult<Vec<Product>> {
        self.delay().await;
        Ok(self.catalog.products().to_vec())
    }

    async fn get_product_by_id(&self, id: u64) -> StoreResult<Product> {
        self.delay().await;
        self.catalog.get(id).cloned().ok_or_else(|| StoreError::not_found("Product", id))
    }
}
