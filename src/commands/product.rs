//! Product lookup and catalog listing commands.

use super::open_catalog;
use crate::catalog::{CatalogService, LocalCatalog, Product};
use crate::config::Config;
use crate::format::Formatter;
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Looks up products by id.
pub struct ProductCommand<C> {
    config: Config,
    catalog: C,
}

impl ProductCommand<LocalCatalog> {
    pub fn new(config: Config) -> Result<Self> {
        let catalog = open_catalog(&config)?;
        Ok(Self::with_catalog(config, catalog))
    }
}

impl<C: CatalogService> ProductCommand<C> {
    /// Creates a product command with a provided catalog (for testing).
    pub fn with_catalog(config: Config, catalog: C) -> Self {
        Self { config, catalog }
    }

    /// Fetches a product by id and returns formatted output.
    pub async fn execute(&self, id: u64) -> Result<String> {
        info!("Looking up product: {}", id);

        let product = self
            .catalog
            .get_product_by_id(id)
            .await
            .with_context(|| format!("Failed to look up product {}", id))?;

        Ok(Formatter::new(self.config.format).format_product(&product))
    }

    /// Fetches several products. Missing ids are reported and skipped.
    pub async fn execute_batch(&self, ids: &[u64]) -> Result<String> {
        let mut products: Vec<Product> = Vec::new();

        for &id in ids {
            match self.catalog.get_product_by_id(id).await {
                Ok(product) => products.push(product),
                Err(e) if e.is_not_found() => warn!("Skipping unknown product {}", id),
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to look up product {}", id))
                }
            }
        }

        if products.is_empty() && !ids.is_empty() {
            anyhow::bail!("None of the requested products exist");
        }

        Ok(Formatter::new(self.config.format).format_products(&products))
    }

    /// Lists categories in catalog order.
    pub async fn categories(&self) -> Result<String> {
        let products =
            self.catalog.get_all_products().await.context("Failed to load catalog")?;

        let mut categories: Vec<String> = Vec::new();
        for product in &products {
            if !product.category.is_empty() && !categories.contains(&product.category) {
                categories.push(product.category.clone());
            }
        }

        Ok(Formatter::new(self.config.format).format_list("Categories", &categories))
    }
}
