//! CLI command implementations.

pub mod collections;
pub mod marketing;
pub mod product;
pub mod reviews;
pub mod search;

pub use collections::{CartOp, CollectionCommand, CompareOp, WishlistOp};
pub use marketing::MarketingCommand;
pub use product::ProductCommand;
pub use reviews::{ReviewsCommand, ReviewsOp};
pub use search::{SearchCommand, SearchOptions};

use crate::catalog::LocalCatalog;
use crate::config::Config;
use crate::storage::Storage;
use anyhow::{Context, Result};
use tracing::debug;

/// Opens the catalog named by the config, or the built-in one.
pub fn open_catalog(config: &Config) -> Result<LocalCatalog> {
    let catalog = LocalCatalog::from_config(config).with_context(|| match &config.catalog_path {
        Some(path) => format!("Failed to load catalog from {}", path.display()),
        None => "Failed to load built-in catalog".to_string(),
    })?;
    debug!("Catalog loaded with {} products", catalog.catalog().len());
    Ok(catalog)
}

/// Opens file-backed storage in the configured data directory.
pub fn open_storage(config: &Config) -> Storage {
    let dir = config.resolved_data_dir();
    debug!("Using data directory {}", dir.display());
    Storage::files(dir)
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_open_catalog_defaults_to_seed() {
        let catalog = open_catalog(&Config::default()).unwrap();
        assert_eq!(catalog.catalog().len(), crate::catalog::Catalog::seed().len());
    }

    #[test]
    fn test_open_catalog_missing_file() {
        let config = Config {
            catalog_path: Some(PathBuf::from("/nonexistent/catalog.json")),
            ..Config::default()
        };
        let err = open_catalog(&config).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }

    #[test]
    fn test_open_storage_uses_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config { data_dir: Some(dir.path().to_path_buf()), ..Config::default() };
        let storage = open_storage(&config);
        storage.save("wishlist", &vec![1, 2]);
        assert!(dir.path().join("wishlist.json").exists());
    }
}
