//! storefront - Catalog search and shopper collections for a small online store
//!
//! Free-text and faceted product search with debounced live results, plus a
//! cart, wishlist and comparison list persisted as JSON.

pub mod catalog;
pub mod collections;
pub mod commands;
pub mod config;
pub mod error;
pub mod filters;
pub mod format;
pub mod marketing;
pub mod reviews;
pub mod search;
pub mod storage;

pub use catalog::{Catalog, CatalogService, LocalCatalog, Product, Rating};
pub use collections::{Cart, Comparison, Store, Wishlist};
pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use filters::{FilterState, FilterUpdate};
pub use reviews::{RatingSummary, ReviewBook};
pub use search::{LiveSearch, QueryEngine, SortKey};
pub use storage::Storage;
