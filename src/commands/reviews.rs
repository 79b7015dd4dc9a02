//! Review listing, submission and helpfulness voting.

use super::{open_catalog, open_storage};
use crate::catalog::{CatalogService, LocalCatalog};
use crate::config::Config;
use crate::format::Formatter;
use crate::reviews::{NewReview, ReviewBook};
use crate::storage::Storage;
use anyhow::{Context, Result};
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub enum ReviewsOp {
    Show { product_id: u64 },
    Add { product_id: u64, user_id: String, rating: u8, comment: String },
    Helpful { review_id: u64, is_helpful: bool },
}

pub struct ReviewsCommand<C> {
    config: Config,
    catalog: C,
    storage: Storage,
}

impl ReviewsCommand<LocalCatalog> {
    pub fn new(config: Config) -> Result<Self> {
        let catalog = open_catalog(&config)?;
        let storage = open_storage(&config);
        Ok(Self::with_catalog(config, catalog, storage))
    }
}

impl<C: CatalogService> ReviewsCommand<C> {
    pub fn with_catalog(config: Config, catalog: C, storage: Storage) -> Self {
        Self { config, catalog, storage }
    }

    pub async fn execute(&self, op: ReviewsOp) -> Result<String> {
        let mut book = ReviewBook::hydrate(self.storage.clone());

        match op {
            ReviewsOp::Show { product_id } => {
                self.ensure_product(product_id).await?;
                let key = product_id.to_string();
                let summary = book.rating_for(&key);
                let reviews = book.reviews_for(&key);
                Ok(Formatter::new(self.config.format).format_reviews(&key, &summary, &reviews))
            }
            ReviewsOp::Add { product_id, user_id, rating, comment } => {
                self.ensure_product(product_id).await?;
                let review = book
                    .add_review(NewReview { product_id: product_id.to_string(), user_id, rating, comment })
                    .context("Review rejected")?;
                let id = review.id;

                let summary = book.rating_for(&product_id.to_string());
                info!("Product {} now rated {:.1} over {} reviews", product_id, summary.average, summary.count);
                Ok(format!(
                    "Added review #{}. Product {} is now rated {:.1}/5 ({} reviews).",
                    id, product_id, summary.average, summary.count
                ))
            }
            ReviewsOp::Helpful { review_id, is_helpful } => {
                let review = book.mark_helpful(review_id, is_helpful)?;
                Ok(format!(
                    "Review #{}: {} helpful, {} not helpful.",
                    review.id, review.helpful, review.not_helpful
                ))
            }
        }
    }

    async fn ensure_product(&self, id: u64) -> Result<()> {
        self.catalog
            .get_product_by_id(id)
            .await
            .map(|_| ())
            .with_context(|| format!("Failed to look up product {}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{make_test_config, MockCatalog};
    use crate::config::OutputFormat;

    fn command() -> ReviewsCommand<MockCatalog> {
        let config = Config { format: OutputFormat::Table, ..make_test_config() };
        ReviewsCommand::with_catalog(config, MockCatalog::seeded(), Storage::memory())
    }

    fn add(product_id: u64, rating: u8, comment: &str) -> ReviewsOp {
        ReviewsOp::Add { product_id, user_id: "kim".into(), rating, comment: comment.into() }
    }

    #[tokio::test]
    async fn test_add_and_show() {
        let cmd = command();
        cmd.execute(add(7, 5, "Great sound")).await.unwrap();
        cmd.execute(add(7, 4, "Comfortable")).await.unwrap();
        let output = cmd.execute(add(7, 3, "Bulky case")).await.unwrap();
        assert_eq!(output, "Added review #3. Product 7 is now rated 4.0/5 (3 reviews).");

        let shown = cmd.execute(ReviewsOp::Show { product_id: 7 }).await.unwrap();
        assert!(shown.starts_with("Product 7: 4.0/5 (3 reviews)"));
        assert!(shown.contains("Bulky case"));
    }

    #[tokio::test]
    async fn test_show_without_reviews() {
        let cmd = command();
        let shown = cmd.execute(ReviewsOp::Show { product_id: 1 }).await.unwrap();
        assert_eq!(shown, "Product 1: 0.0/5 (0 reviews)");
    }

    #[tokio::test]
    async fn test_unknown_product_rejected() {
        let cmd = command();
        assert!(cmd.execute(add(404, 5, "Nice")).await.is_err());
        assert!(cmd.execute(ReviewsOp::Show { product_id: 404 }).await.is_err());
    }

    #[tokio::test]
    async fn test_invalid_review_rejected() {
        let cmd = command();
        let err = cmd.execute(add(7, 9, "Nice")).await.unwrap_err();
        assert!(format!("{:#}", err).contains("rating must be between 1 and 5"));
    }

    #[tokio::test]
    async fn test_helpful_votes() {
        let cmd = command();
        cmd.execute(add(7, 5, "Great sound")).await.unwrap();
        cmd.execute(ReviewsOp::Helpful { review_id: 1, is_helpful: true }).await.unwrap();
        let output =
            cmd.execute(ReviewsOp::Helpful { review_id: 1, is_helpful: false }).await.unwrap();
        assert_eq!(output, "Review #1: 1 helpful, 1 not helpful.");

        let err = cmd.execute(ReviewsOp::Helpful { review_id: 9, is_helpful: true }).await.unwrap_err();
        assert!(err.to_string().contains("Review not found: 9"));
    }
}
