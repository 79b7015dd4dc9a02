//! Product reviews and rating aggregation.

use crate::error::{StoreError, StoreResult};
use crate::storage::{keys, Storage};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

pub const MIN_REVIEW_RATING: u8 = 1;
pub const MAX_REVIEW_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: u64,
    /// Product ids are stored as strings and compared as strings.
    #[serde(deserialize_with = "string_or_number")]
    pub product_id: String,
    #[serde(default)]
    pub user_id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub helpful: u32,
    #[serde(default)]
    pub not_helpful: u32,
}

/// Accepts `"7"` or `7` and yields `"7"`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}

/// Input for [`ReviewBook::add_review`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewReview {
    pub product_id: String,
    pub user_id: String,
    pub rating: u8,
    pub comment: String,
}

/// Average rating (one decimal place) and number of reviews.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: usize,
}

/// Folds the reviews of one product into a summary.
pub fn aggregate(reviews: &[Review], product_id: &str) -> RatingSummary {
    let (sum, count) = reviews
        .iter()
        .filter(|r| r.product_id == product_id)
        .fold((0u64, 0usize), |(sum, count), r| (sum + r.rating as u64, count + 1));

    if count == 0 {
        return RatingSummary::default();
    }

    let mean = sum as f64 / count as f64;
    RatingSummary { average: (mean * 10.0).round() / 10.0, count }
}

/// Flat, append-only review collection.
#[derive(Debug, Default)]
pub struct ReviewBook {
    reviews: Vec<Review>,
    storage: Option<Storage>,
}

impl ReviewBook {
    pub fn in_memory(reviews: Vec<Review>) -> Self {
        Self { reviews, storage: None }
    }

    /// Loads reviews from storage. Missing or corrupt data starts empty.
    pub fn hydrate(storage: Storage) -> Self {
        let reviews: Vec<Review> = storage.load_or_default(keys::PRODUCT_REVIEWS);
        debug!("Loaded {} reviews", reviews.len());
        Self { reviews, storage: Some(storage) }
    }

    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    pub fn rating_for(&self, product_id: &str) -> RatingSummary {
        aggregate(&self.reviews, product_id)
    }

    /// Reviews of one product, newest first.
    pub fn reviews_for(&self, product_id: &str) -> Vec<&Review> {
        let mut reviews: Vec<&Review> =
            self.reviews.iter().filter(|r| r.product_id == product_id).collect();
        reviews.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        reviews
    }

    /// Count of reviews per star, index 0 holding one-star reviews.
    pub fn distribution(&self, product_id: &str) -> [usize; 5] {
        let mut stars = [0; 5];
        for review in self.reviews.iter().filter(|r| r.product_id == product_id) {
            if let Some(slot) = (review.rating as usize).checked_sub(1).and_then(|i| stars.get_mut(i)) {
                *slot += 1;
            }
        }
        stars
    }

    /// Records a helpful / not helpful vote.
    pub fn mark_helpful(&mut self, review_id: u64, is_helpful: bool) -> StoreResult<&Review> {
        let index = self
            .reviews
            .iter()
            .position(|r| r.id == review_id)
            .ok_or_else(|| StoreError::not_found("Review", review_id))?;

        let review = &mut self.reviews[index];
        if is_helpful {
            review.helpful = review.helpful.saturating_add(1);
        } else {
            review.not_helpful = review.not_helpful.saturating_add(1);
        }

        self.persist();
        Ok(&self.reviews[index])
    }

    pub fn add_review(&mut self, review: NewReview) -> StoreResult<&Review> {
        self.add_review_at(review, Utc::now())
    }

    /// Validates and appends a review dated `date`.
    pub fn add_review_at(&mut self, review: NewReview, date: DateTime<Utc>) -> StoreResult<&Review> {
        if !(MIN_REVIEW_RATING..=MAX_REVIEW_RATING).contains(&review.rating) {
            return Err(StoreError::invalid(format!(
                "rating must be between {} and {}, got {}",
                MIN_REVIEW_RATING, MAX_REVIEW_RATING, review.rating
            )));
        }
        let comment = review.comment.trim();
        if comment.is_empty() {
            return Err(StoreError::invalid("review comment must not be empty"));
        }
        let product_id = review.product_id.trim();
        if product_id.is_empty() {
            return Err(StoreError::invalid("review must name a product"));
        }

        let id = self.reviews.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        self.reviews.push(Review {
            id,
            product_id: product_id.to_string(),
            user_id: review.user_id,
            rating: review.rating,
            comment: comment.to_string(),
            date,
            helpful: 0,
            not_helpful: 0,
        });
        info!("Added review {} for product {}", id, product_id);

        self.persist();
        Ok(&self.reviews[self.reviews.len() - 1])
    }

    fn persist(&self) {
        if let Some(storage) = &self.storage {
            storage.save(keys::PRODUCT_REVIEWS, &self.reviews);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn review(id: u64, product_id: &str, rating: u8) -> Review {
        Review {
            id,
            product_id: product_id.to_string(),
            user_id: format!("user-{}", id),
            rating,
            comment: "ok".to_string(),
            date: Utc.with_ymd_and_hms(2024, 1, id as u32, 12, 0, 0).unwrap(),
            helpful: 0,
            not_helpful: 0,
        }
    }

    fn new_review(product_id: &str, rating: u8, comment: &str) -> NewReview {
        NewReview {
            product_id: product_id.to_string(),
            user_id: "alice".to_string(),
            rating,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_rating_aggregation() {
        let book = ReviewBook::in_memory(vec![
            review(1, "7", 5),
            review(2, "7", 4),
            review(3, "7", 3),
            review(4, "8", 1),
        ]);
        assert_eq!(book.rating_for("7"), RatingSummary { average: 4.0, count: 3 });
    }

    #[test]
    fn test_rating_rounds_to_one_decimal() {
        let book =
            ReviewBook::in_memory(vec![review(1, "2", 5), review(2, "2", 4), review(3, "2", 4)]);
        // 13 / 3 = 4.333...
        assert_eq!(book.rating_for("2").average, 4.3);
    }

    #[test]
    fn test_no_reviews_is_zero() {
        let book = ReviewBook::in_memory(vec![review(1, "7", 5)]);
        assert_eq!(book.rating_for("9"), RatingSummary { average: 0.0, count: 0 });
        assert_eq!(book.rating_for("07"), RatingSummary::default());
    }

    #[test]
    fn test_mark_helpful() {
        let storage = Storage::memory();
        storage.save(keys::PRODUCT_REVIEWS, &vec![review(1, "7", 5)]);
        let mut book = ReviewBook::hydrate(storage.clone());

        book.mark_helpful(1, true).unwrap();
        book.mark_helpful(1, true).unwrap();
        let updated = book.mark_helpful(1, false).unwrap();
        assert_eq!((updated.helpful, updated.not_helpful), (2, 1));

        let reloaded = ReviewBook::hydrate(storage);
        assert_eq!(reloaded.reviews()[0].helpful, 2);
    }

    #[test]
    fn test_mark_helpful_unknown_review() {
        let mut book = ReviewBook::in_memory(vec![review(1, "7", 5)]);
        let err = book.mark_helpful(42, true).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(book.reviews()[0].helpful, 0);
    }

    #[test]
    fn test_add_review_validates() {
        let mut book = ReviewBook::in_memory(Vec::new());
        assert!(book.add_review(new_review("7", 0, "bad")).is_err());
        assert!(book.add_review(new_review("7", 6, "bad")).is_err());
        assert!(book.add_review(new_review("7", 4, "   ")).is_err());
        assert!(book.add_review(new_review("", 4, "fine")).is_err());
        assert!(book.reviews().is_empty());
    }

    #[test]
    fn test_add_review_assigns_ids_and_persists() {
        let storage = Storage::memory();
        let mut book = ReviewBook::hydrate(storage.clone());
        let first = book.add_review(new_review("7", 5, " Great fit ")).unwrap().id;
        let second = book.add_review(new_review("7", 3, "Runs small")).unwrap().id;
        assert_eq!((first, second), (1, 2));
        assert_eq!(book.reviews()[0].comment, "Great fit");

        let reloaded = ReviewBook::hydrate(storage);
        assert_eq!(reloaded.rating_for("7"), RatingSummary { average: 4.0, count: 2 });
    }

    #[test]
    fn test_reviews_for_newest_first() {
        let book =
            ReviewBook::in_memory(vec![review(1, "7", 5), review(3, "7", 2), review(2, "8", 4)]);
        let ids: Vec<u64> = book.reviews_for("7").iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_distribution() {
        let book =
            ReviewBook::in_memory(vec![review(1, "7", 5), review(2, "7", 5), review(3, "7", 1)]);
        assert_eq!(book.distribution("7"), [1, 0, 0, 0, 2]);
    }

    #[test]
    fn test_corrupt_storage_starts_empty() {
        let storage = Storage::memory();
        storage.save(keys::PRODUCT_REVIEWS, "not a list");
        let book = ReviewBook::hydrate(storage);
        assert!(book.reviews().is_empty());
    }

    #[test]
    fn test_hydrate_accepts_numeric_product_ids() {
        let storage = Storage::memory();
        storage.save(
            keys::PRODUCT_REVIEWS,
            &serde_json::json!([
                {"id": 1, "productId": 7, "rating": 5, "date": "2024-01-01T12:00:00Z"},
                {"id": 2, "productId": "7", "rating": 4, "date": "2024-01-02T12:00:00Z"},
                {"id": 3, "productId": "7", "rating": 3, "date": "2024-01-03T12:00:00Z"},
                {"id": 4, "productId": 8, "rating": 1, "date": "2024-01-04T12:00:00Z"}
            ]),
        );

        let book = ReviewBook::hydrate(storage);
        assert_eq!(book.reviews().len(), 4);
        assert_eq!(book.reviews()[0].product_id, "7");
        assert_eq!(book.rating_for("7"), RatingSummary { average: 4.0, count: 3 });
        assert_eq!(book.rating_for("8"), RatingSummary { average: 1.0, count: 1 });
    }

    #[test]
    fn test_review_serde_camel_case() {
        let json = serde_json::to_value(review(1, "7", 5)).unwrap();
        assert_eq!(json["productId"], "7");
        assert_eq!(json["notHelpful"], 0);
    }
}
