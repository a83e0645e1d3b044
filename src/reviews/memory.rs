use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::types::Json;
use time::OffsetDateTime;
use uuid::Uuid;

use super::{
    repo::ReviewStore,
    repo_types::{NewReview, PublicReview, Review},
};
use crate::db::StoreError;

/// In-process review store with the same uniqueness rule as the real table.
#[derive(Default)]
pub struct MemoryReviewStore {
    rows: Mutex<Vec<Review>>,
}

impl MemoryReviewStore {
    pub fn all(&self) -> Vec<Review> {
        self.rows.lock().unwrap().clone()
    }

    pub fn count_for_purchase(&self, purchase_id: &str) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.purchase_id == purchase_id)
            .count()
    }
}

#[async_trait]
impl ReviewStore for MemoryReviewStore {
    async fn find_id_by_purchase(&self, purchase_id: &str) -> Result<Option<Uuid>, StoreError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|r| r.purchase_id == purchase_id).map(|r| r.id))
    }

    async fn insert(&self, review: NewReview) -> Result<Review, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|r| r.purchase_id == review.purchase_id) {
            return Err(StoreError::UniqueViolation("reviews_purchase_id_key".into()));
        }
        // Later inserts always sort as newer.
        let created_at = rows
            .iter()
            .map(|r| r.created_at)
            .max()
            .map(|last| last.max(OffsetDateTime::now_utc()) + time::Duration::milliseconds(1))
            .unwrap_or_else(OffsetDateTime::now_utc);
        let row = Review {
            id: Uuid::new_v4(),
            created_at,
            customer_name: review.customer_name,
            phone_hash: review.phone_hash,
            phone_encrypted: review.phone_encrypted,
            dob: review.dob,
            review_text: review.review_text,
            rating: review.rating,
            google_review_url: review.google_review_url,
            score: review.score,
            purchase_id: review.purchase_id,
            submitted_from_qr: review.metadata.submitted_from_qr,
            metadata: Json(review.metadata),
            rewarded: false,
        };
        rows.push(row.clone());
        Ok(row)
    }

    async fn list_recent(&self, limit: i64, offset: i64) -> Result<Vec<PublicReview>, StoreError> {
        let mut rows = self.all();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(PublicReview::from)
            .collect())
    }

    async fn set_rewarded(&self, id: Uuid, rewarded: bool) -> Result<Option<Review>, StoreError> {
        let mut rows = self.rows.lock().unwrap();
        Ok(rows.iter_mut().find(|r| r.id == id).map(|r| {
            r.rewarded = rewarded;
            r.clone()
        }))
    }
}
