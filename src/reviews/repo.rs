use async_trait::async_trait;
use sqlx::types::Json;
use uuid::Uuid;

use super::repo_types::{NewReview, PublicReview, Review};
use crate::db::{PgStore, StoreError};

/// Durable review storage. Implementations must enforce uniqueness of
/// `purchase_id` on insert and report it as `StoreError::UniqueViolation`.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn find_id_by_purchase(&self, purchase_id: &str) -> Result<Option<Uuid>, StoreError>;
    async fn insert(&self, review: NewReview) -> Result<Review, StoreError>;
    /// Newest first.
    async fn list_recent(&self, limit: i64, offset: i64) -> Result<Vec<PublicReview>, StoreError>;
    async fn set_rewarded(&self, id: Uuid, rewarded: bool) -> Result<Option<Review>, StoreError>;
}

#[async_trait]
impl ReviewStore for PgStore {
    async fn find_id_by_purchase(&self, purchase_id: &str) -> Result<Option<Uuid>, StoreError> {
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT id
              FROM reviews
             WHERE purchase_id = $1
             LIMIT 1
            "#,
        )
        .bind(purchase_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(id)
    }

    async fn insert(&self, review: NewReview) -> Result<Review, StoreError> {
        let submitted_from_qr = review.metadata.submitted_from_qr;
        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (customer_name, phone_hash, phone_encrypted, dob, review_text,
                                 rating, google_review_url, score, purchase_id, metadata,
                                 submitted_from_qr)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(review.customer_name)
        .bind(review.phone_hash)
        .bind(review.phone_encrypted)
        .bind(review.dob)
        .bind(review.review_text)
        .bind(review.rating)
        .bind(review.google_review_url)
        .bind(review.score)
        .bind(review.purchase_id)
        .bind(Json(review.metadata))
        .bind(submitted_from_qr)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::from_insert)
    }

    async fn list_recent(&self, limit: i64, offset: i64) -> Result<Vec<PublicReview>, StoreError> {
        let rows = sqlx::query_as::<_, PublicReview>(
            r#"
            SELECT id, created_at, customer_name, phone_hash, dob, review_text, rating,
                   google_review_url, score, purchase_id, metadata, rewarded
              FROM reviews
             ORDER BY created_at DESC
             LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn set_rewarded(&self, id: Uuid, rewarded: bool) -> Result<Option<Review>, StoreError> {
        let row = sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
               SET rewarded = $2
             WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(rewarded)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}
