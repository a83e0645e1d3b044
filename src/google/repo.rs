use async_trait::async_trait;

use super::repo_types::GoogleReview;
use crate::db::{PgStore, StoreError};

#[async_trait]
pub trait GoogleReviewStore: Send + Sync {
    /// Insert or replace by `google_review_id`.
    async fn upsert(&self, review: &GoogleReview) -> Result<(), StoreError>;
    /// Most recent `review_time` first.
    async fn list_recent(&self, limit: i64) -> Result<Vec<GoogleReview>, StoreError>;
}

#[async_trait]
impl GoogleReviewStore for PgStore {
    async fn upsert(&self, review: &GoogleReview) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO google_reviews (google_review_id, author_name, rating, review_text,
                                        review_time, raw)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (google_review_id) DO UPDATE
               SET author_name = EXCLUDED.author_name,
                   rating      = EXCLUDED.rating,
                   review_text = EXCLUDED.review_text,
                   review_time = EXCLUDED.review_time,
                   raw         = EXCLUDED.raw
            "#,
        )
        .bind(&review.google_review_id)
        .bind(&review.author_name)
        .bind(review.rating)
        .bind(&review.review_text)
        .bind(review.review_time)
        .bind(&review.raw)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<GoogleReview>, StoreError> {
        let rows = sqlx::query_as::<_, GoogleReview>(
            r#"
            SELECT google_review_id, author_name, rating, review_text, review_time, raw
              FROM google_reviews
             ORDER BY review_time DESC
             LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
