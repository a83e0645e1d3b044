use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use super::{repo::GoogleReviewStore, repo_types::GoogleReview};
use crate::db::StoreError;

#[derive(Default)]
pub struct MemoryGoogleReviewStore {
    rows: Mutex<HashMap<String, GoogleReview>>,
}

impl MemoryGoogleReviewStore {
    pub fn count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl GoogleReviewStore for MemoryGoogleReviewStore {
    async fn upsert(&self, review: &GoogleReview) -> Result<(), StoreError> {
        self.rows
            .lock()
            .unwrap()
            .insert(review.google_review_id.clone(), review.clone());
        Ok(())
    }

    async fn list_recent(&self, limit: i64) -> Result<Vec<GoogleReview>, StoreError> {
        let mut rows: Vec<GoogleReview> = self.rows.lock().unwrap().values().cloned().collect();
        rows.sort_by(|a, b| b.review_time.cmp(&a.review_time));
        rows.truncate(limit.max(0) as usize);
        Ok(rows)
    }
}
