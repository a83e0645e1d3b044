use serde::{Deserialize, Serialize};

use super::repo_types::GoogleReview;

pub const DEFAULT_FEED_LIMIT: i64 = 20;
pub const MAX_FEED_LIMIT: i64 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub limit: Option<i64>,
}

impl FeedQuery {
    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(DEFAULT_FEED_LIMIT)
            .clamp(1, MAX_FEED_LIMIT)
    }
}

#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub reviews: Vec<GoogleReview>,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub success: bool,
    pub count: usize,
}
