use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Review pulled from the Places feed, kept apart from first-party reviews.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GoogleReview {
    pub google_review_id: String, // Places `time` as text
    pub author_name: Option<String>,
    pub rating: Option<i32>,
    pub review_text: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub review_time: OffsetDateTime,
    pub raw: serde_json::Value,
}
