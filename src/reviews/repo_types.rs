use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use time::OffsetDateTime;
use uuid::Uuid;

/// Where a submission came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewMetadata {
    pub ip: String,
    pub user_agent: Option<String>,
    pub submitted_from_qr: bool,
}

/// Review record in the database.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub customer_name: Option<String>,
    pub phone_hash: String,
    pub phone_encrypted: Option<String>, // iv:tag:ciphertext, hex
    pub dob: Option<String>,
    pub review_text: String,
    pub rating: Option<i32>,
    pub google_review_url: Option<String>,
    pub score: i32,
    pub purchase_id: String,
    pub metadata: Json<ReviewMetadata>,
    pub submitted_from_qr: bool,
    pub rewarded: bool,
}

/// Admin listing projection; never carries the reversible phone ciphertext.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct PublicReview {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub customer_name: Option<String>,
    pub phone_hash: String,
    pub dob: Option<String>,
    pub review_text: String,
    pub rating: Option<i32>,
    pub google_review_url: Option<String>,
    pub score: i32,
    pub purchase_id: String,
    pub metadata: Json<ReviewMetadata>,
    pub rewarded: bool,
}

impl From<Review> for PublicReview {
    fn from(r: Review) -> Self {
        Self {
            id: r.id,
            created_at: r.created_at,
            customer_name: r.customer_name,
            phone_hash: r.phone_hash,
            dob: r.dob,
            review_text: r.review_text,
            rating: r.rating,
            google_review_url: r.google_review_url,
            score: r.score,
            purchase_id: r.purchase_id,
            metadata: r.metadata,
            rewarded: r.rewarded,
        }
    }
}

/// Fields written on insert; id, created_at and rewarded come from the store.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub customer_name: Option<String>,
    pub phone_hash: String,
    pub phone_encrypted: Option<String>,
    pub dob: Option<String>,
    pub review_text: String,
    pub rating: Option<i32>,
    pub google_review_url: Option<String>,
    pub score: i32,
    pub purchase_id: String,
    pub metadata: ReviewMetadata,
}
