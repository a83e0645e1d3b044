use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for `POST /reviews`. Required fields are optional here so
/// their absence is reported by validation rather than by the JSON extractor.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    pub customer_name: Option<String>,
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub review_text: Option<String>,
    pub rating: Option<i32>,
    pub google_review_url: Option<String>,
    pub purchase_id: Option<String>,
    #[serde(default = "default_submitted_from_qr")]
    pub submitted_from_qr: bool,
}

fn default_submitted_from_qr() -> bool {
    true
}

/// Caller details captured from the HTTP request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

/// Deliberately minimal: no phone data is echoed back.
#[derive(Debug, Serialize)]
pub struct SubmitReviewResponse {
    pub id: Uuid,
    pub score: i32,
}
