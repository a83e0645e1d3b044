use tracing::{info, warn};

use super::{
    dto::{RequestContext, SubmitReviewRequest, SubmitReviewResponse},
    repo_types::{NewReview, ReviewMetadata},
};
use crate::{
    db::StoreError,
    error::ApiError,
    pii,
    score::{compute_score, ScoreInput},
    state::AppState,
};

/// A submission whose required fields are known to be present.
#[derive(Debug)]
struct ValidSubmission {
    customer_name: Option<String>,
    phone: String,
    dob: Option<String>,
    review_text: String,
    rating: Option<i32>,
    google_review_url: Option<String>,
    purchase_id: String,
    submitted_from_qr: bool,
}

fn required(value: Option<String>, msg: &str) -> Result<String, ApiError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::validation(msg))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn validate(req: SubmitReviewRequest) -> Result<ValidSubmission, ApiError> {
    // Order is part of the contract: the first missing field is reported.
    let purchase_id = required(
        req.purchase_id,
        "purchaseId is required (one review per purchase)",
    )?;
    let phone = required(req.phone, "phone is required")?;
    let review_text = required(req.review_text, "reviewText is required")?;

    Ok(ValidSubmission {
        customer_name: non_empty(req.customer_name),
        phone,
        dob: non_empty(req.dob),
        review_text,
        rating: req.rating,
        google_review_url: non_empty(req.google_review_url),
        purchase_id,
        submitted_from_qr: req.submitted_from_qr,
    })
}

/// Validates, scores and stores a review. At most one review is accepted per
/// purchase id; the store's unique constraint is authoritative.
pub async fn submit_review(
    st: &AppState,
    req: SubmitReviewRequest,
    ctx: RequestContext,
) -> Result<SubmitReviewResponse, ApiError> {
    let sub = validate(req)?;

    let phone_hash = pii::hash_phone(&sub.phone);
    let phone_encrypted = match pii::encrypt_phone(&sub.phone, st.config.phone_secret.as_deref()) {
        Ok(enc) => enc.map(|e| e.to_string()),
        Err(e) => {
            warn!(error = %e, "phone encryption failed; storing hash only");
            None
        }
    };

    let score = compute_score(ScoreInput {
        rating: sub.rating,
        review_text: Some(&sub.review_text),
        google_review_url: sub.google_review_url.as_deref(),
        dob: sub.dob.as_deref(),
    });

    match st.reviews.find_id_by_purchase(&sub.purchase_id).await {
        Ok(Some(existing)) => {
            warn!(purchase_id = %sub.purchase_id, %existing, "duplicate review for purchase");
            return Err(ApiError::Conflict);
        }
        Ok(None) => {}
        Err(e) => {
            // The unique constraint on insert still guards the purchase id.
            warn!(error = %e, purchase_id = %sub.purchase_id, "duplicate pre-check failed; relying on constraint");
        }
    }

    let metadata = ReviewMetadata {
        ip: ctx.ip.unwrap_or_else(|| "unknown".into()),
        user_agent: ctx.user_agent,
        submitted_from_qr: sub.submitted_from_qr,
    };

    let review = st
        .reviews
        .insert(NewReview {
            customer_name: sub.customer_name,
            phone_hash,
            phone_encrypted,
            dob: sub.dob,
            review_text: sub.review_text,
            rating: sub.rating,
            google_review_url: sub.google_review_url,
            score,
            purchase_id: sub.purchase_id,
            metadata,
        })
        .await
        .map_err(|e| match e {
            StoreError::UniqueViolation(constraint) => {
                warn!(%constraint, "duplicate review rejected by store");
                ApiError::Conflict
            }
            other => ApiError::Storage(other),
        })?;

    info!(review_id = %review.id, score = review.score, purchase_id = %review.purchase_id, "review stored");
    Ok(SubmitReviewResponse {
        id: review.id,
        score: review.score,
    })
}
