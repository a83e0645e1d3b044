use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{RequestContext, SubmitReviewRequest, SubmitReviewResponse},
    services::submit_review,
};
use crate::{error::ApiError, state::AppState};

pub fn intake_routes() -> Router<AppState> {
    Router::new().route("/reviews", post(create_review))
}

fn header_str(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn request_context(headers: &HeaderMap) -> RequestContext {
    RequestContext {
        ip: header_str(headers, "x-forwarded-for"),
        user_agent: header_str(headers, axum::http::header::USER_AGENT.as_str()),
    }
}

#[instrument(skip_all)]
pub async fn create_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SubmitReviewRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitReviewResponse>), ApiError> {
    let Json(payload) = payload?;
    let res = submit_review(&state, payload, request_context(&headers)).await?;
    Ok((StatusCode::CREATED, Json(res)))
}
