use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{FeedQuery, FeedResponse, ImportResponse},
    services,
};
use crate::{admin::AdminCaller, error::ApiError, state::AppState};

pub fn feed_routes() -> Router<AppState> {
    Router::new()
        .route("/google-reviews", get(list_google_reviews))
        .route("/admin/google-reviews", post(import_google_reviews))
}

#[instrument(skip(state, query))]
pub async fn list_google_reviews(
    State(state): State<AppState>,
    query: Result<Query<FeedQuery>, QueryRejection>,
) -> Result<Json<FeedResponse>, ApiError> {
    let Query(query) = query?;
    let reviews = services::list_feed(&state, &query).await?;
    Ok(Json(FeedResponse { reviews }))
}

#[instrument(skip(state))]
pub async fn import_google_reviews(
    State(state): State<AppState>,
    caller: AdminCaller,
) -> Result<Json<ImportResponse>, ApiError> {
    let count = services::import_from_places(&state, caller).await?;
    Ok(Json(ImportResponse {
        success: true,
        count,
    }))
}
