use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{DataResponse, ListQuery, SyncResponse},
    extractors::AdminCaller,
    services,
};
use crate::{
    error::ApiError,
    reviews::repo_types::{PublicReview, Review},
    state::AppState,
};

pub fn admin_routes() -> Router<AppState> {
    Router::new().route(
        "/admin/reviews",
        get(list_reviews).patch(update_reward).post(trigger_sync),
    )
}

#[instrument(skip(state, query))]
pub async fn list_reviews(
    State(state): State<AppState>,
    caller: AdminCaller,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<DataResponse<Vec<PublicReview>>>, ApiError> {
    let Query(query) = query?;
    let data = services::list_reviews(&state, caller, &query).await?;
    Ok(Json(DataResponse { data }))
}

#[instrument(skip(state, body))]
pub async fn update_reward(
    State(state): State<AppState>,
    caller: AdminCaller,
    body: Bytes,
) -> Result<Json<DataResponse<Review>>, ApiError> {
    let data = services::set_rewarded(&state, caller, &body).await?;
    Ok(Json(DataResponse { data }))
}

#[instrument(skip(state))]
pub async fn trigger_sync(
    State(state): State<AppState>,
    caller: AdminCaller,
) -> Result<Json<SyncResponse>, ApiError> {
    Ok(Json(services::trigger_sync(&state, caller).await?))
}
