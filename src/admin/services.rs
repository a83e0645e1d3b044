use tracing::{error, info, warn};
use uuid::Uuid;

use super::{
    dto::{ListQuery, SetRewardedRequest, SyncResponse},
    extractors::{AdminCaller, Role},
};
use crate::{
    error::ApiError,
    reviews::repo_types::{PublicReview, Review},
    state::AppState,
};

/// Newest reviews first, one offset page at a time.
pub async fn list_reviews(
    st: &AppState,
    caller: AdminCaller,
    query: &ListQuery,
) -> Result<Vec<PublicReview>, ApiError> {
    caller.require(Role::View)?;
    let window = query.window();
    let rows = st.reviews.list_recent(window.limit, window.offset).await?;
    Ok(rows)
}

/// Reward toggling shares the view role with read access. The body is only
/// read once the caller is authorized.
pub async fn set_rewarded(
    st: &AppState,
    caller: AdminCaller,
    body: &[u8],
) -> Result<Review, ApiError> {
    caller.require(Role::View)?;
    let req = SetRewardedRequest::from_body(body)?;

    let raw_id = req
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| ApiError::validation("id required"))?;
    let id = Uuid::parse_str(raw_id.trim()).map_err(|_| ApiError::validation("invalid id"))?;
    let rewarded = req.rewarded.unwrap_or(false);

    let review = st
        .reviews
        .set_rewarded(id, rewarded)
        .await?
        .ok_or(ApiError::NotFound("review"))?;

    info!(review_id = %review.id, rewarded, "review reward updated");
    Ok(review)
}

/// Fires the external sync job and relays its raw answer.
pub async fn trigger_sync(st: &AppState, caller: AdminCaller) -> Result<SyncResponse, ApiError> {
    caller.require(Role::Sync)?;

    let Some(trigger) = st.sync.as_ref() else {
        error!("sync requested but no trigger endpoint is configured");
        return Err(ApiError::Config("review sync trigger"));
    };

    let edge_response = trigger.trigger().await.map_err(|e| {
        warn!(error = %e, "review sync trigger failed");
        ApiError::Upstream(e)
    })?;

    info!("review sync triggered");
    Ok(SyncResponse {
        success: true,
        edge_response,
    })
}
