use tracing::{error, info, warn};

use super::{dto::FeedQuery, repo_types::GoogleReview};
use crate::{
    admin::{AdminCaller, Role},
    error::ApiError,
    state::AppState,
};

pub async fn list_feed(st: &AppState, query: &FeedQuery) -> Result<Vec<GoogleReview>, ApiError> {
    Ok(st.google_reviews.list_recent(query.limit()).await?)
}

/// Pulls the configured place's reviews and upserts them. Returns how many
/// were stored.
pub async fn import_from_places(st: &AppState, caller: AdminCaller) -> Result<usize, ApiError> {
    caller.require(Role::Sync)?;

    let Some(places) = st.places.as_ref() else {
        error!("google import requested but GOOGLE_PLACE_ID / GOOGLE_PLACES_API_KEY are unset");
        return Err(ApiError::Config("google places source"));
    };

    let reviews = places.fetch_reviews().await.map_err(|e| {
        warn!(error = %e, "places fetch failed");
        ApiError::Upstream(e)
    })?;

    for review in &reviews {
        st.google_reviews.upsert(review).await?;
    }

    info!(count = reviews.len(), "google reviews imported");
    Ok(reviews.len())
}
