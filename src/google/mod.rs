//! Third-party (Google Places) review feed, stored separately from
//! first-party reviews.

use async_trait::async_trait;
use axum::Router;

use crate::{state::AppState, sync::UpstreamError};

mod dto;
pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod places;
pub mod repo;
pub mod repo_types;
mod services;

use repo_types::GoogleReview;

/// Read-only source of third-party reviews.
#[async_trait]
pub trait PlacesSource: Send + Sync {
    async fn fetch_reviews(&self) -> Result<Vec<GoogleReview>, UpstreamError>;
}

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::feed_routes())
}
