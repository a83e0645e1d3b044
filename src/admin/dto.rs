use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const DEFAULT_PER_PAGE: i64 = 25;
pub const MAX_PER_PAGE: i64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Offset window for a 1-based page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: i64,
    pub offset: i64,
}

impl ListQuery {
    pub fn window(&self) -> PageWindow {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self
            .per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE);
        PageWindow {
            limit: per_page,
            offset: (page - 1).saturating_mul(per_page),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct SetRewardedRequest {
    pub id: Option<String>,
    pub rewarded: Option<bool>,
}

impl SetRewardedRequest {
    /// An empty body reads as `{}`; anything else must be valid JSON.
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        let Json(req) = Json::<Self>::from_bytes(body)?;
        Ok(req)
    }
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub success: bool,
    pub edge_response: String,
}
