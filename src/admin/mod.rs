use crate::state::AppState;
use axum::Router;

mod dto;
pub mod extractors;
pub mod handlers;
mod services;

pub use extractors::{AdminCaller, Role};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::admin_routes())
}
