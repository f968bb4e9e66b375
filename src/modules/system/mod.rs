use axum::Router;
use axum::routing::get;
use crate::state::AppState;

pub mod dto;
pub mod handler;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(handler::health))
}

pub fn debug_router() -> Router<AppState> {
    Router::new().route("/files", get(handler::debug_files))
}
