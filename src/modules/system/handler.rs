use super::dto::{DebugFilesResponse, HealthResponse};
use crate::common::response::ApiSuccess;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tracing::warn;

/// Liveness probe
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "System"
)]
pub async fn health() -> impl IntoResponse {
    ApiSuccess(HealthResponse { ok: true }, StatusCode::OK)
}

/// Inspect the served files directory
#[utoipa::path(
    get,
    path = "/debug/files",
    responses(
        (status = 200, description = "Directory listing", body = DebugFilesResponse)
    ),
    tag = "System"
)]
pub async fn debug_files(State(state): State<AppState>) -> impl IntoResponse {
    let base_dir = std::env::current_dir()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();

    let exists = state.storage.files_dir_exists().await;
    let files = if exists {
        state.storage.list_served().await.unwrap_or_else(|e| {
            warn!("{}", e);
            Vec::new()
        })
    } else {
        Vec::new()
    };

    ApiSuccess(
        DebugFilesResponse {
            base_dir,
            files_dir: state.storage.files_dir().display().to_string(),
            exists,
            files,
        },
        StatusCode::OK,
    )
}
