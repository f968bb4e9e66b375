use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub ok: bool,
}

/// Snapshot of the served directory, for diagnosing missing previews.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DebugFilesResponse {
    #[serde(rename = "BASE_DIR")]
    pub base_dir: String,
    #[serde(rename = "FILES_DIR")]
    pub files_dir: String,
    pub exists: bool,
    pub files: Vec<String>,
}
