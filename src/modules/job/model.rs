use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Done,
    Failed,
}

/// Why a job failed, for clients that branch on it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DecodeError,
    EncodeError,
    IoError,
}

/// Job record. Written once when the upload request finishes and never
/// changed afterwards.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct Job {
    pub id: String,
    pub status: JobStatus,
    pub scene_url: Option<String>,
    pub video_url: String,
    pub error: Option<String>,
    pub error_kind: Option<ErrorKind>,
}

impl Job {
    pub fn done(id: String, scene_url: String, video_url: String) -> Self {
        Self {
            id,
            status: JobStatus::Done,
            scene_url: Some(scene_url),
            video_url,
            error: None,
            error_kind: None,
        }
    }

    pub fn failed(id: String, video_url: String, kind: ErrorKind, detail: String) -> Self {
        Self {
            id,
            status: JobStatus::Failed,
            scene_url: None,
            video_url,
            error: Some(format!("Failed to process image: {}", detail)),
            error_kind: Some(kind),
        }
    }
}
