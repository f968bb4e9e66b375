use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenerateResponse {
    #[serde(rename = "jobId")]
    pub job_id: String,
}
