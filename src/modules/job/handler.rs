use super::dto::GenerateResponse;
use super::model::Job;
use super::service::JobService;
use crate::common::response::{ApiError, ApiSuccess, ErrorBody};
use crate::common::upload::{stream_to_file, UploadError};
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{error, info};

/// Upload a floorplan
/// Saves the file, renders the blueprint preview and records the job
#[utoipa::path(
    post,
    path = "/api/generate",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Job created", body = GenerateResponse),
        (status = 400, description = "Bad Request", body = ErrorBody),
        (status = 413, description = "Upload too large", body = ErrorBody),
        (status = 500, description = "Internal Server Error", body = ErrorBody)
    ),
    tag = "Jobs"
)]
pub async fn generate(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> impl IntoResponse {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => return ApiError(rejection.body_text(), rejection.status()).into_response(),
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return ApiError(format!("Invalid multipart body: {}", e), e.status()).into_response(),
        };

        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let job_id = JobService::new_job_id();
        let upload_path = state.storage.upload_path(&job_id, &file_name);
        info!("Starting job {} for upload {}", job_id, file_name);

        if let Err(e) = stream_to_file(field, &upload_path).await {
            error!("Failed to save upload for job {}: {}", job_id, e);
            let status = match &e {
                UploadError::Stream(stream) => stream.status(),
                UploadError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            return ApiError(format!("Upload failed: {}", e), status).into_response();
        }

        return match JobService::complete_upload(state.clone(), job_id, upload_path).await {
            Ok(job) => ApiSuccess(GenerateResponse { job_id: job.id }, StatusCode::OK).into_response(),
            Err(e) => ApiError(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response(),
        };
    }

    ApiError("No file field found in multipart request".to_string(), StatusCode::BAD_REQUEST).into_response()
}

/// Get job status
#[utoipa::path(
    get,
    path = "/api/jobs/{job_id}",
    params(
        ("job_id" = String, Path, description = "Job ID returned by /api/generate")
    ),
    responses(
        (status = 200, description = "Job record", body = Job),
        (status = 404, description = "Job not found", body = ErrorBody)
    ),
    tag = "Jobs"
)]
pub async fn get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> impl IntoResponse {
    match JobService::find_by_id(state, &job_id) {
        Some(job) => ApiSuccess(job, StatusCode::OK).into_response(),
        None => ApiError("not found".to_string(), StatusCode::NOT_FOUND).into_response(),
    }
}
