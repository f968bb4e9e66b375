use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::system::handler::health,
        crate::modules::system::handler::debug_files,
        crate::modules::job::handler::generate,
        crate::modules::job::handler::get_job,
    ),
    components(
        schemas(
            crate::common::response::ErrorBody,
            crate::modules::system::dto::HealthResponse,
            crate::modules::system::dto::DebugFilesResponse,
            crate::modules::job::dto::GenerateResponse,
            crate::modules::job::model::Job,
            crate::modules::job::model::JobStatus,
            crate::modules::job::model::ErrorKind,
        )
    ),
    tags(
        (name = "Jobs", description = "Floorplan upload and job status"),
        (name = "System", description = "Health and diagnostics")
    )
)]
pub struct ApiDoc;
