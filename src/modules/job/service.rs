use super::model::Job;
use super::repository::JobRepository;
use crate::infrastructure::storage::local::{LocalStorage, SAMPLE_VIDEO};
use crate::state::AppState;
use crate::workers::blueprint;
use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

pub struct JobService;

impl JobService {
    pub fn new_job_id() -> String {
        Uuid::new_v4().as_simple().to_string()
    }

    /// Turns a saved upload into a finished job. Transform failures become a
    /// `failed` record, only a clash in the job table is an error.
    pub async fn complete_upload(state: AppState, job_id: String, upload_path: PathBuf) -> Result<Job> {
        let preview_name = LocalStorage::preview_name(&job_id);
        let preview_path = state.storage.served_path(&preview_name);
        let video_url = state.config.public_file_url(SAMPLE_VIDEO);

        let job = match blueprint::render_preview(upload_path, preview_path).await {
            Ok((width, height)) => {
                info!("Job {} done: {} ({}x{})", job_id, preview_name, width, height);
                Job::done(job_id, state.config.public_file_url(&preview_name), video_url)
            }
            Err(e) => {
                warn!("Job {} failed: {}", job_id, e);
                Job::failed(job_id, video_url, e.kind(), e.to_string())
            }
        };

        let job = JobRepository::create(&state.jobs, job)?;
        info!("{} jobs recorded", state.jobs.count());
        Ok(job)
    }

    pub fn find_by_id(state: AppState, id: &str) -> Option<Job> {
        JobRepository::find_by_id(&state.jobs, id)
    }
}
