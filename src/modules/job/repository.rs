use super::model::Job;
use crate::infrastructure::memory::job_store::JobStore;
use anyhow::{anyhow, Result};

pub struct JobRepository;

impl JobRepository {
    pub fn create(store: &JobStore, job: Job) -> Result<Job> {
        if !store.insert(job.clone()) {
            return Err(anyhow!("Job {} already exists", job.id));
        }

        Ok(job)
    }

    pub fn find_by_id(store: &JobStore, id: &str) -> Option<Job> {
        store.get(id)
    }
}
