use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::modules::job::model::Job;

/// Process-wide job table. Cloning shares the same map.
#[derive(Clone, Debug, Default)]
pub struct JobStore {
    jobs: Arc<DashMap<String, Job>>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a job unless its id is already taken. Returns whether it was stored.
    pub fn insert(&self, job: Job) -> bool {
        match self.jobs.entry(job.id.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(job);
                true
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<Job> {
        self.jobs.get(id).map(|entry| entry.value().clone())
    }

    /// Number of jobs recorded since startup.
    pub fn count(&self) -> usize {
        self.jobs.len()
    }
}
