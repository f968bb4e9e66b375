use crate::config::settings::AppConfig;
use crate::infrastructure::memory::job_store::JobStore;
use crate::infrastructure::storage::local::LocalStorage;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub storage: LocalStorage,
    pub jobs: JobStore,
}

impl AppState {
    pub fn new(config: AppConfig, storage: LocalStorage, jobs: JobStore) -> Self {
        Self {
            config,
            storage,
            jobs,
        }
    }
}
