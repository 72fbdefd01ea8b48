use std::sync::Arc;

use hypr_job_store::JobStore;

use crate::pipeline::Pipeline;

#[derive(Clone)]
pub struct AppState {
    pub jobs: JobStore,
    pub pipeline: Arc<Pipeline>,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(pipeline: Pipeline, max_upload_bytes: usize) -> Self {
        Self {
            jobs: JobStore::new(),
            pipeline: Arc::new(pipeline),
            max_upload_bytes,
        }
    }
}
