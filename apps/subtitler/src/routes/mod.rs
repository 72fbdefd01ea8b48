pub(crate) mod download;
pub(crate) mod jobs;
pub(crate) mod speakers;
pub(crate) mod upload;
pub(crate) mod video;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use hypr_job_store::{Job, JobId, JobState};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, Result};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/health", get(health))
        .route("/openapi.json", get(openapi_json))
        .route("/jobs", post(upload::create_job))
        .route("/jobs/{id}", get(jobs::get_job))
        .route("/jobs/{id}/download", get(download::download))
        .route("/jobs/{id}/speakers", post(speakers::rename_speakers))
        .route("/jobs/{id}/video", get(video::stream_video))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(crate::openapi::openapi())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobStateView {
    Labeled,
    Finalized,
}

impl From<JobState> for JobStateView {
    fn from(state: JobState) -> Self {
        match state {
            JobState::Labeled => Self::Labeled,
            JobState::Finalized => Self::Finalized,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct JobSummary {
    pub id: String,
    pub state: JobStateView,
    /// Placeholders assigned to this job, in ascending number order.
    pub placeholders: Vec<String>,
    pub cue_count: usize,
}

impl From<&Job> for JobSummary {
    fn from(job: &Job) -> Self {
        let cue_count = match hypr_subtitle::parse_track(&job.track) {
            Ok(cues) => cues.len(),
            Err(e) => {
                tracing::warn!(job_id = %job.id, error = %e, "track_unparseable");
                0
            }
        };

        Self {
            id: job.id.to_string(),
            state: job.state.into(),
            placeholders: job
                .mapping
                .placeholders()
                .iter()
                .map(ToString::to_string)
                .collect(),
            cue_count,
        }
    }
}

/// Malformed ids cannot name a job, so they share the unknown-id response.
pub(crate) fn parse_job_id(raw: &str) -> Result<JobId> {
    raw.parse().map_err(|_| AppError::JobNotFound)
}
