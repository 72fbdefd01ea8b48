use axum::{
    Json,
    extract::{Path, State},
};

use crate::error::Result;
use crate::routes::{JobSummary, parse_job_id};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/jobs/{id}",
    params(("id" = String, Path, description = "Job id")),
    responses(
        (status = 200, description = "Job summary", body = JobSummary),
        (status = 404, description = "Unknown job"),
    ),
    tag = "jobs",
)]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<JobSummary>> {
    let id = parse_job_id(&id)?;
    let job = state.jobs.get(&id).await?;
    Ok(Json(JobSummary::from(&job)))
}
