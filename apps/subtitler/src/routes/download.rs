use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use hypr_media_mime::ArtifactKind;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::error::{AppError, Result};
use crate::routes::parse_job_id;
use crate::state::AppState;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DownloadQuery {
    /// `vtt` or `transcript`.
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[utoipa::path(
    get,
    path = "/jobs/{id}/download",
    params(("id" = String, Path, description = "Job id"), DownloadQuery),
    responses(
        (status = 200, description = "Artifact as an attachment", body = String, content_type = "text/vtt"),
        (status = 404, description = "Unknown job or artifact kind"),
    ),
    tag = "jobs",
)]
pub async fn download(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response> {
    let id = parse_job_id(&id)?;
    let job = state.jobs.get(&id).await?;

    let kind = query
        .kind
        .as_deref()
        .and_then(ArtifactKind::from_query)
        .ok_or(AppError::NotFound)?;

    let body = match kind {
        ArtifactKind::Track => job.track,
        ArtifactKind::Transcript => job.transcript,
    };

    Ok((
        [
            (header::CONTENT_TYPE, kind.content_type().to_string()),
            (header::CONTENT_DISPOSITION, kind.content_disposition()),
        ],
        body,
    )
        .into_response())
}
