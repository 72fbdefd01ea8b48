use axum::{
    body::Body,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use crate::error::{AppError, Result};
use crate::routes::parse_job_id;
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/jobs/{id}/video",
    params(("id" = String, Path, description = "Job id")),
    responses(
        (status = 200, description = "The uploaded media"),
        (status = 404, description = "Unknown job, or media no longer on disk"),
    ),
    tag = "jobs",
)]
pub async fn stream_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = parse_job_id(&id)?;
    let job = state.jobs.get(&id).await?;

    let file = match tokio::fs::File::open(&job.media.path).await {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(job_id = %id, path = %job.media.path.display(), "media_missing");
            return Err(AppError::NotFound);
        }
        Err(e) => return Err(e.into()),
    };
    let length = file.metadata().await?.len();
    let content_type = job
        .media
        .path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(hypr_media_mime::extension_to_content_type)
        .unwrap_or("application/octet-stream");

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_LENGTH, length.to_string()),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
        ],
        Body::from_stream(ReaderStream::new(file)),
    )
        .into_response())
}
