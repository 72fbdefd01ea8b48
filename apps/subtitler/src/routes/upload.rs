use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
};

use crate::error::{AppError, NO_FILE_PART, NO_FILE_SELECTED, Result};
use crate::pipeline::Upload;
use crate::routes::JobSummary;
use crate::state::AppState;

const FIELD: &str = "video";

#[utoipa::path(
    post,
    path = "/jobs",
    request_body(content_type = "multipart/form-data", description = "Media file in the `video` field"),
    responses(
        (status = 201, description = "Job created", body = JobSummary),
        (status = 400, description = "No file part, or no file selected"),
        (status = 413, description = "Upload exceeds the configured size limit"),
        (status = 422, description = "Audio could not be extracted from the upload"),
        (status = 502, description = "Speech recognition failed"),
    ),
    tag = "jobs",
)]
pub async fn create_job(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<JobSummary>)> {
    let multipart = multipart.map_err(|_| AppError::InputMissing(NO_FILE_PART))?;
    let upload = read_upload(multipart).await?;
    tracing::info!(
        filename = upload.filename.as_deref().unwrap_or_default(),
        size = upload.bytes.len(),
        "upload_received"
    );

    let new_job = state.pipeline.process(upload).await?;
    let id = state.jobs.create(new_job).await;
    let job = state.jobs.get(&id).await?;

    Ok((StatusCode::CREATED, Json(JobSummary::from(&job))))
}

async fn read_upload(mut multipart: Multipart) -> Result<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(multipart_error)?
    {
        if field.name() != Some(FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string);
        if filename.as_deref().is_none_or(|name| name.trim().is_empty()) {
            return Err(AppError::InputMissing(NO_FILE_SELECTED));
        }

        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(multipart_error)?;

        return Ok(Upload {
            filename,
            content_type,
            bytes,
        });
    }

    Err(AppError::InputMissing(NO_FILE_PART))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::BadRequest(err.body_text())
    }
}
