use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

pub const NO_FILE_PART: &str = "No file part in the request.";
pub const NO_FILE_SELECTED: &str = "No file selected.";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InputMissing(&'static str),

    #[error("transcode failed: {0}")]
    TranscodeFailure(String),

    #[error("transcription failed: {0}")]
    TranscriptionFailure(String),

    #[error("job not found")]
    JobNotFound,

    #[error("not found")]
    NotFound,

    #[error("payload too large")]
    PayloadTooLarge,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<hypr_job_store::Error> for AppError {
    fn from(err: hypr_job_store::Error) -> Self {
        match err {
            hypr_job_store::Error::NotFound(_) => Self::JobNotFound,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::InputMissing(message) => {
                (StatusCode::BAD_REQUEST, "input_missing", message.to_string())
            }
            Self::TranscodeFailure(detail) => {
                tracing::warn!(error = %detail, "transcode_failed");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "transcode_failure",
                    "Error processing the video file. Please ensure it is a valid video."
                        .to_string(),
                )
            }
            Self::TranscriptionFailure(detail) => {
                tracing::error!(error = %detail, "transcription_failed");
                sentry::capture_message(&detail, sentry::Level::Error);
                (
                    StatusCode::BAD_GATEWAY,
                    "transcription_failure",
                    "Speech recognition failed.".to_string(),
                )
            }
            Self::JobNotFound => (
                StatusCode::NOT_FOUND,
                "job_not_found",
                "Job not found.".to_string(),
            ),
            Self::NotFound => (StatusCode::NOT_FOUND, "not_found", "Not found.".to_string()),
            Self::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "payload_too_large",
                "The uploaded file is too large.".to_string(),
            ),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, "bad_request", message),
            Self::Internal(message) => {
                tracing::error!(error = %message, "internal_error");
                sentry::capture_message(&message, sentry::Level::Error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_server_error",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetails {
                code: code.to_string(),
                message,
            },
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        let cases = [
            (AppError::InputMissing(NO_FILE_PART), StatusCode::BAD_REQUEST),
            (
                AppError::TranscodeFailure("exit 1".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::TranscriptionFailure("503".into()),
                StatusCode::BAD_GATEWAY,
            ),
            (AppError::JobNotFound, StatusCode::NOT_FOUND),
            (AppError::NotFound, StatusCode::NOT_FOUND),
            (AppError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
            (
                AppError::Internal("disk full".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
