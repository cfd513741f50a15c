//! API error type for HTTP handlers.
//!
//! Implements [`IntoResponse`] so handlers can return
//! `Result<impl IntoResponse, ApiError>` and get consistent JSON error
//! bodies with the right status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The source video named in a request does not exist.
    #[error("video not found")]
    VideoNotFound,

    /// A requested file (clip or static path) does not exist.
    #[error("not found")]
    NotFound,

    /// Clip export failed: ffmpeg reported an error or produced no output.
    #[error("clip export failed")]
    ExportFailed,

    /// Remux failed; `detail` carries the tool's captured stderr, or
    /// `"unknown"` when nothing was captured.
    #[error("convert failed: {detail}")]
    ConvertFailed { detail: String },

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::VideoNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "error": "video not found" }),
            ),
            ApiError::NotFound => (StatusCode::NOT_FOUND, json!({ "error": "not found" })),
            ApiError::ExportFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "clip export failed" }),
            ),
            ApiError::ConvertFailed { detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "convert failed", "detail": detail }),
            ),
            ApiError::Io(err) => {
                tracing::error!(error = %err, "I/O error while handling request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}
