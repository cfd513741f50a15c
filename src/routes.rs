use std::path::Path;
use std::sync::Arc;

use axum::body::StreamBody;
use axum::extract::{Json, Path as UrlPath, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use tokio_util::io::ReaderStream;

use crate::config::Config;
use crate::error::ApiError;
use crate::ffmpeg::MediaTool;
use crate::models::{is_video_file, ClipRequest, ConvertRequest};

/// Shared handler state: configuration plus the media tool, both injected at
/// construction so tests can swap in temp dirs and a stub tool.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub tool: Arc<dyn MediaTool>,
}

impl AppState {
    pub fn new(config: Arc<Config>, tool: Arc<dyn MediaTool>) -> Self {
        Self { config, tool }
    }
}

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/list", get(list_videos))
        .route("/export_clip", post(export_clip))
        .route("/convert_to_streaming", post(convert_to_streaming))
        .route("/clips/:name", get(fetch_clip))
        // Open catch-all file route: anything that exists under the media
        // dir is served. Kept intentionally for a trusted local tool.
        .route("/*path", get(static_file))
        .with_state(state)
}

// Serves the front-end entry file.
async fn index(State(state): State<AppState>) -> Result<Response, ApiError> {
    stream_file(&state.config.index_file, "text/html; charset=utf-8", None).await
}

/// Non-recursive scan of the media dir for recognized video extensions.
/// Order is whatever the directory listing produces.
async fn list_videos(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let mut entries = tokio::fs::read_dir(&state.config.media_dir).await?;
    let mut videos = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if is_video_file(&name) {
            videos.push(name);
        }
    }
    Ok(Json(videos))
}

async fn export_clip(
    State(state): State<AppState>,
    Json(req): Json<ClipRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let src = state.config.media_dir.join(&req.video);
    if !tokio::fs::try_exists(&src).await? {
        return Err(ApiError::VideoNotFound);
    }

    let clip_name = req.clip_file_name();
    let dest = state.config.clip_dir.join(&clip_name);

    tracing::info!(video = %req.video, clip = %clip_name, "exporting clip");
    if let Err(err) = state.tool.trim(&src, req.start, req.end, &dest).await {
        tracing::error!(video = %req.video, error = %err, "clip export failed");
        return Err(ApiError::ExportFailed);
    }
    if !tokio::fs::try_exists(&dest).await? {
        tracing::error!(video = %req.video, clip = %clip_name, "tool produced no output");
        return Err(ApiError::ExportFailed);
    }

    Ok(Json(json!({ "clip": clip_name })))
}

async fn convert_to_streaming(
    State(state): State<AppState>,
    Json(req): Json<ConvertRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let src = state.config.media_dir.join(&req.video);
    if !tokio::fs::try_exists(&src).await? {
        return Err(ApiError::VideoNotFound);
    }

    // Remux lands next to the source, not in the clip dir.
    let out_name = req.output_file_name();
    let dest = state.config.media_dir.join(&out_name);

    tracing::info!(video = %req.video, output = %out_name, "remuxing for streaming");
    if let Err(err) = state.tool.remux(&src, &dest).await {
        tracing::error!(video = %req.video, error = %err, "convert failed");
        return Err(ApiError::ConvertFailed {
            detail: convert_detail(err),
        });
    }
    if !tokio::fs::try_exists(&dest).await? {
        tracing::error!(video = %req.video, output = %out_name, "tool produced no output");
        return Err(ApiError::ConvertFailed {
            detail: "unknown".into(),
        });
    }

    Ok(Json(json!({ "output": out_name })))
}

fn convert_detail(err: crate::ffmpeg::ToolError) -> String {
    match err {
        crate::ffmpeg::ToolError::Failed { stderr, .. } if !stderr.trim().is_empty() => stderr,
        crate::ffmpeg::ToolError::Failed { .. } => "unknown".into(),
        other @ crate::ffmpeg::ToolError::Spawn { .. } => other.to_string(),
    }
}

async fn fetch_clip(
    State(state): State<AppState>,
    UrlPath(name): UrlPath<String>,
) -> Result<Response, ApiError> {
    let path = state.config.clip_dir.join(&name);
    stream_file(&path, "video/mp4", Some(&name)).await
}

/// Open file-serving fallback: any path that resolves to an existing file
/// under the media dir is handed out as a generic download.
async fn static_file(
    State(state): State<AppState>,
    UrlPath(path): UrlPath<String>,
) -> Result<Response, ApiError> {
    let full = state.config.media_dir.join(&path);
    stream_file(&full, "application/octet-stream", None).await
}

/// Stream a file off disk without buffering it in memory. A missing file is
/// a NotFound, never an internal error.
async fn stream_file(
    path: &Path,
    content_type: &str,
    download_name: Option<&str>,
) -> Result<Response, ApiError> {
    let file = match tokio::fs::File::open(path).await {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::NotFound)
        }
        Err(err) => return Err(err.into()),
    };
    if file.metadata().await?.is_dir() {
        return Err(ApiError::NotFound);
    }

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(content_type).unwrap_or(HeaderValue::from_static(
            "application/octet-stream",
        )),
    );
    if let Some(name) = download_name {
        if let Ok(value) =
            HeaderValue::from_str(&format!("attachment; filename=\"{name}\""))
        {
            headers.insert(header::CONTENT_DISPOSITION, value);
        }
    }

    let body = StreamBody::new(ReaderStream::new(file));
    Ok((StatusCode::OK, headers, body).into_response())
}
