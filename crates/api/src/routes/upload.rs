//! Multipart image upload endpoint.

use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartError},
    http::StatusCode,
    routing::post,
};
use imgdrop_core::upload::UploadedFile;
use imgdrop_shared::AppError;
use tracing::debug;

use crate::{AppState, error::ApiError};

/// Body returned when every file went through.
pub const UPLOAD_SUCCESS: &str = "File uploaded successfully";

/// Content type assumed for parts that do not declare one.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Creates the upload routes with the given request body limit.
pub fn routes(max_request_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload_images))
        .layer(DefaultBodyLimit::max(max_request_bytes))
}

/// POST `/upload`
/// Validate every file part and forward accepted images to blob storage.
///
/// 200 with [`UPLOAD_SUCCESS`] when nothing was reported, otherwise 400 with
/// one message per line.
async fn upload_images(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<&'static str, ApiError> {
    let files = read_files(&mut multipart).await?;
    let report = state.uploads.upload_batch(&files).await;

    if report.is_success() {
        Ok(UPLOAD_SUCCESS)
    } else {
        Err(AppError::BadRequest(report.message_text()).into())
    }
}

/// Collect every part that carries a file name, in request order.
async fn read_files(multipart: &mut Multipart) -> Result<Vec<UploadedFile>, AppError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(file_name) = field.file_name().map(str::to_string) else {
            debug!(field = ?field.name(), "Ignoring non-file form field");
            continue;
        };
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();
        let content = field.bytes().await.map_err(multipart_error)?;

        files.push(UploadedFile::new(file_name, content_type, content));
    }

    Ok(files)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}
