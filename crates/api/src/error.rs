//! HTTP mapping for application errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use imgdrop_shared::AppError;
use tracing::warn;

/// Plain-text error response built from an [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        warn!(
            status = status.as_u16(),
            code = self.0.error_code(),
            "Request rejected"
        );

        (status, self.0.to_string()).into_response()
    }
}
