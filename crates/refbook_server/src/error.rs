//! Uniform HTTP error shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{error, warn};

use refbook_core::error::RefbookError;

/// Wrapper collapsing every core error into the service's wire contract:
/// status 404, body `{"error": msg}`. The kinds stay apart in the logs.
pub struct AppError(pub RefbookError);

impl From<RefbookError> for AppError {
    fn from(err: RefbookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self.0 {
            RefbookError::InvalidInput(msg) => warn!(%msg, "request rejected"),
            err => error!(%err, "request failed"),
        }
        (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}
