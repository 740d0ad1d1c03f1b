use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use crate::registry::ResolveError;

/// Boundary error: a resolution failure rendered as an HTTP response
#[derive(Debug)]
pub struct ApiError(pub ResolveError);

impl From<ResolveError> for ApiError {
    fn from(e: ResolveError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            e if e.is_not_found() => StatusCode::NOT_FOUND,
            ResolveError::Archive { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("Request failed: {:#}", anyhow::Error::from(self.0));
            let body = Json(json!({ "error": status.canonical_reason().unwrap_or("error") }));
            return (status, body).into_response();
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
