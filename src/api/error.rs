//! API error responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::Error;

/// Errors surfaced by the internal API handlers.
///
/// Upstream failure details never leave the process; the public body carries
/// a generic message and the specifics go to the log.
#[derive(Debug)]
pub enum ApiError {
    /// Required request parameter missing or malformed (400).
    BadRequest(&'static str),
    /// Upstream credentials absent (500).
    Config,
    /// Upstream fetch or processing failed (500).
    Upstream(&'static str),
}

impl ApiError {
    /// Map an engine error onto a response, logging the original failure.
    ///
    /// `public` is the generic message the caller sees for anything that is
    /// not a configuration problem.
    pub fn from_engine(err: &Error, public: &'static str) -> Self {
        if err.is_config() {
            tracing::error!("{err}");
            Self::Config
        } else {
            tracing::error!("{public}: {err}");
            Self::Upstream(public)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            Self::Config => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Planning Center credentials not configured",
            ),
            Self::Upstream(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
