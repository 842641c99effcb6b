//! Application error types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Application errors.
///
/// Every API endpoint converts failures into the JSON failure envelope
/// `{success: false, error, message?}` at the boundary. The HTML fragment
/// path does not use this type; it degrades to a rendered fallback instead.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or empty required input.
    #[error("{0}")]
    Validation(String),

    /// Unknown id or slug.
    #[error("{0}")]
    NotFound(&'static str),

    /// Database failure, tagged with the operation that failed.
    #[error("{context}")]
    Store {
        context: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl AppError {
    /// Wrap a `sqlx::Error` with the failing operation, for `map_err`.
    pub fn store(context: &'static str) -> impl FnOnce(sqlx::Error) -> Self {
        move |source| Self::Store { context, source }
    }
}

/// JSON failure envelope.
#[derive(Serialize)]
struct FailureEnvelope {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Store failures surface the underlying message to the client,
        // matching the envelope the browser client already consumes.
        let message = match &self {
            AppError::Store { context, source } => {
                tracing::error!(error = %source, "{context}");
                Some(source.to_string())
            }
            _ => None,
        };

        let body = FailureEnvelope {
            success: false,
            error: self.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias using AppError.
pub type AppResult<T> = Result<T, AppError>;
